//! The output table: one record per kept review, fixed column layout.

use reviewharvest_shared::{NormalizedReview, ProductId};
use reviewharvest_topics::{Topic, TopicFlags};

/// Columns before the per-topic flags.
const LEADING_COLUMNS: &[&str] = &[
    "app_id",
    "app_name",
    "country",
    "review_id",
    "author_name",
    "rating",
    "title",
    "review_text",
    "review_date",
    "version",
    "language",
    "topic_tags",
];

/// Columns after the per-topic flags.
const TRAILING_COLUMNS: &[&str] = &["source_url"];

/// Every output column, in order.
pub fn columns() -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(Topic::ALL.iter().map(|t| t.column()))
        .chain(TRAILING_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// One kept review with product context and topic flags.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub app_id: ProductId,
    pub app_name: Option<String>,
    pub country: String,
    pub review_id: Option<String>,
    pub author_name: String,
    pub rating: u8,
    pub title: String,
    pub review_text: String,
    /// ISO-8601, UTC.
    pub review_date: String,
    pub version: Option<String>,
    pub language: &'static str,
    pub topics: TopicFlags,
    pub source_url: String,
}

impl OutputRecord {
    pub fn new(
        review: NormalizedReview,
        app_id: &ProductId,
        app_name: Option<&str>,
        language: &'static str,
        topics: TopicFlags,
        source_url: &str,
    ) -> Self {
        let review_date = review.updated_iso();
        let NormalizedReview { entry, region, .. } = review;

        Self {
            app_id: app_id.clone(),
            app_name: app_name.map(String::from),
            country: region,
            review_id: entry.review_id,
            author_name: entry.author_name,
            rating: entry.rating,
            title: entry.title,
            review_text: entry.body,
            review_date,
            version: entry.version,
            language,
            topics,
            source_url: source_url.to_string(),
        }
    }

    /// Field values in [`columns`] order. Missing values become empty strings,
    /// topic flags become `1`/`0`.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.app_id.to_string(),
            self.app_name.clone().unwrap_or_default(),
            self.country.clone(),
            self.review_id.clone().unwrap_or_default(),
            self.author_name.clone(),
            self.rating.to_string(),
            self.title.clone(),
            self.review_text.clone(),
            self.review_date.clone(),
            self.version.clone().unwrap_or_default(),
            self.language.to_string(),
            self.topics.label(),
        ];
        row.extend(Topic::ALL.iter().map(|t| {
            if self.topics.is_set(*t) { "1" } else { "0" }.to_string()
        }));
        row.push(self.source_url.clone());
        row
    }
}

/// Ordered collection of output records. The column layout holds even when
/// empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewTable {
    records: Vec<OutputRecord>,
}

impl ReviewTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    pub fn columns(&self) -> Vec<String> {
        columns()
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(OutputRecord::to_row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records flagged with `topic`.
    pub fn topic_count(&self, topic: Topic) -> usize {
        self.records
            .iter()
            .filter(|r| r.topics.is_set(topic))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use reviewharvest_shared::{RawReviewEntry, ScriptProfile};
    use reviewharvest_topics::TopicClassifier;

    use super::*;

    fn record(review_id: Option<&str>, version: Option<&str>, body: &str) -> OutputRecord {
        let review = NormalizedReview {
            entry: RawReviewEntry {
                review_id: review_id.map(String::from),
                author_name: "Мария".into(),
                title: "Отзыв".into(),
                body: body.into(),
                rating: 4,
                updated_raw: "2024-05-01T10:00:00-07:00".into(),
                version: version.map(String::from),
            },
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 17, 0, 0).unwrap(),
            region: "kz".into(),
        };
        let topics = TopicClassifier::new(ScriptProfile::RUSSIAN)
            .unwrap()
            .classify(&review.entry.title, &review.entry.body);
        OutputRecord::new(
            review,
            &ProductId::new("570060128").unwrap(),
            Some("Owl Lessons"),
            "ru",
            topics,
            "https://apps.apple.com/us/app/x/id570060128",
        )
    }

    #[test]
    fn column_layout() {
        assert_eq!(
            columns(),
            vec![
                "app_id",
                "app_name",
                "country",
                "review_id",
                "author_name",
                "rating",
                "title",
                "review_text",
                "review_date",
                "version",
                "language",
                "topic_tags",
                "topic_onboarding",
                "topic_streak",
                "topic_ads",
                "topic_subscription",
                "topic_bugs",
                "topic_motivation",
                "source_url",
            ]
        );
    }

    #[test]
    fn row_matches_columns() {
        let row = record(Some("77"), Some("7.1.0"), "Много рекламы и ошибка").to_row();
        assert_eq!(row.len(), columns().len());
        assert_eq!(
            row,
            vec![
                "570060128",
                "Owl Lessons",
                "kz",
                "77",
                "Мария",
                "4",
                "Отзыв",
                "Много рекламы и ошибка",
                "2024-05-01T17:00:00+00:00",
                "7.1.0",
                "ru",
                "bugs",
                "0",
                "0",
                "0",
                "0",
                "1",
                "0",
                "https://apps.apple.com/us/app/x/id570060128",
            ]
        );
    }

    #[test]
    fn missing_values_export_empty() {
        let row = record(None, None, "Всё хорошо").to_row();
        assert_eq!(row[3], "");
        assert_eq!(row[9], "");
        assert_eq!(row[11], "");
    }

    #[test]
    fn empty_table_keeps_columns() {
        let table = ReviewTable::new();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 19);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn topic_counts() {
        let mut table = ReviewTable::new();
        table.push(record(Some("1"), None, "Вылетает"));
        table.push(record(Some("2"), None, "Ошибка при входе"));
        table.push(record(Some("3"), None, "Нормально"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.topic_count(Topic::Bugs), 2);
        assert_eq!(table.topic_count(Topic::Onboarding), 1);
        assert_eq!(table.topic_count(Topic::Ads), 0);
    }
}
