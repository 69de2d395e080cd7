//! CSV export of the output table. Every field is quoted.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use reviewharvest_shared::{HarvestError, ProductId, Result};

use crate::table::ReviewTable;

/// `appstore_reviews_all_countries_<id>_<YYYYMMDD>.csv`
pub fn default_output_name(product_id: &ProductId, date: NaiveDate) -> String {
    format!(
        "appstore_reviews_all_countries_{product_id}_{}.csv",
        date.format("%Y%m%d")
    )
}

/// Write the header and every row of `table` to `writer`.
pub fn write_csv<W: Write>(table: &ReviewTable, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv.write_record(table.columns())
        .map_err(|e| HarvestError::Export(e.to_string()))?;
    for row in table.rows() {
        csv.write_record(&row)
            .map_err(|e| HarvestError::Export(e.to_string()))?;
    }
    csv.flush()
        .map_err(|e| HarvestError::Export(e.to_string()))?;

    Ok(())
}

/// Write `table` to a CSV file at `path`, creating parent directories.
pub fn write_csv_file(table: &ReviewTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| HarvestError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| HarvestError::io(path, e))?;
    write_csv(table, file)?;

    info!(path = %path.display(), rows = table.len(), "CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use reviewharvest_shared::{NormalizedReview, RawReviewEntry};
    use reviewharvest_topics::TopicFlags;

    use super::*;
    use crate::table::OutputRecord;

    fn table_with_one_record() -> ReviewTable {
        let review = NormalizedReview {
            entry: RawReviewEntry {
                review_id: None,
                author_name: "Пётр".into(),
                title: "Цитата \"в кавычках\"".into(),
                body: "строка 1\nстрока 2, с запятой".into(),
                rating: 2,
                updated_raw: "2024-05-01T10:00:00Z".into(),
                version: Some("1.0".into()),
            },
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            region: "ru".into(),
        };
        let mut table = ReviewTable::new();
        table.push(OutputRecord::new(
            review,
            &ProductId::new("42").unwrap(),
            None,
            "ru",
            TopicFlags::default(),
            "https://apps.apple.com/ru/app/x/id42",
        ));
        table
    }

    #[test]
    fn output_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(
            default_output_name(&ProductId::new("570060128").unwrap(), date),
            "appstore_reviews_all_countries_570060128_20240509.csv"
        );
    }

    #[test]
    fn empty_table_writes_header_only() {
        let mut buf = Vec::new();
        write_csv(&ReviewTable::new(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("\"app_id\",\"app_name\",\"country\""));
        assert!(text.trim_end().ends_with("\"topic_motivation\",\"source_url\""));
    }

    #[test]
    fn fields_are_quoted_and_escaped() {
        let mut buf = Vec::new();
        write_csv(&table_with_one_record(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\"42\",\"\",\"ru\",\"\",\"Пётр\",\"2\""));
        assert!(text.contains("\"Цитата \"\"в кавычках\"\"\""));
        assert!(text.contains("\"строка 1\nстрока 2, с запятой\""));
        assert!(text.contains("\"\",\"0\",\"0\",\"0\",\"0\",\"0\",\"0\",\"https://apps.apple.com/ru/app/x/id42\""));
    }

    #[test]
    fn file_export_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("reviewharvest-export-{}", std::process::id()));
        let path = dir.join("nested").join("out.csv");

        write_csv_file(&table_with_one_record(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Пётр\""));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
