//! Core domain types shared across the harvest pipeline.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProductId
// ---------------------------------------------------------------------------

/// Numeric product identifier as it appears in storefront URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a digit string. Returns `None` for empty or non-digit input.
    pub fn new(digits: impl Into<String>) -> Option<Self> {
        let digits = digits.into();
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Review records
// ---------------------------------------------------------------------------

/// One review as parsed from a feed item, before timestamp normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReviewEntry {
    /// Stable review identifier. `None` when the feed carries a blank id.
    pub review_id: Option<String>,
    pub author_name: String,
    pub title: String,
    pub body: String,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Update timestamp exactly as the feed reports it.
    pub updated_raw: String,
    /// App version the review was written against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A review with a parsed UTC timestamp and its originating region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReview {
    pub entry: RawReviewEntry,
    pub updated_at: DateTime<Utc>,
    pub region: String,
}

impl NormalizedReview {
    /// ISO-8601 rendering of the timestamp (`2024-05-01T10:00:00+00:00`).
    pub fn updated_iso(&self) -> String {
        self.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn product_id_requires_digits() {
        assert_eq!(ProductId::new("570060128").unwrap().as_str(), "570060128");
        assert!(ProductId::new("").is_none());
        assert!(ProductId::new("12a").is_none());
    }

    #[test]
    fn updated_iso_uses_utc_offset() {
        let review = NormalizedReview {
            entry: RawReviewEntry {
                review_id: Some("1".into()),
                author_name: "a".into(),
                title: "t".into(),
                body: "b".into(),
                rating: 5,
                updated_raw: "2024-05-01T03:00:00-07:00".into(),
                version: None,
            },
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            region: "us".into(),
        };
        assert_eq!(review.updated_iso(), "2024-05-01T10:00:00+00:00");
    }
}
