//! Customer-review feed: URL layout, JSON decoding, timestamp parsing.
//!
//! Every field in the feed is wrapped in a single-key `{"label": ...}` object,
//! and `feed.entry` is an array - or a bare object when the page holds one
//! review.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use reviewharvest_shared::{HarvestError, ProductId, RawReviewEntry, Result};

/// Build the feed URL for one page (1-based) of one storefront.
pub fn feed_url(base: &Url, region: &str, product_id: &ProductId, page: u32) -> Result<Url> {
    let raw = format!(
        "{}/{region}/rss/customerreviews/page={page}/id={product_id}/sortby=mostrecent/json",
        base.as_str().trim_end_matches('/'),
    );
    Url::parse(&raw).map_err(|e| HarvestError::parse(format!("invalid feed URL {raw}: {e}")))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    feed: Option<FeedBody>,
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    #[serde(default)]
    entry: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Label {
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Author {
    #[serde(default)]
    name: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    title: Option<Label>,
    #[serde(default)]
    content: Option<Label>,
    #[serde(default, rename = "im:rating")]
    rating: Option<Label>,
    #[serde(default)]
    updated: Option<Label>,
    #[serde(default)]
    id: Option<Label>,
    #[serde(default, rename = "im:version")]
    version: Option<Label>,
}

/// Decode one feed page into review entries, in feed order.
///
/// A body that is not JSON is an error. A body without `feed`/`entry` is an
/// empty page. Entries that fail to decode or lack a required field are
/// dropped individually.
pub fn parse_feed(body: &str) -> Result<Vec<RawReviewEntry>> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| HarvestError::parse(format!("feed body is not valid JSON: {e}")))?;

    let items = match envelope.feed.and_then(|f| f.entry) {
        Some(Value::Array(items)) => items,
        Some(item @ Value::Object(_)) => vec![item],
        _ => return Ok(Vec::new()),
    };

    let total = items.len();
    let entries: Vec<RawReviewEntry> = items
        .into_iter()
        .filter_map(|item| match FeedEntry::deserialize(item) {
            Ok(entry) => into_raw_entry(entry),
            Err(e) => {
                debug!(error = %e, "undecodable feed entry, skipping");
                None
            }
        })
        .collect();

    if entries.len() < total {
        debug!(total, kept = entries.len(), "dropped incomplete feed entries");
    }

    Ok(entries)
}

fn label_text(label: Option<Label>) -> Option<String> {
    label
        .and_then(|l| l.label)
        .filter(|text| !text.trim().is_empty())
}

/// Apply the entry invariant: author, title, body, rating, timestamp and the
/// id object must all be present.
fn into_raw_entry(entry: FeedEntry) -> Option<RawReviewEntry> {
    let author_name = label_text(entry.author.and_then(|a| a.name))?;
    let title = label_text(entry.title)?;
    let body = label_text(entry.content)?;
    let updated_raw = label_text(entry.updated)?;
    let rating = label_text(entry.rating)?
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|r| (1..=5).contains(r))?;
    let review_id = entry.id.map(|id| label_text(Some(id)))?;

    Some(RawReviewEntry {
        review_id,
        author_name,
        title,
        body,
        rating,
        updated_raw,
        version: label_text(entry.version),
    })
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse a feed timestamp into UTC.
///
/// Accepts RFC 3339 (`Z` or numeric offset). Naive date-times and bare dates
/// are taken as UTC. Anything else yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
