//! Run-scoped review deduplication.
//!
//! Reviews with a stable identifier are deduplicated by that identifier.
//! Reviews without one fall back to a SHA-256 fingerprint over normalized
//! author, timestamp and text.

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::trace;

use reviewharvest_shared::{NormalizedReview, ScriptProfile};

/// Outcome of offering a review to the [`DedupContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupVerdict {
    Accepted,
    DuplicateId,
    DuplicateFingerprint,
}

impl DedupVerdict {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Identifiers and fingerprints accepted so far in one harvest run.
#[derive(Debug, Clone, Default)]
pub struct DedupContext {
    profile: ScriptProfile,
    seen_ids: HashSet<String>,
    seen_fingerprints: HashSet<String>,
}

impl DedupContext {
    pub fn new(profile: ScriptProfile) -> Self {
        Self {
            profile,
            seen_ids: HashSet::new(),
            seen_fingerprints: HashSet::new(),
        }
    }

    /// Accept and record `review` unless an equivalent one was already seen.
    pub fn admit(&mut self, review: &NormalizedReview) -> DedupVerdict {
        match review.entry.review_id.as_deref() {
            Some(id) => {
                if self.seen_ids.insert(id.to_string()) {
                    DedupVerdict::Accepted
                } else {
                    trace!(review_id = id, "duplicate review id");
                    DedupVerdict::DuplicateId
                }
            }
            None => {
                let key = fingerprint(
                    &self.profile,
                    &review.entry.author_name,
                    &review.updated_iso(),
                    &review.entry.title,
                    &review.entry.body,
                );
                if self.seen_fingerprints.insert(key) {
                    DedupVerdict::Accepted
                } else {
                    trace!(author = %review.entry.author_name, "duplicate review fingerprint");
                    DedupVerdict::DuplicateFingerprint
                }
            }
        }
    }

    pub fn seen_ids(&self) -> usize {
        self.seen_ids.len()
    }

    pub fn seen_fingerprints(&self) -> usize {
        self.seen_fingerprints.len()
    }
}

/// Lowercase, fold letter variants, collapse whitespace.
pub fn normalize_for_fingerprint(profile: &ScriptProfile, text: &str) -> String {
    profile
        .fold(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hex SHA-256 over `author||timestamp||title\nbody`, normalized.
pub fn fingerprint(
    profile: &ScriptProfile,
    author: &str,
    timestamp_iso: &str,
    title: &str,
    body: &str,
) -> String {
    let base = format!("{author}||{timestamp_iso}||{title}\n{body}");
    let normalized = normalize_for_fingerprint(profile, &base);

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}
