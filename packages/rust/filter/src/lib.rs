//! Review filtering: target-language heuristic and run-scoped deduplication.

pub mod dedup;
pub mod language;

pub use dedup::{DedupContext, DedupVerdict, fingerprint, normalize_for_fingerprint};
pub use language::{LanguageFilter, MIN_ALPHABETIC, is_target_language, script_ratio};
