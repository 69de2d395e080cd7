//! Multilingual keyword topic tagging.
//!
//! - [`taxonomy`] - the ordered topic list
//! - [`rules`] - the phrase table per topic
//! - [`classifier`] - normalization, compiled matchers, per-review flags

pub mod classifier;
pub mod rules;
pub mod taxonomy;

pub use classifier::{LABEL_DELIMITER, TopicClassifier, TopicFlags, normalize_for_matching};
pub use rules::{RULES, TopicRule, phrases_for};
pub use taxonomy::Topic;
