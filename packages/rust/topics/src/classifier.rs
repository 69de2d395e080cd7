//! Rule-based multi-label topic classifier.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use reviewharvest_shared::{HarvestError, Result, ScriptProfile};

use crate::rules::{RULES, TopicRule};
use crate::taxonomy::Topic;

/// Separator for the combined topic label.
pub const LABEL_DELIMITER: &str = ",";

/// Lowercase, fold, punctuation to spaces, collapse whitespace, trim.
pub fn normalize_for_matching(profile: &ScriptProfile, text: &str) -> String {
    static PUNCT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

    let folded = profile.fold(text);
    let spaced = PUNCT_RE.replace_all(&folded, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One compiled phrase.
#[derive(Debug, Clone)]
enum Matcher {
    /// Short Latin token, matched on word boundaries.
    Word(Regex),
    /// Phrase or non-Latin token, matched anywhere.
    Substring(String),
}

impl Matcher {
    fn compile(profile: &ScriptProfile, phrase: &str) -> Result<Option<Self>> {
        static LATIN_TOKEN_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("valid regex"));

        let normalized = normalize_for_matching(profile, phrase);
        if normalized.is_empty() {
            return Ok(None);
        }

        if LATIN_TOKEN_RE.is_match(&normalized) {
            let pattern = format!(r"\b{}\b", regex::escape(&normalized));
            let re = Regex::new(&pattern).map_err(|e| {
                HarvestError::config(format!("invalid topic phrase {phrase:?}: {e}"))
            })?;
            Ok(Some(Self::Word(re)))
        } else {
            Ok(Some(Self::Substring(normalized)))
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Word(re) => re.is_match(text),
            Self::Substring(needle) => text.contains(needle.as_str()),
        }
    }
}

/// Per-topic flags for one review, in taxonomy order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicFlags([bool; Topic::COUNT]);

impl TopicFlags {
    pub fn is_set(&self, topic: Topic) -> bool {
        self.0[topic.index()]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&hit| hit)
    }

    /// Topics that matched, in taxonomy order.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        Topic::ALL.into_iter().filter(|t| self.is_set(*t))
    }

    /// Names of matched topics joined with [`LABEL_DELIMITER`]; empty if none.
    pub fn label(&self) -> String {
        self.topics()
            .map(Topic::name)
            .collect::<Vec<_>>()
            .join(LABEL_DELIMITER)
    }

    fn set(&mut self, topic: Topic) {
        self.0[topic.index()] = true;
    }
}

/// Matchers for every topic, compiled once from a rule table.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    profile: ScriptProfile,
    matchers: Vec<(Topic, Vec<Matcher>)>,
}

impl TopicClassifier {
    /// Compile the built-in rule table.
    pub fn new(profile: ScriptProfile) -> Result<Self> {
        Self::from_rules(profile, RULES)
    }

    pub fn from_rules(profile: ScriptProfile, rules: &[TopicRule]) -> Result<Self> {
        let mut matchers = Vec::with_capacity(Topic::COUNT);

        for topic in Topic::ALL {
            let mut compiled = Vec::new();
            for rule in rules.iter().filter(|r| r.topic == topic) {
                for phrase in rule.phrases {
                    if let Some(m) = Matcher::compile(&profile, phrase)? {
                        compiled.push(m);
                    }
                }
            }
            debug!(topic = %topic, matchers = compiled.len(), "compiled topic rules");
            matchers.push((topic, compiled));
        }

        Ok(Self { profile, matchers })
    }

    /// Flag every topic with at least one matching phrase in `title` + `body`.
    pub fn classify(&self, title: &str, body: &str) -> TopicFlags {
        let text = normalize_for_matching(&self.profile, &format!("{title} {body}"));
        let mut flags = TopicFlags::default();

        for (topic, matchers) in &self.matchers {
            if matchers.iter().any(|m| m.is_match(&text)) {
                flags.set(*topic);
            }
        }

        flags
    }
}
