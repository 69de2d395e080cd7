//! The fixed, ordered topic taxonomy.

use std::fmt;

/// A topic the classifier can flag. Declaration order is the taxonomy order
/// used for flag columns and the combined label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    Onboarding,
    Streak,
    Ads,
    Subscription,
    Bugs,
    Motivation,
}

impl Topic {
    pub const COUNT: usize = 6;

    pub const ALL: [Topic; Self::COUNT] = [
        Topic::Onboarding,
        Topic::Streak,
        Topic::Ads,
        Topic::Subscription,
        Topic::Bugs,
        Topic::Motivation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Streak => "streak",
            Self::Ads => "ads",
            Self::Subscription => "subscription",
            Self::Bugs => "bugs",
            Self::Motivation => "motivation",
        }
    }

    /// Output column holding this topic's flag.
    pub fn column(self) -> String {
        format!("topic_{}", self.name())
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (i, topic) in Topic::ALL.iter().enumerate() {
            assert_eq!(topic.index(), i);
        }
    }

    #[test]
    fn column_names() {
        assert_eq!(Topic::Ads.column(), "topic_ads");
        assert_eq!(Topic::Motivation.to_string(), "motivation");
    }
}
