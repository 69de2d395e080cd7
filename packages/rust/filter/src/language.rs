//! Target-language heuristic: share of alphabetic characters in the target
//! script. No language model, no dictionaries.

use reviewharvest_shared::{NormalizedReview, ScriptProfile};

/// Texts with fewer alphabetic characters than this score 0.
pub const MIN_ALPHABETIC: usize = 12;

/// Fraction of alphabetic characters (any script) that belong to the target
/// script. Returns 0 for texts with fewer than [`MIN_ALPHABETIC`] letters.
pub fn script_ratio(profile: &ScriptProfile, text: &str) -> f64 {
    let (letters, target) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, target), c| {
            (letters + 1, target + usize::from(profile.contains(c)))
        });

    if letters < MIN_ALPHABETIC {
        return 0.0;
    }
    target as f64 / letters as f64
}

/// Score `title` and `body` together; accept iff the ratio reaches `threshold`.
pub fn is_target_language(profile: &ScriptProfile, title: &str, body: &str, threshold: f64) -> bool {
    let combined = format!("{title} {body}");
    script_ratio(profile, combined.trim()) >= threshold
}

/// A configured language check for normalized reviews.
#[derive(Debug, Clone, Copy)]
pub struct LanguageFilter {
    profile: ScriptProfile,
    threshold: f64,
}

impl LanguageFilter {
    pub fn new(profile: ScriptProfile, threshold: f64) -> Self {
        Self { profile, threshold }
    }

    pub fn accepts(&self, review: &NormalizedReview) -> bool {
        is_target_language(
            &self.profile,
            &review.entry.title,
            &review.entry.body,
            self.threshold,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RU: ScriptProfile = ScriptProfile::RUSSIAN;

    #[test]
    fn short_text_scores_zero() {
        // 9 letters, all Cyrillic.
        assert_eq!(script_ratio(&RU, "Привет мир"), 0.0);
        assert_eq!(script_ratio(&RU, ""), 0.0);
        assert_eq!(script_ratio(&RU, "123 !!! 456 ??? 789"), 0.0);
    }

    #[test]
    fn all_target_letters_score_one() {
        assert_eq!(script_ratio(&RU, "Отличное приложение, 10/10!"), 1.0);
        assert_eq!(script_ratio(&RU, "ЁЖИК ЁЛКА ЁМКОСТЬ"), 1.0);
    }

    #[test]
    fn foreign_letters_score_zero() {
        assert_eq!(script_ratio(&RU, "Great app, I use it every day"), 0.0);
        // Ukrainian-only letters are outside the profile.
        assert_eq!(script_ratio(&RU, "їїїїєєєєіііі"), 0.0);
    }

    #[test]
    fn mixed_text_ratio() {
        // 12 Cyrillic + 12 Latin letters.
        let ratio = script_ratio(&RU, "приложениеок applicationx");
        assert!((ratio - 0.5).abs() < 1e-9, "{ratio}");
    }

    #[test]
    fn threshold_decides() {
        assert!(is_target_language(&RU, "Супер", "Очень нравится это приложение", 0.55));
        assert!(!is_target_language(&RU, "Super", "I really like this app a lot", 0.55));
        // Title alone is too short, but together they pass.
        assert!(is_target_language(&RU, "Класс", "хорошо работает", 0.9));
        assert!(!is_target_language(&RU, "Ок", "", 0.01));
    }

    #[test]
    fn threshold_is_inclusive() {
        let text = "приложениеок applicationx";
        assert!(is_target_language(&RU, text, "", 0.5));
        assert!(!is_target_language(&RU, text, "", 0.51));
    }
}
