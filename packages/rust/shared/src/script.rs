//! Target-script profile: which letters count as the target language and how
//! letter variants fold for matching.

/// Describes the script of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptProfile {
    /// Language tag written into every output record.
    pub tag: &'static str,
    /// Inclusive character ranges that belong to the target script.
    pub ranges: &'static [(char, char)],
    /// Letter variants folded to their base form (applied after lowercasing).
    pub folds: &'static [(char, char)],
}

impl ScriptProfile {
    /// Russian Cyrillic: `А-Я`, `а-я`, `Ё`, `ё`; `ё` folds to `е`.
    pub const RUSSIAN: ScriptProfile = ScriptProfile {
        tag: "ru",
        ranges: &[('А', 'я'), ('Ё', 'Ё'), ('ё', 'ё')],
        folds: &[('ё', 'е')],
    };

    /// Whether `c` belongs to the target script.
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
    }

    /// Lowercase `text` and fold letter variants to their base form.
    pub fn fold(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .map(|c| {
                self.folds
                    .iter()
                    .find(|&&(from, _)| from == c)
                    .map_or(c, |&(_, to)| to)
            })
            .collect()
    }
}

impl Default for ScriptProfile {
    fn default() -> Self {
        Self::RUSSIAN
    }
}
