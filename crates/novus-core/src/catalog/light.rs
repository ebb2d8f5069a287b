use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Light intensity announced by the game when a relic absorbs light.
///
/// Declaration order is ascending intensity; the toast scan relies on it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum LightLevel {
    #[strum(serialize = "Feeble")]
    Feeble = 0,
    #[strum(serialize = "Gentle")]
    Gentle = 1,
    #[strum(serialize = "Bright")]
    Bright = 2,
    #[strum(serialize = "Brilliant")]
    Brilliant = 3,
    #[strum(serialize = "Blinding")]
    Blinding = 4,
    #[strum(serialize = "Newborn Star")]
    NewbornStar = 5,
}

impl LightLevel {
    pub fn intensity(&self) -> u32 {
        match self {
            Self::Feeble => 8,
            Self::Gentle => 16,
            Self::Bright => 32,
            Self::Brilliant => 48,
            Self::Blinding => 96,
            Self::NewbornStar => 128,
        }
    }

    /// Word the toast contains for this level
    pub fn toast_substring(&self) -> &'static str {
        self.into()
    }
}

/// One row of the bonus level table: a toast substring and the intensity it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLevel {
    pub toast_substring: String,
    pub intensity: u32,
}

impl BonusLevel {
    pub fn new(toast_substring: impl Into<String>, intensity: u32) -> Self {
        Self {
            toast_substring: toast_substring.into(),
            intensity,
        }
    }

    /// Case-sensitive substring test against a toast
    pub fn matches(&self, text: &str) -> bool {
        !self.toast_substring.is_empty() && text.contains(self.toast_substring.as_str())
    }
}

impl From<LightLevel> for BonusLevel {
    fn from(level: LightLevel) -> Self {
        Self::new(level.toast_substring(), level.intensity())
    }
}

/// Builtin bonus levels, ascending by intensity
pub fn builtin_levels() -> Vec<BonusLevel> {
    LightLevel::iter().map(BonusLevel::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_ascending() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 6);
        assert!(levels.windows(2).all(|w| w[0].intensity < w[1].intensity));
        assert_eq!(levels[0], BonusLevel::new("Feeble", 8));
        assert_eq!(levels[5], BonusLevel::new("Newborn Star", 128));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let level = BonusLevel::from(LightLevel::NewbornStar);
        assert!(level.matches("The light is that of a Newborn Star!"));
        assert!(!level.matches("The light is that of a newborn star!"));
        assert!(!level.matches("NEWBORN STAR"));

        let feeble = BonusLevel::from(LightLevel::Feeble);
        assert!(!feeble.matches("feeble"));
        assert_eq!(LightLevel::Gentle.toast_substring(), "Gentle");
    }

    #[test]
    fn test_bright_does_not_match_brilliant() {
        let bright = BonusLevel::from(LightLevel::Bright);
        assert!(!bright.matches("The light is Brilliant."));
        assert!(bright.matches("The light is Bright."));
    }

    #[test]
    fn test_empty_substring_never_matches() {
        assert!(!BonusLevel::new("", 8).matches("anything"));
    }
}
