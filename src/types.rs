//! Type-safe selection types for the quote configurator
//!
//! Tier choices are proper Rust enums rather than strings so that every
//! match over them is exhaustive and typos are caught at compile time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Pricing tier a phase can be sold at
///
/// Standard Plus is a strict superset of Starter: it includes every Starter
/// feature plus its own exclusives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    #[default]
    #[strum(to_string = "Starter")]
    Starter,
    #[strum(
        to_string = "Standard Plus",
        serialize = "plus",
        serialize = "standard-plus",
        serialize = "standard_plus"
    )]
    StandardPlus,
}

impl Tier {
    /// The opposite tier
    pub fn other(self) -> Self {
        match self {
            Self::Starter => Self::StandardPlus,
            Self::StandardPlus => Self::Starter,
        }
    }

    /// Label printed inside the tier badge of the proposal
    pub fn badge_label(self) -> String {
        format!("PACK {}", self.to_string().to_uppercase())
    }

    /// Check whether this is the premium tier
    pub fn is_plus(self) -> bool {
        matches!(self, Self::StandardPlus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Starter.to_string(), "Starter");
        assert_eq!(Tier::StandardPlus.to_string(), "Standard Plus");
    }

    #[test]
    fn test_tier_parsing_accepts_aliases() {
        assert_eq!("starter".parse::<Tier>().ok(), Some(Tier::Starter));
        assert_eq!("STARTER".parse::<Tier>().ok(), Some(Tier::Starter));
        assert_eq!("Standard Plus".parse::<Tier>().ok(), Some(Tier::StandardPlus));
        assert_eq!("plus".parse::<Tier>().ok(), Some(Tier::StandardPlus));
        assert_eq!("standard-plus".parse::<Tier>().ok(), Some(Tier::StandardPlus));
        assert!("gold".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_serde_names() {
        let json = serde_json::to_string(&Tier::StandardPlus).expect("serialize");
        assert_eq!(json, "\"standard_plus\"");
        let parsed: Tier = serde_json::from_str("\"starter\"").expect("deserialize");
        assert_eq!(parsed, Tier::Starter);
    }

    #[test]
    fn test_tier_other_flips() {
        for tier in Tier::iter() {
            assert_ne!(tier, tier.other());
            assert_eq!(tier, tier.other().other());
        }
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(Tier::Starter.badge_label(), "PACK STARTER");
        assert_eq!(Tier::StandardPlus.badge_label(), "PACK STANDARD PLUS");
    }

    #[test]
    fn test_default_is_starter() {
        assert_eq!(Tier::default(), Tier::Starter);
        assert!(!Tier::default().is_plus());
    }
}
