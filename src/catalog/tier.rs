// Tier difficulty bands and their attribute thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty tiers, ordered from most to least demanding.
///
/// The variant order is load-bearing: the best-fit search scans tiers in
/// declaration order and stops at the first tier where a player is viable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Iron,
    Stone,
    Ice,
    Spark,
    Flint,
}

impl Tier {
    /// All tiers, most demanding first.
    pub const ALL: [Tier; 10] = [
        Tier::Diamond,
        Tier::Platinum,
        Tier::Gold,
        Tier::Silver,
        Tier::Bronze,
        Tier::Iron,
        Tier::Stone,
        Tier::Ice,
        Tier::Spark,
        Tier::Flint,
    ];

    /// Threshold vector for this tier, index-aligned with a role's four
    /// attribute slots. Thresholds strictly decrease down the tier order,
    /// so scores are monotonically non-increasing in tier demandingness.
    pub fn thresholds(self) -> [i32; 4] {
        match self {
            Tier::Diamond => [97, 93, 90, 87],
            Tier::Platinum => [93, 90, 87, 84],
            Tier::Gold => [90, 87, 84, 80],
            Tier::Silver => [87, 84, 80, 77],
            Tier::Bronze => [84, 80, 77, 74],
            Tier::Iron => [80, 77, 74, 70],
            Tier::Stone => [77, 74, 70, 66],
            Tier::Ice => [74, 70, 66, 61],
            Tier::Spark => [70, 66, 61, 57],
            Tier::Flint => [66, 61, 57, 52],
        }
    }

    /// Parse a tier name (case-insensitive, surrounding whitespace ignored).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DIAMOND" => Some(Tier::Diamond),
            "PLATINUM" => Some(Tier::Platinum),
            "GOLD" => Some(Tier::Gold),
            "SILVER" => Some(Tier::Silver),
            "BRONZE" => Some(Tier::Bronze),
            "IRON" => Some(Tier::Iron),
            "STONE" => Some(Tier::Stone),
            "ICE" => Some(Tier::Ice),
            "SPARK" => Some(Tier::Spark),
            "FLINT" => Some(Tier::Flint),
            _ => None,
        }
    }

    /// Parse a tier name, falling back to Iron for unknown names.
    ///
    /// Iron is the fallback the request boundary has always used, so an
    /// unrecognized tier in a request degrades gracefully instead of failing.
    pub fn from_name_or_default(s: &str) -> Self {
        Self::from_name(s).unwrap_or(Tier::Iron)
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Tier::Diamond => "Diamond",
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Bronze => "Bronze",
            Tier::Iron => "Iron",
            Tier::Stone => "Stone",
            Tier::Ice => "Ice",
            Tier::Spark => "Spark",
            Tier::Flint => "Flint",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tiers_in_demandingness_order() {
        assert_eq!(Tier::ALL[0], Tier::Diamond);
        assert_eq!(Tier::ALL[9], Tier::Flint);
        assert_eq!(Tier::ALL.len(), 10);
    }

    #[test]
    fn thresholds_strictly_decrease_down_the_order() {
        for pair in Tier::ALL.windows(2) {
            let stronger = pair[0].thresholds();
            let weaker = pair[1].thresholds();
            for i in 0..4 {
                assert!(
                    stronger[i] > weaker[i],
                    "{} slot {} should be stricter than {}",
                    pair[0],
                    i,
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn thresholds_descend_within_a_tier() {
        for tier in Tier::ALL {
            let t = tier.thresholds();
            assert!(t[0] > t[1] && t[1] > t[2] && t[2] > t[3], "{tier}");
        }
    }

    #[test]
    fn known_threshold_values() {
        assert_eq!(Tier::Diamond.thresholds(), [97, 93, 90, 87]);
        assert_eq!(Tier::Iron.thresholds(), [80, 77, 74, 70]);
        assert_eq!(Tier::Flint.thresholds(), [66, 61, 57, 52]);
    }

    #[test]
    fn from_name_case_insensitive() {
        assert_eq!(Tier::from_name("iron"), Some(Tier::Iron));
        assert_eq!(Tier::from_name("DIAMOND"), Some(Tier::Diamond));
        assert_eq!(Tier::from_name("  Gold  "), Some(Tier::Gold));
    }

    #[test]
    fn from_name_unknown() {
        assert_eq!(Tier::from_name("Obsidian"), None);
        assert_eq!(Tier::from_name(""), None);
    }

    #[test]
    fn unknown_tier_falls_back_to_iron() {
        assert_eq!(Tier::from_name_or_default("Obsidian"), Tier::Iron);
        assert_eq!(Tier::from_name_or_default("flint"), Tier::Flint);
    }

    #[test]
    fn display_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_name(tier.name()), Some(tier));
        }
    }
}
