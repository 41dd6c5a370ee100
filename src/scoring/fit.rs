// Role-fit scoring: weighted attribute surplus over tier thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{RoleCatalog, Tier};
use crate::player::Player;

/// Positional slot weights: slot 0 counts 4x, slot 3 counts 1x. The vector
/// is positional, never compacted — an empty slot 1 does not promote slot 2.
pub const ATTRIBUTE_WEIGHTS: [i32; 4] = [4, 3, 2, 1];

/// Sentinel score for "role unknown" and "player cannot play this role".
pub const UNUSABLE_SCORE: i32 = -999;

/// Qualitative fit classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLabel {
    Elite,
    Strong,
    Natural,
    Weak,
    Unusable,
    /// The role name did not resolve against the catalog. Distinct from
    /// `Unusable`, which means the role exists but the player cannot fill it.
    Unknown,
}

impl FitLabel {
    /// Whether a pair with this label may enter an allocation candidate list.
    pub fn is_usable(self) -> bool {
        matches!(
            self,
            FitLabel::Elite | FitLabel::Strong | FitLabel::Natural | FitLabel::Weak
        )
    }
}

impl fmt::Display for FitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FitLabel::Elite => "Elite",
            FitLabel::Strong => "Strong",
            FitLabel::Natural => "Natural",
            FitLabel::Weak => "Weak",
            FitLabel::Unusable => "Unusable",
            FitLabel::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Result of scoring one (player, role, tier) combination. Ephemeral,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    pub score: i32,
    pub label: FitLabel,
}

impl FitResult {
    fn sentinel(label: FitLabel) -> Self {
        FitResult {
            score: UNUSABLE_SCORE,
            label,
        }
    }
}

/// Classify a truncated score into its label band.
pub fn label_for(score: i32) -> FitLabel {
    if score >= 50 {
        FitLabel::Elite
    } else if score >= 20 {
        FitLabel::Strong
    } else if score >= 0 {
        FitLabel::Natural
    } else if score >= -20 {
        FitLabel::Weak
    } else {
        FitLabel::Unusable
    }
}

/// Score a player against a named role at a tier.
///
/// Pure function of the inputs: no hidden state, no randomness.
///
/// - Unknown role name: `(-999, Unknown)`.
/// - Role requires a position the player lacks: `(-999, Unusable)`.
///   A role with no required position skips the check entirely.
/// - Otherwise the weighted surplus of the player's attributes over the
///   tier's thresholds, truncated toward zero (never rounded — rounding
///   would move the label-band boundaries).
pub fn score_fit(player: &Player, role_name: &str, tier: Tier, catalog: &RoleCatalog) -> FitResult {
    let Some(role) = catalog.get(role_name) else {
        return FitResult::sentinel(FitLabel::Unknown);
    };

    if let Some(required) = role.position.as_deref() {
        if !player.plays(required) {
            return FitResult::sentinel(FitLabel::Unusable);
        }
    }

    let thresholds = tier.thresholds();
    let mut acc = 0.0_f64;
    for (i, slot) in role.attributes.iter().enumerate() {
        let Some(code) = slot else { continue };
        let value = player.attribute(*code);
        acc += (value - f64::from(thresholds[i])) * f64::from(ATTRIBUTE_WEIGHTS[i]);
    }

    let score = acc.trunc() as i32;
    FitResult {
        score,
        label: label_for(score),
    }
}
