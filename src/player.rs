// Player model and position normalization.

use serde::{Deserialize, Serialize};

use crate::catalog::role::AttributeCode;

/// Position aliases folded into their canonical code during normalization.
/// Wingbacks collapse into fullbacks, wingers into wide midfielders, and the
/// sided centre-back variants into plain CB.
const POSITION_ALIASES: &[(&str, &str)] = &[
    ("LWB", "LB"),
    ("RWB", "RB"),
    ("LW", "LM"),
    ("RW", "RM"),
    ("CB-L", "CB"),
    ("CB-R", "CB"),
    ("CBL", "CB"),
    ("CBR", "CB"),
];

/// Normalize a position code: trim, uppercase, fold aliases.
///
/// Applied at every data-loading boundary so the core only ever compares
/// canonical codes.
pub fn normalize_position(s: &str) -> String {
    let upper = s.trim().to_uppercase();
    for (alias, canonical) in POSITION_ALIASES {
        if upper == *alias {
            return (*canonical).to_string();
        }
    }
    upper
}

/// A player record fetched transiently from the inventory source.
///
/// The core never persists these; club rosters hold only player ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// Normalized position codes. A player may hold several.
    pub positions: Vec<String>,
    pub overall: f64,
    pub pace: f64,
    pub shooting: f64,
    pub passing: f64,
    pub dribbling: f64,
    pub defense: f64,
    pub physical: f64,
    pub goalkeeping: f64,
}

impl Player {
    /// Full display name, trimmed of the join artifact when a part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether the player holds the given (already normalized) position.
    pub fn plays(&self, position: &str) -> bool {
        self.positions.iter().any(|p| p == position)
    }

    /// Numeric value for an attribute code.
    pub fn attribute(&self, code: AttributeCode) -> f64 {
        match code {
            AttributeCode::Pac => self.pace,
            AttributeCode::Sho => self.shooting,
            AttributeCode::Pas => self.passing,
            AttributeCode::Dri => self.dribbling,
            AttributeCode::Def => self.defense,
            AttributeCode::Phy => self.physical,
            AttributeCode::Gk => self.goalkeeping,
        }
    }
}
