// Best-fit search: the strongest tier at which a player is viable.

use serde::{Deserialize, Serialize};

use crate::catalog::{RoleCatalog, Tier};
use crate::player::Player;
use crate::scoring::fit::score_fit;

/// The single best (tier, role) classification for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestFit {
    Rated {
        tier: Tier,
        role: String,
        score: i32,
    },
    /// No role at any tier produced a non-negative score.
    Unrated,
}

impl BestFit {
    /// Tier name for display; the unrated sentinel reads "Unrated".
    pub fn tier_name(&self) -> &str {
        match self {
            BestFit::Rated { tier, .. } => tier.name(),
            BestFit::Unrated => "Unrated",
        }
    }

    /// Role name for display; the unrated sentinel reads "N/A".
    pub fn role_name(&self) -> &str {
        match self {
            BestFit::Rated { role, .. } => role,
            BestFit::Unrated => "N/A",
        }
    }
}

/// Find the highest-scoring usable role at the best tier the player
/// qualifies for.
///
/// Tiers are scanned from most to least demanding; a player viable at a
/// strong tier is trivially viable at every weaker one, so the scan stops
/// at the first tier where any role scores >= 0. Within a tier, a strictly
/// greater score wins and ties keep the first role in catalog order.
pub fn best_fit(player: &Player, catalog: &RoleCatalog) -> BestFit {
    for tier in Tier::ALL {
        let mut best: Option<(i32, &str)> = None;
        for role in catalog.iter() {
            if let Some(required) = role.position.as_deref() {
                if !player.plays(required) {
                    continue;
                }
            }
            let result = score_fit(player, &role.name, tier, catalog);
            if best.map_or(true, |(top, _)| result.score > top) {
                best = Some((result.score, &role.name));
            }
        }
        if let Some((score, role)) = best {
            if score >= 0 {
                return BestFit::Rated {
                    tier,
                    role: role.to_string(),
                    score,
                };
            }
        }
    }
    BestFit::Unrated
}
