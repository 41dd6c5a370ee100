// Global-greedy squad allocation: highest score first, no double-booking.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{RoleCatalog, Tier};
use crate::player::Player;
use crate::scoring::fit::{score_fit, FitLabel};

// ---------------------------------------------------------------------------
// Request / result types
// ---------------------------------------------------------------------------

/// One requested slot: a stable identifier and the role it should be
/// filled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub slot: String,
    pub role: String,
}

/// Whether players already committed to a club roster may be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Consider every fetched player (historical default).
    #[default]
    AllowRostered,
    /// Squad-building considers free agents only: any player id present in
    /// any club roster is removed from the pool before scoring.
    ExcludeRostered,
}

/// A player accepted into a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPlayer {
    pub player_id: u64,
    pub player_name: String,
    pub score: i32,
    pub label: FitLabel,
}

/// One output row per requested slot. `player: None` is an explicit
/// "Unfilled" row: role and position are preserved, score is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot: String,
    pub position: Option<String>,
    pub role: String,
    pub player: Option<AssignedPlayer>,
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Scored (slot, player) pair awaiting the acceptance pass.
struct Candidate {
    slot_idx: usize,
    player_idx: usize,
    score: i32,
    label: FitLabel,
}

/// Allocate players to slots, best global score first.
///
/// Every usable (slot, player) pair is scored, the pairs are sorted by
/// score descending, and a single pass accepts each pair whose slot and
/// player are both still free. This is greedy maximum-weight-first, not an
/// optimal bipartite matching — a deliberate simplicity trade-off.
///
/// Ties are broken by an explicit total order: score descending, then slot
/// request order, then player id ascending, so the result is reproducible
/// regardless of pool iteration order.
pub fn assign(
    slots: &[SlotRequest],
    pool: &[Player],
    tier: Tier,
    catalog: &RoleCatalog,
) -> Vec<SlotAssignment> {
    assign_with_exclusions(slots, pool, &HashSet::new(), tier, catalog)
}

/// `assign` with a pre-pass that removes excluded player ids from the pool
/// (used by the free-agent policy).
pub fn assign_with_exclusions(
    slots: &[SlotRequest],
    pool: &[Player],
    excluded: &HashSet<u64>,
    tier: Tier,
    catalog: &RoleCatalog,
) -> Vec<SlotAssignment> {
    let eligible: Vec<&Player> = pool.iter().filter(|p| !excluded.contains(&p.id)).collect();

    // 1. Score every pair; unusable and unknown-role pairs never enter.
    let mut candidates: Vec<Candidate> = Vec::new();
    for (slot_idx, request) in slots.iter().enumerate() {
        for (player_idx, player) in eligible.iter().enumerate() {
            let result = score_fit(player, &request.role, tier, catalog);
            if !result.label.is_usable() {
                continue;
            }
            candidates.push(Candidate {
                slot_idx,
                player_idx,
                score: result.score,
                label: result.label,
            });
        }
    }

    // 2. Explicit total order: score desc, slot request order, player id asc.
    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.slot_idx.cmp(&b.slot_idx))
            .then(eligible[a.player_idx].id.cmp(&eligible[b.player_idx].id))
    });

    // 3. Single acceptance pass: a tuple is taken iff its slot is unfilled
    //    and its player unused; both are consumed and never reconsidered.
    let mut filled: Vec<Option<AssignedPlayer>> = vec![None; slots.len()];
    let mut used_players: HashSet<u64> = HashSet::new();
    for candidate in candidates {
        if filled[candidate.slot_idx].is_some() {
            continue;
        }
        let player = eligible[candidate.player_idx];
        if used_players.contains(&player.id) {
            continue;
        }
        used_players.insert(player.id);
        filled[candidate.slot_idx] = Some(AssignedPlayer {
            player_id: player.id,
            player_name: player.full_name(),
            score: candidate.score,
            label: candidate.label,
        });
    }

    // 4. Emit every requested slot in request order; unmatched slots become
    //    explicit Unfilled rows.
    let assignments: Vec<SlotAssignment> = slots
        .iter()
        .zip(filled)
        .map(|(request, player)| SlotAssignment {
            slot: request.slot.clone(),
            position: catalog.get(&request.role).and_then(|r| r.position.clone()),
            role: request.role.clone(),
            player,
        })
        .collect();

    debug!(
        requested = slots.len(),
        filled = assignments.iter().filter(|a| a.player.is_some()).count(),
        pool = eligible.len(),
        tier = %tier,
        "squad allocation complete"
    );
    assignments
}
