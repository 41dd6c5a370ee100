// What-if lineup preview over an explicit candidate set.
//
// Deliberately slot-major, unlike the global allocator: each slot is
// resolved in request order and greedily takes the best remaining
// candidate. An early slot can therefore claim a player a later slot
// would have scored higher with. The two strategies are kept separate
// so previews stay cheap and their semantics stay honest.

use tracing::debug;

use crate::catalog::{RoleCatalog, Tier};
use crate::player::Player;
use crate::scoring::fit::score_fit;
use crate::squad::allocator::{AssignedPlayer, SlotAssignment, SlotRequest};

/// Fill slots in request order, each taking the single best remaining
/// usable candidate. Ties keep the first-encountered candidate.
pub fn simulate(
    slots: &[SlotRequest],
    candidates: &[Player],
    tier: Tier,
    catalog: &RoleCatalog,
) -> Vec<SlotAssignment> {
    let mut remaining: Vec<&Player> = candidates.iter().collect();
    let mut out = Vec::with_capacity(slots.len());

    for request in slots {
        let mut best: Option<(usize, i32, crate::scoring::fit::FitLabel)> = None;
        for (idx, player) in remaining.iter().enumerate() {
            let result = score_fit(player, &request.role, tier, catalog);
            if !result.label.is_usable() {
                continue;
            }
            if best.map_or(true, |(_, top, _)| result.score > top) {
                best = Some((idx, result.score, result.label));
            }
        }

        let player = best.map(|(idx, score, label)| {
            let picked = remaining.remove(idx);
            AssignedPlayer {
                player_id: picked.id,
                player_name: picked.full_name(),
                score,
                label,
            }
        });

        out.push(SlotAssignment {
            slot: request.slot.clone(),
            position: catalog.get(&request.role).and_then(|r| r.position.clone()),
            role: request.role.clone(),
            player,
        });
    }

    debug!(
        requested = slots.len(),
        filled = out.iter().filter(|a| a.player.is_some()).count(),
        candidates = candidates.len(),
        tier = %tier,
        "simulation complete"
    );
    out
}
