use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::state::AssignmentState;
use super::types::Slot;

/// Third pass: saturate every slot still under capacity.
///
/// Slots are visited in day-then-shift order. Each free place goes to a
/// worker picked uniformly at random from the eligible candidates. The RNG is
/// the only source of non-determinism in the engine.
pub fn random_fill_pass<R: Rng + ?Sized>(state: &mut AssignmentState, rng: &mut R) -> usize {
    let mut placed = 0;

    for slot in Slot::all() {
        while state.has_capacity(slot) {
            let candidates = eligible_candidates(state, slot);
            let chosen = match candidates.choose(rng) {
                Some(&worker) => worker,
                None => break,
            };
            trace!(worker = chosen, slot = %slot, candidates = candidates.len(), "random fill placement");
            state.assign(chosen, slot);
            placed += 1;
        }
    }

    debug!(placed, "random fill pass complete");
    placed
}

/// Workers in roster order that may take a place in `slot`: under the weekly
/// cap, not unresolved, and holding no slot on that day (which also rules
/// out the slot itself).
pub fn eligible_candidates(state: &AssignmentState, slot: Slot) -> Vec<usize> {
    (0..state.worker_count())
        .filter(|&worker| {
            !state.is_exhausted(worker)
                && !state.is_unresolved(worker)
                && !state.works_on(worker, slot.day)
        })
        .collect()
}
