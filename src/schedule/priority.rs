use tracing::{debug, trace};

use super::slot_utils::RankTable;
use super::state::AssignmentState;
use super::types::{Day, Slot};

/// First pass: for each day, place workers on their best-ranked shift.
///
/// Workers are visited in ascending order of their best rank on the day.
/// The sort is stable, so ties keep roster order. A worker whose ranked
/// shifts are all full gets nothing that day and is left to the backfill
/// pass. Returns the number of placements.
pub fn priority_pass(ranks: &[RankTable], state: &mut AssignmentState) -> usize {
    let mut placed = 0;

    for day in Day::ALL {
        let mut order: Vec<usize> = (0..ranks.len()).collect();
        order.sort_by_key(|&worker| ranks[worker].best_rank(day));

        let mut placed_today = 0;
        for worker in order {
            if state.is_exhausted(worker) || state.works_on(worker, day) {
                continue;
            }

            if let Some(shift) = state.try_place(worker, day, &ranks[worker].shifts_by_rank(day)) {
                trace!(worker, slot = %Slot::new(day, shift), "priority placement");
                placed_today += 1;
            }
        }

        debug!(day = %day, placed = placed_today, "priority pass day complete");
        placed += placed_today;
    }

    placed
}
