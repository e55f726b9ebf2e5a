use tracing::{debug, trace, warn};

use super::slot_utils::RankTable;
use super::state::AssignmentState;
use super::types::{Day, Slot};

/// Second pass: top up workers who are still under the weekly cap.
///
/// Workers are visited in roster order. Each one is repeatedly placed on
/// their best open day until they hit the cap or run out of open days. When
/// no open day has room, the calendar day after each open day is tried once
/// before the worker is marked unresolved. Returns the number of placements.
pub fn backfill_pass(ranks: &[RankTable], state: &mut AssignmentState) -> usize {
    let mut placed = 0;

    for (worker, table) in ranks.iter().enumerate() {
        if state.is_unresolved(worker) {
            continue;
        }

        while !state.is_exhausted(worker) {
            let mut open_days = state.open_days(worker);
            if open_days.is_empty() {
                break;
            }
            table.sort_days_by_best_rank(&mut open_days);

            if place_on_open_day(worker, table, &open_days, state).is_some()
                || place_on_next_day(worker, table, &open_days, state).is_some()
            {
                placed += 1;
                continue;
            }

            warn!(
                worker,
                workload = state.workload(worker),
                "no open slot left, marking worker unresolved"
            );
            state.mark_unresolved(worker);
            break;
        }
    }

    debug!(placed, unresolved = state.unresolved().len(), "backfill pass complete");
    placed
}

/// Tries the open days in order, shifts in rank order within each day
fn place_on_open_day(
    worker: usize,
    table: &RankTable,
    open_days: &[Day],
    state: &mut AssignmentState,
) -> Option<Slot> {
    for &day in open_days {
        if let Some(shift) = state.try_place(worker, day, &table.shifts_by_rank(day)) {
            let slot = Slot::new(day, shift);
            trace!(worker, slot = %slot, "backfill placement");
            return Some(slot);
        }
    }
    None
}

/// Calendar-adjacent fallback: only the single next day after each open day
/// is considered, never a wider search.
fn place_on_next_day(
    worker: usize,
    table: &RankTable,
    open_days: &[Day],
    state: &mut AssignmentState,
) -> Option<Slot> {
    for &day in open_days {
        let next = day.next();
        if state.works_on(worker, next) {
            continue;
        }
        if let Some(shift) = state.try_place(worker, next, &table.shifts_by_rank(next)) {
            let slot = Slot::new(next, shift);
            trace!(worker, from = %day, slot = %slot, "next-day fallback placement");
            return Some(slot);
        }
    }
    None
}
