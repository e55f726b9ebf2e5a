use rand::Rng;
use tracing::{error, info, warn};

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::roster::Worker;

use super::backfill::backfill_pass;
use super::priority::priority_pass;
use super::random_fill::random_fill_pass;
use super::slot_utils::{rank_tables, RankTable};
use super::state::AssignmentState;
use super::types::WeekSchedule;

/// Generates a weekly schedule for `workers`.
///
/// Every worker must have a rank for every slot; the first gap fails the
/// whole run with `MissingRank` before any pass starts. An empty roster gives
/// an empty schedule. Workers the heuristic could not place up to the weekly
/// cap are reported in `WeekSchedule::unresolved`, not as an error.
pub fn generate_schedule<R: Rng + ?Sized>(
    workers: &[Worker],
    config: &SchedulerConfig,
    rng: &mut R,
) -> Result<WeekSchedule> {
    let ranks = rank_tables(workers)?;
    info!(
        workers = workers.len(),
        capacity = config.capacity,
        max_shifts = config.max_shifts_per_worker,
        "generating schedule"
    );

    let mut state = deterministic_state(&ranks, config);
    let filled = random_fill_pass(&mut state, rng);
    check_invariants(&state, "random fill");

    let schedule = state.into_schedule(workers);
    info!(
        assignments = schedule.assignments.total(),
        random_fill = filled,
        unresolved = schedule.unresolved.len(),
        "schedule generated"
    );
    if !schedule.is_fully_resolved() {
        warn!(workers = ?schedule.unresolved, "some workers could not be fully scheduled");
    }
    Ok(schedule)
}

/// Runs only the priority and backfill passes. Their outcome depends on
/// roster order and ranks alone, so two calls on the same roster agree.
pub fn run_deterministic_passes(workers: &[Worker], config: &SchedulerConfig) -> Result<WeekSchedule> {
    let ranks = rank_tables(workers)?;
    Ok(deterministic_state(&ranks, config).into_schedule(workers))
}

fn deterministic_state(ranks: &[RankTable], config: &SchedulerConfig) -> AssignmentState {
    let mut state = AssignmentState::new(ranks.len(), config);

    priority_pass(ranks, &mut state);
    check_invariants(&state, "priority");

    backfill_pass(ranks, &mut state);
    check_invariants(&state, "backfill");

    state
}

fn check_invariants(state: &AssignmentState, pass: &str) {
    if !state.invariants_hold() {
        error!(pass, "assignment invariants violated");
        debug_assert!(false, "assignment invariants violated after {pass} pass");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::roster::{PreferenceTable, Rank};
    use crate::schedule::types::{Day, Shift, Slot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_roster() {
        let mut rng = StdRng::seed_from_u64(0);
        let schedule = generate_schedule(&[], &SchedulerConfig::default(), &mut rng).unwrap();
        assert_eq!(schedule, WeekSchedule::empty());
        assert_eq!(schedule.assignments.iter().count(), 21);
    }

    #[test]
    fn test_missing_rank_fails_before_any_pass() {
        let mut incomplete = PreferenceTable::uniform(Rank::HIGHEST);
        incomplete.clear(Day::Sunday, Shift::Evening);
        let workers = vec![
            Worker::new("ok", PreferenceTable::uniform(Rank::HIGHEST)),
            Worker::new("gap", incomplete),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        let err = generate_schedule(&workers, &SchedulerConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::MissingRank { ref worker, day: Day::Sunday, shift: Shift::Evening } if worker == "gap"
        ));
    }

    #[test]
    fn test_deterministic_passes_match_full_run_prefix() {
        let workers = vec![
            Worker::new("a", PreferenceTable::uniform(Rank::HIGHEST)),
            Worker::new("b", PreferenceTable::uniform(Rank::LOWEST)),
        ];
        let config = SchedulerConfig::default();
        let partial = run_deterministic_passes(&workers, &config).unwrap();
        let full = generate_schedule(&workers, &config, &mut StdRng::seed_from_u64(3)).unwrap();

        for (slot, names) in partial.assignments.iter() {
            let full_names = full.assignments.get(slot);
            assert!(full_names.starts_with(names), "{slot}: {names:?} vs {full_names:?}");
        }
        assert_eq!(
            partial.assignments.get(Slot::new(Day::Monday, Shift::Morning)),
            &["a".to_string(), "b".to_string()]
        );
    }
}
