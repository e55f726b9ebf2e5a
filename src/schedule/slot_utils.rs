use crate::error::{Result, ScheduleError};
use crate::roster::{Rank, Worker};

use super::types::{Day, Shift, DAY_COUNT, SHIFT_COUNT};

/// Fully populated rank table for one worker, built once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTable {
    ranks: [[Rank; SHIFT_COUNT]; DAY_COUNT],
}

impl RankTable {
    /// Fails with `MissingRank` on the first unset entry instead of guessing one
    pub fn from_worker(worker: &Worker) -> Result<Self> {
        let mut ranks = [[Rank::LOWEST; SHIFT_COUNT]; DAY_COUNT];
        for day in Day::ALL {
            for shift in Shift::ALL {
                ranks[day.index()][shift.index()] = worker
                    .preferences
                    .get(day, shift)
                    .ok_or_else(|| ScheduleError::MissingRank {
                        worker: worker.name.clone(),
                        day,
                        shift,
                    })?;
            }
        }
        Ok(Self { ranks })
    }

    pub fn rank(&self, day: Day, shift: Shift) -> Rank {
        self.ranks[day.index()][shift.index()]
    }

    /// Lowest rank value across the day's shifts ("best interest" in the day)
    pub fn best_rank(&self, day: Day) -> Rank {
        self.ranks[day.index()]
            .iter()
            .copied()
            .min()
            .unwrap_or(Rank::LOWEST)
    }

    /// The day's shifts in ascending rank order; equal ranks keep shift order
    pub fn shifts_by_rank(&self, day: Day) -> [Shift; SHIFT_COUNT] {
        let mut shifts = Shift::ALL;
        shifts.sort_by_key(|&shift| self.rank(day, shift));
        shifts
    }

    /// Sorts days ascending by best rank; equal ranks keep their current order
    pub fn sort_days_by_best_rank(&self, days: &mut [Day]) {
        days.sort_by_key(|&day| self.best_rank(day));
    }
}

/// Validates every worker's preferences and builds their rank tables
pub fn rank_tables(workers: &[Worker]) -> Result<Vec<RankTable>> {
    workers.iter().map(RankTable::from_worker).collect()
}
