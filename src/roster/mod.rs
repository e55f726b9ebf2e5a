pub mod worker;

pub use worker::{PreferenceTable, Rank, Worker};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::schedule::{generate_schedule, WeekSchedule};

/// Ordered list of workers with case-insensitively unique names.
/// Roster order is the tie-break order of the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    workers: Vec<Worker>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster, applying the same checks as `add_worker` to each entry
    pub fn from_workers(workers: impl IntoIterator<Item = Worker>) -> Result<Self> {
        let mut roster = Self::new();
        for worker in workers {
            roster.add_worker(worker)?;
        }
        Ok(roster)
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.is_named(name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.workers.iter().position(|w| w.is_named(name))
    }

    /// Appends a worker. The name is trimmed; empty and duplicate names are rejected.
    pub fn add_worker(&mut self, mut worker: Worker) -> Result<()> {
        worker.name = validate_name(&worker.name)?;
        if self.find(&worker.name).is_some() {
            return Err(ScheduleError::DuplicateWorker(worker.name));
        }
        self.workers.push(worker);
        Ok(())
    }

    pub fn remove_worker(&mut self, name: &str) -> Result<Worker> {
        let index = self
            .position(name)
            .ok_or_else(|| ScheduleError::UnknownWorker(name.trim().to_string()))?;
        Ok(self.workers.remove(index))
    }

    /// Renames in place, keeping roster position. Changing only the casing of
    /// a name is allowed.
    pub fn rename_worker(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let index = self
            .position(old_name)
            .ok_or_else(|| ScheduleError::UnknownWorker(old_name.trim().to_string()))?;
        let new_name = validate_name(new_name)?;
        if let Some(other) = self.position(&new_name) {
            if other != index {
                return Err(ScheduleError::DuplicateWorker(new_name));
            }
        }
        self.workers[index].name = new_name;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::EmptyName);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ScheduleError::InvalidName(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Roster plus the most recently generated schedule.
///
/// Every roster edit bumps the revision and drops the stored schedule, so a
/// schedule is only ever shown next to the roster it was generated from.
#[derive(Debug, Clone, Default)]
pub struct Session {
    roster: Roster,
    schedule: Option<WeekSchedule>,
    revision: u64,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            schedule: None,
            revision: 0,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn schedule(&self) -> Option<&WeekSchedule> {
        self.schedule.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_worker(&mut self, worker: Worker) -> Result<()> {
        self.roster.add_worker(worker)?;
        self.touch();
        Ok(())
    }

    pub fn remove_worker(&mut self, name: &str) -> Result<Worker> {
        let removed = self.roster.remove_worker(name)?;
        self.touch();
        Ok(removed)
    }

    pub fn rename_worker(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        self.roster.rename_worker(old_name, new_name)?;
        self.touch();
        Ok(())
    }

    pub fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
        self.touch();
    }

    /// Runs the engine against the current roster and keeps the result
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        config: &SchedulerConfig,
        rng: &mut R,
    ) -> Result<&WeekSchedule> {
        let schedule = generate_schedule(self.roster.workers(), config, rng)?;
        Ok(&*self.schedule.insert(schedule))
    }

    /// Stores a schedule generated elsewhere from the roster at `revision`.
    /// Returns false, and stores nothing, if the roster changed since.
    pub fn store_schedule(&mut self, revision: u64, schedule: WeekSchedule) -> bool {
        if revision != self.revision {
            info!(
                generated_from = revision,
                current = self.revision,
                "discarding schedule for an outdated roster"
            );
            return false;
        }
        self.schedule = Some(schedule);
        true
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.schedule = None;
    }
}
