use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::roster::{PreferenceTable, Rank, Worker};
use crate::schedule::{Day, Shift};

/// One rank entry as sent by the roster editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub day: Day,
    pub shift: Shift,
    pub rank: u8,
}

/// Worker submission from the roster editor. Slots left out of
/// `preferences` default to the lowest preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSubmission {
    pub name: String,
    #[serde(default)]
    pub preferences: Vec<PreferenceEntry>,
}

impl From<&Worker> for WorkerSubmission {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name.clone(),
            preferences: worker
                .preferences
                .entries()
                .map(|(slot, rank)| PreferenceEntry {
                    day: slot.day,
                    shift: slot.shift,
                    rank: rank.value(),
                })
                .collect(),
        }
    }
}

/// Validates a submission and turns it into a worker with a complete
/// preference table. A later entry for the same slot wins.
pub fn validate_submission(req: &WorkerSubmission) -> Result<Worker> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ScheduleError::EmptyName);
    }

    let mut preferences = PreferenceTable::new();
    for entry in &req.preferences {
        preferences.set(entry.day, entry.shift, Rank::new(entry.rank)?);
    }
    preferences.fill_missing(Rank::LOWEST);

    Ok(Worker::new(name, preferences))
}
