use thiserror::Error;

use crate::schedule::types::{Day, Shift};

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Worker '{worker}' has no rank for {day} {shift}")]
    MissingRank {
        worker: String,
        day: Day,
        shift: Shift,
    },

    #[error("Invalid rank '{0}': must be 1, 2 or 3")]
    InvalidRank(String),

    #[error("Worker name is required")]
    EmptyName,

    #[error("Worker name {0:?} contains control characters")]
    InvalidName(String),

    #[error("Worker '{0}' already exists")]
    DuplicateWorker(String),

    #[error("Worker not found: {0}")]
    UnknownWorker(String),

    #[error("Missing column in roster CSV: {0}")]
    MissingColumn(String),

    #[error("Roster CSV row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: Box<ScheduleError>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
