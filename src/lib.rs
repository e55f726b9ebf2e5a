//! Weekly shift assignment.
//!
//! Workers rank every (day, shift) slot of the week from 1 (most preferred)
//! to 3. [`generate_schedule`] fills the week in three passes: ranked
//! first choices, backfill for workers still under their weekly cap, then a
//! random fill of the remaining open places.

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod parser;
pub mod roster;
pub mod schedule;
pub mod validation;
pub mod web;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use roster::{PreferenceTable, Rank, Roster, Session, Worker};
pub use schedule::{generate_schedule, run_deterministic_passes, Day, Shift, Slot, WeekSchedule};
