pub mod types;
pub mod slot_utils;
pub mod state;
pub mod priority;
pub mod backfill;
pub mod random_fill;
pub mod engine;

pub use types::{Day, Grid, Shift, Slot, WeekSchedule, DAY_COUNT, SHIFT_COUNT};
pub use slot_utils::RankTable;
pub use state::AssignmentState;
pub use engine::{generate_schedule, run_deterministic_passes};
