pub mod submission;
pub mod export;

pub use submission::{validate_submission, PreferenceEntry, WorkerSubmission};
pub use export::{export_roster_to_csv, rank_column_header, write_roster_csv};
