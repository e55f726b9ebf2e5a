use serde::{Deserialize, Serialize};

/// Maximum workers a single slot holds unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 2;

/// Maximum slots a worker gets per week unless configured otherwise.
pub const DEFAULT_MAX_SHIFTS: u32 = 5;

/// Structural limits for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Workers allowed per (day, shift) slot.
    pub capacity: usize,
    /// Slots a single worker may hold across the week.
    pub max_shifts_per_worker: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_shifts_per_worker: DEFAULT_MAX_SHIFTS,
        }
    }
}

impl SchedulerConfig {
    pub fn new(capacity: usize, max_shifts_per_worker: u32) -> Self {
        Self {
            capacity,
            max_shifts_per_worker,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_shifts(mut self, max_shifts_per_worker: u32) -> Self {
        self.max_shifts_per_worker = max_shifts_per_worker;
        self
    }
}
