//! Invariant checks for a finished schedule.
//!
//! Independent of the engine's own bookkeeping, so any `WeekSchedule`
//! (generated, deserialized or hand-built) can be checked against a roster:
//! - no slot holds more than the configured capacity
//! - no worker holds more than the weekly cap
//! - no worker holds two slots on the same day
//! - every name in the grid belongs to the roster

use std::collections::HashMap;

use crate::config::SchedulerConfig;
use crate::roster::Worker;
use crate::schedule::{Day, WeekSchedule};

/// An invariant violation found in a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A slot holds more workers than its capacity.
    OverCapacity,
    /// A worker holds more slots than the weekly cap.
    OverWorkload,
    /// A worker holds more than one slot on a day.
    DoubleBooked,
    /// The grid names a worker that is not on the roster.
    UnknownWorker,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks `schedule` against the roster and limits.
///
/// # Returns
/// `Ok(())` if every invariant holds, `Err(violations)` with all issues found.
pub fn verify_schedule(
    schedule: &WeekSchedule,
    workers: &[Worker],
    config: &SchedulerConfig,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let mut workload: HashMap<&str, u32> = HashMap::new();
    let mut days_worked: HashMap<(&str, Day), usize> = HashMap::new();

    for (slot, names) in schedule.assignments.iter() {
        if names.len() > config.capacity {
            violations.push(Violation::new(
                ViolationKind::OverCapacity,
                format!("{} holds {} workers (capacity {})", slot, names.len(), config.capacity),
            ));
        }

        for name in names {
            if !workers.iter().any(|w| w.name == *name) {
                violations.push(Violation::new(
                    ViolationKind::UnknownWorker,
                    format!("{} names unknown worker '{}'", slot, name),
                ));
            }
            *workload.entry(name.as_str()).or_insert(0) += 1;
            *days_worked.entry((name.as_str(), slot.day)).or_insert(0) += 1;
        }
    }

    let mut over_cap: Vec<(&str, u32)> = workload
        .into_iter()
        .filter(|&(_, count)| count > config.max_shifts_per_worker)
        .collect();
    over_cap.sort();
    for (name, count) in over_cap {
        violations.push(Violation::new(
            ViolationKind::OverWorkload,
            format!(
                "'{}' holds {} slots (limit {})",
                name, count, config.max_shifts_per_worker
            ),
        ));
    }

    let mut double_booked: Vec<((&str, Day), usize)> = days_worked
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .collect();
    double_booked.sort();
    for ((name, day), count) in double_booked {
        violations.push(Violation::new(
            ViolationKind::DoubleBooked,
            format!("'{}' holds {} slots on {}", name, count, day),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
