use crate::config::SchedulerConfig;
use crate::roster::Worker;

use super::types::{Day, Grid, Shift, Slot, WeekSchedule};

/// Working state of one generation run.
///
/// Workers are referenced by roster index. `assign` is the only mutation and
/// keeps the grid, workload counter and per-worker day mask in step, so the
/// single-shift-per-day check is a bit test instead of a grid scan.
#[derive(Debug, Clone)]
pub struct AssignmentState {
    grid: Grid<usize>,
    workload: Vec<u32>,
    day_mask: Vec<u8>,
    unresolved: Vec<usize>,
    capacity: usize,
    max_shifts: u32,
}

impl AssignmentState {
    pub fn new(worker_count: usize, config: &SchedulerConfig) -> Self {
        Self {
            grid: Grid::new(),
            workload: vec![0; worker_count],
            day_mask: vec![0; worker_count],
            unresolved: Vec::new(),
            capacity: config.capacity,
            max_shifts: config.max_shifts_per_worker,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workload.len()
    }

    pub fn grid(&self) -> &Grid<usize> {
        &self.grid
    }

    pub fn has_capacity(&self, slot: Slot) -> bool {
        self.grid.len(slot) < self.capacity
    }

    pub fn workload(&self, worker: usize) -> u32 {
        self.workload[worker]
    }

    /// Worker has reached the weekly cap
    pub fn is_exhausted(&self, worker: usize) -> bool {
        self.workload[worker] >= self.max_shifts
    }

    /// Worker holds any slot on `day`
    pub fn works_on(&self, worker: usize, day: Day) -> bool {
        self.day_mask[worker] & day_bit(day) != 0
    }

    /// Days without an assignment for the worker, in calendar order
    pub fn open_days(&self, worker: usize) -> Vec<Day> {
        Day::ALL
            .into_iter()
            .filter(|&day| !self.works_on(worker, day))
            .collect()
    }

    pub fn assign(&mut self, worker: usize, slot: Slot) {
        debug_assert!(self.has_capacity(slot), "{slot} is full");
        debug_assert!(!self.is_exhausted(worker), "worker {worker} is at the cap");
        debug_assert!(
            !self.works_on(worker, slot.day),
            "worker {worker} already works on {}",
            slot.day
        );
        self.grid.push(slot, worker);
        self.workload[worker] += 1;
        self.day_mask[worker] |= day_bit(slot.day);
    }

    /// Places the worker on `day` in the first of `shifts` with free capacity
    pub fn try_place(&mut self, worker: usize, day: Day, shifts: &[Shift]) -> Option<Shift> {
        let shift = shifts
            .iter()
            .copied()
            .find(|&shift| self.has_capacity(Slot::new(day, shift)))?;
        self.assign(worker, Slot::new(day, shift));
        Some(shift)
    }

    pub fn mark_unresolved(&mut self, worker: usize) {
        if !self.is_unresolved(worker) {
            self.unresolved.push(worker);
        }
    }

    pub fn is_unresolved(&self, worker: usize) -> bool {
        self.unresolved.contains(&worker)
    }

    /// Unresolved workers in the order they were marked
    pub fn unresolved(&self) -> &[usize] {
        &self.unresolved
    }

    /// Capacity, workload and one-slot-per-day invariants, recomputed from the grid
    pub fn invariants_hold(&self) -> bool {
        let mut workload = vec![0u32; self.worker_count()];
        let mut day_mask = vec![0u8; self.worker_count()];
        for (slot, workers) in self.grid.iter() {
            if workers.len() > self.capacity {
                return false;
            }
            for &worker in workers {
                if worker >= self.worker_count() || day_mask[worker] & day_bit(slot.day) != 0 {
                    return false;
                }
                day_mask[worker] |= day_bit(slot.day);
                workload[worker] += 1;
            }
        }
        workload == self.workload
            && day_mask == self.day_mask
            && workload.iter().all(|&count| count <= self.max_shifts)
    }

    pub fn into_schedule(self, workers: &[Worker]) -> WeekSchedule {
        WeekSchedule {
            assignments: self.grid.map(|&w| workers[w].name.clone()),
            unresolved: self
                .unresolved
                .iter()
                .map(|&w| workers[w].name.clone())
                .collect(),
        }
    }
}

fn day_bit(day: Day) -> u8 {
    1 << day.index()
}
