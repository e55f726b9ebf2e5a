use std::fmt;

use serde::{Deserialize, Serialize};

pub const DAY_COUNT: usize = 7;
pub const SHIFT_COUNT: usize = 3;

/// Calendar day of the weekly grid. Cyclic: the day after Sunday is Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; DAY_COUNT] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next calendar day, wrapping Sunday to Monday
    pub fn next(self) -> Day {
        Self::ALL[(self.index() + 1) % DAY_COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Case-insensitive lookup by English name
    pub fn parse(name: &str) -> Option<Day> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shift category within a day. Order is only used for display and as the
/// tie-break between equally ranked shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const ALL: [Shift; SHIFT_COUNT] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }

    pub fn parse(name: &str) -> Option<Shift> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One (day, shift) cell of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub shift: Shift,
}

impl Slot {
    pub fn new(day: Day, shift: Shift) -> Self {
        Self { day, shift }
    }

    /// All 21 slots in day-then-shift order
    pub fn all() -> impl Iterator<Item = Slot> {
        Day::ALL
            .into_iter()
            .flat_map(|day| Shift::ALL.into_iter().map(move |shift| Slot::new(day, shift)))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.shift)
    }
}

/// Fixed 7 x 3 grid holding an ordered list per slot (order = assignment order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: [[Vec<T>; SHIFT_COUNT]; DAY_COUNT],
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Grid<T> {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| Vec::new())),
        }
    }

    pub fn get(&self, slot: Slot) -> &[T] {
        &self.cells[slot.day.index()][slot.shift.index()]
    }

    pub fn len(&self, slot: Slot) -> usize {
        self.get(slot).len()
    }

    pub fn push(&mut self, slot: Slot, value: T) {
        self.cells[slot.day.index()][slot.shift.index()].push(value);
    }

    /// Slots with their contents in fixed day-then-shift order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[T])> + '_ {
        Slot::all().map(move |slot| (slot, self.get(slot)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        let mut mapped = Grid::new();
        for (slot, values) in self.iter() {
            for value in values {
                mapped.push(slot, f(value));
            }
        }
        mapped
    }
}

/// Result of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub assignments: Grid<String>, // slot -> worker names
    pub unresolved: Vec<String>,   // workers the backfill pass gave up on
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekSchedule {
    pub fn empty() -> Self {
        Self {
            assignments: Grid::new(),
            unresolved: Vec::new(),
        }
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Slots held by a worker, in day-then-shift order
    pub fn slots_for(&self, name: &str) -> Vec<Slot> {
        self.assignments
            .iter()
            .filter(|(_, names)| names.iter().any(|n| n == name))
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn workload(&self, name: &str) -> usize {
        self.slots_for(name).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_wraps() {
        assert_eq!(Day::Monday.next(), Day::Tuesday);
        assert_eq!(Day::Sunday.next(), Day::Monday);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Day::parse(" wednesday "), Some(Day::Wednesday));
        assert_eq!(Shift::parse("EVENING"), Some(Shift::Evening));
        assert_eq!(Day::parse("Funday"), None);
    }

    #[test]
    fn test_slot_enumeration_order() {
        let slots: Vec<Slot> = Slot::all().collect();
        assert_eq!(slots.len(), DAY_COUNT * SHIFT_COUNT);
        assert_eq!(slots[0], Slot::new(Day::Monday, Shift::Morning));
        assert_eq!(slots[2], Slot::new(Day::Monday, Shift::Evening));
        assert_eq!(slots[3], Slot::new(Day::Tuesday, Shift::Morning));
        assert_eq!(slots[20], Slot::new(Day::Sunday, Shift::Evening));
    }

    #[test]
    fn test_grid_keeps_insertion_order() {
        let slot = Slot::new(Day::Friday, Shift::Afternoon);
        let mut grid = Grid::new();
        grid.push(slot, "b");
        grid.push(slot, "a");
        assert_eq!(grid.get(slot), &["b", "a"]);
        assert_eq!(grid.total(), 2);
        assert!(grid.get(Slot::new(Day::Friday, Shift::Morning)).is_empty());
    }

    #[test]
    fn test_grid_map() {
        let slot = Slot::new(Day::Monday, Shift::Morning);
        let mut grid = Grid::new();
        grid.push(slot, 1usize);
        let names = ["zero", "one"];
        let mapped = grid.map(|&i| names[i].to_string());
        assert_eq!(mapped.get(slot), &["one".to_string()]);
    }

    #[test]
    fn test_schedule_slots_for() {
        let mut schedule = WeekSchedule::empty();
        schedule
            .assignments
            .push(Slot::new(Day::Tuesday, Shift::Evening), "Ann".to_string());
        schedule
            .assignments
            .push(Slot::new(Day::Monday, Shift::Morning), "Ann".to_string());
        assert_eq!(
            schedule.slots_for("Ann"),
            vec![
                Slot::new(Day::Monday, Shift::Morning),
                Slot::new(Day::Tuesday, Shift::Evening)
            ]
        );
        assert_eq!(schedule.workload("Bob"), 0);
    }
}
