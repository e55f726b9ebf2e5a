use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::schedule::types::{Day, Shift, Slot, DAY_COUNT, SHIFT_COUNT};

/// Preference for a slot, 1 (most preferred) to 3 (least preferred)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const HIGHEST: Rank = Rank(1);
    pub const LOWEST: Rank = Rank(3);

    pub fn new(value: u8) -> Result<Self, ScheduleError> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&value) {
            Ok(Rank(value))
        } else {
            Err(ScheduleError::InvalidRank(value.to_string()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rank {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl FromStr for Rank {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| ScheduleError::InvalidRank(trimmed.to_string()))
            .and_then(Rank::new)
    }
}

/// Rank per (day, shift). Entries stay `None` until the editor sets them;
/// the engine refuses to run on an incomplete table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceTable {
    ranks: [[Option<Rank>; SHIFT_COUNT]; DAY_COUNT],
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the same rank in every slot
    pub fn uniform(rank: Rank) -> Self {
        Self {
            ranks: [[Some(rank); SHIFT_COUNT]; DAY_COUNT],
        }
    }

    pub fn get(&self, day: Day, shift: Shift) -> Option<Rank> {
        self.ranks[day.index()][shift.index()]
    }

    pub fn set(&mut self, day: Day, shift: Shift, rank: Rank) {
        self.ranks[day.index()][shift.index()] = Some(rank);
    }

    pub fn with(mut self, day: Day, shift: Shift, rank: Rank) -> Self {
        self.set(day, shift, rank);
        self
    }

    pub fn clear(&mut self, day: Day, shift: Shift) {
        self.ranks[day.index()][shift.index()] = None;
    }

    /// First slot without a rank, in day-then-shift order
    pub fn first_missing(&self) -> Option<Slot> {
        Slot::all().find(|slot| self.get(slot.day, slot.shift).is_none())
    }

    pub fn is_complete(&self) -> bool {
        self.first_missing().is_none()
    }

    /// Sets every unset entry to `rank`, leaving explicit entries alone
    pub fn fill_missing(&mut self, rank: Rank) {
        for row in self.ranks.iter_mut() {
            for entry in row.iter_mut() {
                entry.get_or_insert(rank);
            }
        }
    }

    /// Set entries in day-then-shift order
    pub fn entries(&self) -> impl Iterator<Item = (Slot, Rank)> + '_ {
        Slot::all().filter_map(move |slot| self.get(slot.day, slot.shift).map(|rank| (slot, rank)))
    }
}

/// A worker on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub preferences: PreferenceTable,
}

impl Worker {
    pub fn new(name: impl Into<String>, preferences: PreferenceTable) -> Self {
        Self {
            name: name.into(),
            preferences,
        }
    }

    /// Case-insensitive name comparison used for roster uniqueness
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
