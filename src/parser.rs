use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Result, ScheduleError};
use crate::form::rank_column_header;
use crate::roster::{PreferenceTable, Rank, Roster, Worker};
use crate::schedule::{Day, Shift, Slot, DAY_COUNT, SHIFT_COUNT};

/// Column positions found in the header row
struct Columns {
    name: usize,
    ranks: Vec<(Slot, usize)>,
}

/// Reads a rank column header such as "Monday Morning" or "MONDAY - morning".
/// Word order and casing do not matter.
fn parse_slot_header(header: &str) -> Option<Slot> {
    let words = || {
        header
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
    };
    let day = words().find_map(Day::parse)?;
    let shift = words().find_map(Shift::parse)?;
    Some(Slot::new(day, shift))
}

fn find_columns(headers: &StringRecord) -> Result<Columns> {
    let name = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("name"))
        .or_else(|| headers.iter().position(|h| h.to_lowercase().contains("name")))
        .ok_or_else(|| ScheduleError::MissingColumn("Name".to_string()))?;

    let slots: Vec<Option<Slot>> = headers.iter().map(parse_slot_header).collect();
    let mut ranks = Vec::with_capacity(DAY_COUNT * SHIFT_COUNT);
    for slot in Slot::all() {
        let column = slots
            .iter()
            .position(|parsed| *parsed == Some(slot))
            .ok_or_else(|| ScheduleError::MissingColumn(rank_column_header(slot)))?;
        ranks.push((slot, column));
    }

    Ok(Columns { name, ranks })
}

/// Parses a rank cell; blank cells fall back to the lowest preference
fn parse_rank(value: &str) -> Result<Rank> {
    if value.trim().is_empty() {
        Ok(Rank::LOWEST)
    } else {
        value.parse()
    }
}

fn parse_record(record: &StringRecord, columns: &Columns) -> Result<Option<Worker>> {
    let name = record.get(columns.name).unwrap_or("").trim();
    if name.is_empty() {
        return Ok(None);
    }

    let mut preferences = PreferenceTable::new();
    for &(slot, column) in &columns.ranks {
        let rank = parse_rank(record.get(column).unwrap_or(""))?;
        preferences.set(slot.day, slot.shift, rank);
    }

    Ok(Some(Worker::new(name, preferences)))
}

/// Reads a roster from CSV.
///
/// The header row locates a `Name` column and one rank column per slot
/// (e.g. `Monday Morning`), in any order and any casing. Rows without a name
/// are skipped. Errors in a data row are reported with its line number.
pub fn read_roster<R: Read>(reader: R) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = find_columns(&headers)?;

    let mut roster = Roster::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let parsed = parse_record(&record, &columns).and_then(|worker| match worker {
            Some(worker) => roster.add_worker(worker),
            None => {
                debug!(row, "skipping roster row without a name");
                Ok(())
            }
        });
        parsed.map_err(|source| ScheduleError::InvalidRow {
            row,
            source: Box::new(source),
        })?;
    }

    Ok(roster)
}

/// Loads a roster from a CSV file
pub fn load_roster<P: AsRef<Path>>(csv_path: P) -> Result<Roster> {
    let path = csv_path.as_ref();
    let file = std::fs::File::open(path)?;
    let roster = read_roster(file)?;
    info!(path = %path.display(), workers = roster.len(), "roster loaded");
    Ok(roster)
}
