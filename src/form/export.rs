use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::roster::Roster;
use crate::schedule::Slot;

/// Column header for a slot's rank, e.g. "Monday Morning"
pub fn rank_column_header(slot: Slot) -> String {
    format!("{} {}", slot.day, slot.shift)
}

/// Writes the roster in the layout `parser::read_roster` reads: a `Name`
/// column followed by one rank column per slot in day-then-shift order.
/// Unset ranks are written as blank cells.
pub fn write_roster_csv<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["Name".to_string()];
    header.extend(Slot::all().map(rank_column_header));
    wtr.write_record(&header)?;

    for worker in roster.workers() {
        let mut record = vec![worker.name.clone()];
        record.extend(Slot::all().map(|slot| {
            worker
                .preferences
                .get(slot.day, slot.shift)
                .map(|rank| rank.value().to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Saves the roster to `csv_path`, replacing any existing file
pub fn export_roster_to_csv(roster: &Roster, csv_path: &Path) -> Result<()> {
    let file = File::create(csv_path)?;
    write_roster_csv(roster, file)
}
