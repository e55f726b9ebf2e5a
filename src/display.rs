use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::schedule::{Day, Shift, Slot, WeekSchedule};

/// Joins the names in a slot for display and export
pub fn format_workers(names: &[String]) -> String {
    names.join(", ")
}

/// Renders the schedule as text, one block per day
pub fn render_schedule(schedule: &WeekSchedule) -> String {
    let width = Shift::ALL.iter().map(|s| s.name().len()).max().unwrap_or(0);
    let mut out = String::new();

    for day in Day::ALL {
        let _ = writeln!(out, "{}", day);
        for shift in Shift::ALL {
            let names = schedule.assignments.get(Slot::new(day, shift));
            let cell = if names.is_empty() {
                "[EMPTY]".to_string()
            } else {
                format_workers(names)
            };
            let _ = writeln!(out, "  {:<width$}  {}", shift.name(), cell, width = width);
        }
    }

    out
}

/// Advisory shown when some workers could not be fully scheduled.
/// Names are listed alphabetically.
pub fn unresolved_advisory(schedule: &WeekSchedule) -> Option<String> {
    if schedule.is_fully_resolved() {
        return None;
    }
    let mut names = schedule.unresolved.clone();
    names.sort();
    Some(format!(
        "The following employees could not be fully scheduled: {}. \
         Consider adjusting their preferences, adding more employees, or raising the weekly limit.",
        names.join(", ")
    ))
}

/// Prints the schedule and any advisory to stdout
pub fn print_schedule(title: &str, schedule: &WeekSchedule) {
    println!("\n=== {} ===", title);
    println!("Total assignments: {}", schedule.assignments.total());
    print!("{}", render_schedule(schedule));
    if let Some(advisory) = unresolved_advisory(schedule) {
        println!("\n⚠️  {}", advisory);
    }
}

/// Writes the text rendering to a file, headed with the generation time
pub fn write_schedule_to_file(title: &str, schedule: &WeekSchedule, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "** {} **", title)?;
    writeln!(file, "Generated {}", chrono::Local::now().format("%Y-%m-%d %H:%M"))?;
    writeln!(file)?;
    write!(file, "{}", render_schedule(schedule))?;
    if let Some(advisory) = unresolved_advisory(schedule) {
        writeln!(file)?;
        writeln!(file, "{}", advisory)?;
    }
    Ok(())
}

/// Writes `Day,Shift,Employees` rows in fixed day-then-shift order
pub fn write_schedule_csv<W: Write>(schedule: &WeekSchedule, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Day", "Shift", "Employees"])?;
    for (slot, names) in schedule.assignments.iter() {
        let workers = format_workers(names);
        wtr.write_record([slot.day.name(), slot.shift.name(), workers.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the schedule as CSV to `path`
pub fn export_schedule_to_csv(schedule: &WeekSchedule, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_schedule_csv(schedule, file)
}
