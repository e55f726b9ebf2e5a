use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use shift_scheduler::display::export_schedule_to_csv;
use shift_scheduler::form::export_roster_to_csv;
use shift_scheduler::parser::load_roster;
use shift_scheduler::{generate_schedule, Day, PreferenceTable, Rank, Roster, SchedulerConfig, Shift, Worker};

fn sample_roster() -> Roster {
    let two = Rank::new(2).unwrap();
    Roster::from_workers([
        Worker::new(
            "Ann",
            PreferenceTable::uniform(Rank::LOWEST).with(Day::Monday, Shift::Morning, Rank::HIGHEST),
        ),
        Worker::new("Bob", PreferenceTable::uniform(two).with(Day::Sunday, Shift::Evening, Rank::HIGHEST)),
        Worker::new("Cy, Jr.", PreferenceTable::uniform(Rank::HIGHEST)),
    ])
    .unwrap()
}

#[test]
fn test_saved_roster_loads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let roster = sample_roster();

    export_roster_to_csv(&roster, &path).unwrap();
    let loaded = load_roster(&path).unwrap();

    assert_eq!(loaded, roster);
}

#[test]
fn test_unset_ranks_load_as_lowest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let mut prefs = PreferenceTable::uniform(Rank::HIGHEST);
    prefs.clear(Day::Wednesday, Shift::Afternoon);
    let roster = Roster::from_workers([Worker::new("Dee", prefs)]).unwrap();

    export_roster_to_csv(&roster, &path).unwrap();
    let loaded = load_roster(&path).unwrap();

    let prefs = &loaded.workers()[0].preferences;
    assert!(prefs.is_complete());
    assert_eq!(prefs.get(Day::Wednesday, Shift::Afternoon), Some(Rank::LOWEST));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_roster(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, shift_scheduler::ScheduleError::Io(_)));
}

#[test]
fn test_schedule_export_from_loaded_roster() {
    let dir = tempfile::tempdir().unwrap();
    let roster_path = dir.path().join("roster.csv");
    let schedule_path = dir.path().join("schedule.csv");

    export_roster_to_csv(&sample_roster(), &roster_path).unwrap();
    let roster = load_roster(&roster_path).unwrap();
    let schedule =
        generate_schedule(roster.workers(), &SchedulerConfig::default(), &mut StdRng::seed_from_u64(8))
            .unwrap();
    export_schedule_to_csv(&schedule, &schedule_path).unwrap();

    let text = fs::read_to_string(&schedule_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 22);
    assert_eq!(lines[0], "Day,Shift,Employees");
    assert!(lines[1].starts_with("Monday,Morning,"));
    assert!(lines[1].contains("Ann"));
}
