//! Unit tests for the attendance store.

use chrono::NaiveDate;

use super::{AttendanceStore, FileStorage, MemoryStorage, Snapshot, SnapshotStorage, StartupState};
use crate::error::AppError;
use crate::models::{DayType, Employee};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Store over empty (but present) data, so nothing is seeded.
fn empty_store() -> (AttendanceStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::with_contents(r#"{"employees":[],"entries":[]}"#);
    let store = AttendanceStore::open(storage.clone()).unwrap();
    (store, storage)
}

fn reopen(storage: &MemoryStorage) -> AttendanceStore<MemoryStorage> {
    AttendanceStore::open(storage.clone()).unwrap()
}

#[test]
fn test_first_run_seeds_placeholders() {
    let storage = MemoryStorage::new();
    let store = AttendanceStore::open(storage.clone()).unwrap();

    assert_eq!(store.startup_state(), StartupState::Seeded);
    let names: Vec<_> = store.employees().iter().map(Employee::display_name).collect();
    assert_eq!(names, ["Employee One", "Employee Two", "Employee Three"]);
    assert_eq!(store.entry_count(), 0);

    // Seed is written so the next start restores it
    assert_eq!(storage.write_count(), 1);
    assert_eq!(reopen(&storage).startup_state(), StartupState::Restored);
}

#[test]
fn test_corrupt_snapshot_starts_empty_without_overwriting() {
    let storage = MemoryStorage::with_contents("{\"employees\": [");
    let store = AttendanceStore::open(storage.clone()).unwrap();

    assert_eq!(store.startup_state(), StartupState::RecoveredFromCorrupt);
    assert!(store.employees().is_empty());
    assert_eq!(store.entry_count(), 0);
    assert_eq!(storage.write_count(), 0);
    assert_eq!(storage.contents().as_deref(), Some("{\"employees\": ["));
}

#[test]
fn test_array_snapshot_is_recovered_as_corrupt() {
    let storage = MemoryStorage::with_contents("[]");
    let store = AttendanceStore::open(storage.clone()).unwrap();

    assert_eq!(store.startup_state(), StartupState::RecoveredFromCorrupt);
    assert!(store.employees().is_empty());
    assert_eq!(storage.write_count(), 0);
    assert_eq!(storage.contents().as_deref(), Some("[]"));
}

#[test]
fn test_failed_seed_write_is_reported() {
    let storage = MemoryStorage::new();
    storage.set_fail_writes(true);
    let mut store = AttendanceStore::open(storage.clone()).unwrap();

    assert_eq!(store.startup_state(), StartupState::SeededUnsaved);
    assert_eq!(store.employees().len(), 3);
    assert_eq!(storage.contents(), None);

    // The next successful write carries the seed along
    storage.set_fail_writes(false);
    store.set_day_status("1", date(2024, 1, 2), Some(DayType::Sick)).unwrap();
    let reopened = reopen(&storage);
    assert_eq!(reopened.startup_state(), StartupState::Restored);
    assert_eq!(reopened.employees().len(), 3);
    assert_eq!(reopened.get_day_status("1", date(2024, 1, 2)), Some(DayType::Sick));
}

#[test]
fn test_ann_lee_scenario() {
    let (mut store, _) = empty_store();

    let ann = store.add_employee("Ann", "Lee").unwrap();
    assert!(!ann.id.is_empty());

    store.set_day_status(&ann.id, date(2024, 3, 5), Some(DayType::Working)).unwrap();
    assert_eq!(store.get_day_status(&ann.id, date(2024, 3, 5)), Some(DayType::Working));

    store.set_day_status(&ann.id, date(2024, 3, 5), None).unwrap();
    assert_eq!(store.get_day_status(&ann.id, date(2024, 3, 5)), None);
    assert_eq!(store.entry_count(), 0);
}

#[test]
fn test_replacing_status_keeps_single_entry() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Bo", "Ek").unwrap();
    let day = date(2024, 1, 10);

    store.set_day_status(&emp.id, day, Some(DayType::Vacation)).unwrap();
    let first_id = store.get_employee_entries(&emp.id)[0].id.clone();
    store.set_day_status(&emp.id, day, Some(DayType::Sick)).unwrap();

    let entries = store.get_employee_entries(&emp.id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day_type, DayType::Sick);
    assert_eq!(entries[0].date, day);
    assert_eq!(entries[0].id, first_id);
}

#[test]
fn test_set_day_status_last_value_wins() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Cy", "Do").unwrap();
    let day = date(2024, 6, 1);

    let sequences: [&[Option<DayType>]; 4] = [
        &[Some(DayType::Working), Some(DayType::Sick), Some(DayType::NonWorking)],
        &[Some(DayType::Working), None],
        &[None, None, Some(DayType::Vacation)],
        &[Some(DayType::Sick), None, Some(DayType::Sick), None],
    ];

    for sequence in sequences {
        for value in sequence {
            store.set_day_status(&emp.id, day, *value).unwrap();
        }
        let matching = store
            .entries()
            .filter(|e| e.employee_id == emp.id && e.date == day)
            .count();
        let last = *sequence.last().unwrap();
        assert_eq!(matching, usize::from(last.is_some()));
        assert_eq!(store.get_day_status(&emp.id, day), last);
    }
}

#[test]
fn test_set_day_status_is_idempotent() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Di", "Fa").unwrap();

    store.set_day_status(&emp.id, date(2024, 2, 2), Some(DayType::Working)).unwrap();
    let once = store.snapshot();
    store.set_day_status(&emp.id, date(2024, 2, 2), Some(DayType::Working)).unwrap();

    assert_eq!(store.snapshot(), once);
}

#[test]
fn test_set_day_status_unknown_employee_rejected() {
    let (mut store, storage) = empty_store();
    let writes = storage.write_count();

    let err = store
        .set_day_status("ghost", date(2024, 1, 1), Some(DayType::Working))
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(store.entry_count(), 0);
    assert_eq!(storage.write_count(), writes);
}

#[test]
fn test_delete_cascades_entries() {
    let (mut store, _) = empty_store();
    let keep = store.add_employee("Keep", "Me").unwrap();
    let gone = store.add_employee("Gone", "Soon").unwrap();

    for day in 1..=5 {
        store.set_day_status(&gone.id, date(2024, 4, day), Some(DayType::Working)).unwrap();
        store.set_day_status(&keep.id, date(2024, 4, day), Some(DayType::Sick)).unwrap();
    }

    store.delete_employee(&gone.id).unwrap();

    assert!(store.get_employee_entries(&gone.id).is_empty());
    assert!(store.entries().all(|e| e.employee_id != gone.id));
    assert_eq!(store.get_employee_entries(&keep.id).len(), 5);
    assert!(store.employee(&gone.id).is_none());
}

#[test]
fn test_delete_unknown_employee() {
    let (mut store, _) = empty_store();
    store.add_employee("Ed", "Gu").unwrap();

    assert!(matches!(store.delete_employee("nope"), Err(AppError::NotFound(_))));
    assert_eq!(store.employees().len(), 1);
}

#[test]
fn test_add_employee_trims_and_validates() {
    let (mut store, storage) = empty_store();

    let emp = store.add_employee("  Ann ", "\tLee\n").unwrap();
    assert_eq!(emp.first_name, "Ann");
    assert_eq!(emp.last_name, "Lee");

    let writes = storage.write_count();
    assert!(matches!(store.add_employee("   ", "Lee"), Err(AppError::Validation(_))));
    assert!(matches!(store.add_employee("Ann", ""), Err(AppError::Validation(_))));
    assert_eq!(store.employees().len(), 1);
    assert_eq!(storage.write_count(), writes);
}

#[test]
fn test_generated_ids_are_unique() {
    let (mut store, _) = empty_store();
    let a = store.add_employee("Same", "Name").unwrap();
    let b = store.add_employee("Same", "Name").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_update_employee() {
    let (mut store, _) = empty_store();
    let first = store.add_employee("Fi", "Go").unwrap();
    let second = store.add_employee("Ha", "Io").unwrap();

    store.update_employee(&first.id, " Fiona ", "Gold").unwrap();

    let updated = store.employee(&first.id).unwrap();
    assert_eq!(updated.display_name(), "Fiona Gold");
    assert_eq!(updated.id, first.id);
    // Order unchanged
    assert_eq!(store.employees()[0].id, first.id);
    assert_eq!(store.employees()[1].id, second.id);
}

#[test]
fn test_update_employee_rejections_leave_state() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Ja", "Ko").unwrap();

    assert!(matches!(
        store.update_employee("missing", "X", "Y"),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        store.update_employee(&emp.id, "", "Y"),
        Err(AppError::Validation(_))
    ));
    assert_eq!(store.employee(&emp.id).unwrap().display_name(), "Ja Ko");
}

#[test]
fn test_clear_entries_keeps_employee() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Li", "Mo").unwrap();
    store.set_day_status(&emp.id, date(2024, 5, 1), Some(DayType::Working)).unwrap();
    store.set_day_status(&emp.id, date(2024, 5, 2), Some(DayType::Sick)).unwrap();

    assert_eq!(store.clear_entries(&emp.id).unwrap(), 2);
    assert!(store.get_employee_entries(&emp.id).is_empty());
    assert!(store.employee(&emp.id).is_some());
    assert!(matches!(store.clear_entries("missing"), Err(AppError::NotFound(_))));
}

#[test]
fn test_employee_entries_ordered_by_date() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Ni", "Ol").unwrap();

    for day in [date(2024, 3, 9), date(2023, 12, 31), date(2024, 1, 1)] {
        store.set_day_status(&emp.id, day, Some(DayType::Working)).unwrap();
    }

    let dates: Vec<_> = store.get_employee_entries(&emp.id).iter().map(|e| e.date).collect();
    assert_eq!(dates, [date(2023, 12, 31), date(2024, 1, 1), date(2024, 3, 9)]);
}

#[test]
fn test_query_range_inclusive_and_per_employee() {
    let (mut store, _) = empty_store();
    let a = store.add_employee("Pa", "Qu").unwrap();
    let b = store.add_employee("Ra", "Sa").unwrap();

    store.set_day_status(&a.id, date(2024, 3, 1), Some(DayType::Working)).unwrap();
    store.set_day_status(&a.id, date(2024, 3, 15), Some(DayType::Vacation)).unwrap();
    store.set_day_status(&a.id, date(2024, 3, 31), Some(DayType::Sick)).unwrap();
    store.set_day_status(&a.id, date(2024, 4, 1), Some(DayType::Working)).unwrap();
    store.set_day_status(&b.id, date(2024, 3, 10), Some(DayType::Working)).unwrap();

    let march = store.query_range(&a.id, date(2024, 3, 1), date(2024, 3, 31));
    assert_eq!(march.working, 1);
    assert_eq!(march.vacation, 1);
    assert_eq!(march.sick, 1);
    assert_eq!(march.non_working, 0);

    let single_day = store.query_range(&a.id, date(2024, 4, 1), date(2024, 4, 1));
    assert_eq!(single_day.working, 1);

    let inverted = store.query_range(&a.id, date(2024, 4, 1), date(2024, 3, 1));
    assert_eq!(inverted.total(), 0);

    assert_eq!(store.query_range("ghost", date(2024, 1, 1), date(2024, 12, 31)).total(), 0);
}

#[test]
fn test_query_range_full_year_matches_entries() {
    let (mut store, _) = empty_store();
    let emp = store.add_employee("Ta", "Um").unwrap();
    let other = store.add_employee("Va", "Wo").unwrap();

    // Synthetic spread over three years, cycling through every type
    let mut day = date(2023, 11, 1);
    let mut i = 0usize;
    while day <= date(2025, 2, 28) {
        let day_type = DayType::ALL[i % DayType::ALL.len()];
        if i % 3 != 0 {
            store.set_day_status(&emp.id, day, Some(day_type)).unwrap();
        }
        store.set_day_status(&other.id, day, Some(DayType::Working)).unwrap();
        day = day.succ_opt().unwrap();
        i += 1;
    }

    let counts = store.query_range(&emp.id, date(2024, 1, 1), date(2024, 12, 31));
    for day_type in DayType::ALL {
        let expected = store
            .entries()
            .filter(|e| e.employee_id == emp.id && e.day_type == day_type)
            .filter(|e| e.date >= date(2024, 1, 1) && e.date <= date(2024, 12, 31))
            .count() as u32;
        assert_eq!(counts.get(day_type), expected, "{day_type:?}");
    }

    // Months of the year add up to the year
    let month_sum: u32 = (1..=12)
        .map(|m| {
            let (start, end) = crate::calendar::month_bounds(2024, m).unwrap();
            store.query_range(&emp.id, start, end).total()
        })
        .sum();
    assert_eq!(month_sum, counts.total());
}

#[test]
fn test_every_mutation_persists() {
    let (mut store, storage) = empty_store();
    let base = storage.write_count();

    let emp = store.add_employee("Xa", "Yo").unwrap();
    store.update_employee(&emp.id, "Xan", "Yo").unwrap();
    store.set_day_status(&emp.id, date(2024, 1, 1), Some(DayType::Working)).unwrap();
    store.set_day_status(&emp.id, date(2024, 1, 1), None).unwrap();
    store.delete_employee(&emp.id).unwrap();

    assert_eq!(storage.write_count(), base + 5);
}

#[test]
fn test_reload_sees_each_mutation() {
    let (mut store, storage) = empty_store();

    let emp = store.add_employee("Za", "Ab").unwrap();
    assert_eq!(reopen(&storage).employees().len(), 1);

    store.set_day_status(&emp.id, date(2024, 7, 4), Some(DayType::Vacation)).unwrap();
    assert_eq!(
        reopen(&storage).get_day_status(&emp.id, date(2024, 7, 4)),
        Some(DayType::Vacation)
    );

    store.delete_employee(&emp.id).unwrap();
    let reloaded = reopen(&storage);
    assert!(reloaded.employees().is_empty());
    assert_eq!(reloaded.entry_count(), 0);
}

#[test]
fn test_round_trip_preserves_employee_order_and_entries() {
    let (mut store, storage) = empty_store();
    let names = [("Zed", "Last"), ("Amy", "First"), ("Mid", "Dle")];
    let ids: Vec<_> = names
        .iter()
        .map(|(f, l)| store.add_employee(f, l).unwrap().id)
        .collect();
    store.set_day_status(&ids[2], date(2024, 8, 1), Some(DayType::NonWorking)).unwrap();
    store.set_day_status(&ids[0], date(2024, 8, 2), Some(DayType::Working)).unwrap();

    let reloaded = reopen(&storage);

    assert_eq!(reloaded.employees(), store.employees());
    let mut before: Vec<_> = store.entries().cloned().map(|e| (e.id.clone(), e)).collect();
    let mut after: Vec<_> = reloaded.entries().cloned().map(|e| (e.id.clone(), e)).collect();
    before.sort_by(|a, b| a.0.cmp(&b.0));
    after.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(before, after);
}

#[test]
fn test_write_failure_surfaces_but_keeps_memory_state() {
    let (mut store, storage) = empty_store();
    let emp = store.add_employee("Ba", "Ce").unwrap();
    storage.set_fail_writes(true);

    let err = store
        .set_day_status(&emp.id, date(2024, 9, 9), Some(DayType::Sick))
        .unwrap_err();

    assert!(matches!(err, AppError::Persist(_)));
    assert!(err.is_unsaved_change());
    assert_eq!(store.get_day_status(&emp.id, date(2024, 9, 9)), Some(DayType::Sick));

    // Persisted copy predates the failed write
    assert_eq!(reopen(&storage).get_day_status(&emp.id, date(2024, 9, 9)), None);

    // Next successful write carries the earlier change too
    storage.set_fail_writes(false);
    store.set_day_status(&emp.id, date(2024, 9, 10), Some(DayType::Working)).unwrap();
    let reloaded = reopen(&storage);
    assert_eq!(reloaded.get_day_status(&emp.id, date(2024, 9, 9)), Some(DayType::Sick));
    assert_eq!(reloaded.get_day_status(&emp.id, date(2024, 9, 10)), Some(DayType::Working));
}

#[test]
fn test_loading_repairs_broken_invariants() {
    let raw = r#"{
        "employees": [
            {"id": "1", "firstName": "A", "lastName": "One"},
            {"id": "1", "firstName": "B", "lastName": "Dup"},
            {"id": "2", "firstName": "C", "lastName": "Two"}
        ],
        "entries": [
            {"id": "e1", "employeeId": "1", "date": "2024-01-10", "type": "VACATION"},
            {"id": "e2", "employeeId": "1", "date": "2024-01-10", "type": "SICK"},
            {"id": "e3", "employeeId": "9", "date": "2024-01-11", "type": "WORKING"},
            {"id": "e4", "employeeId": "2", "date": "2024-01-12", "type": "WORKING"}
        ]
    }"#;
    let store = AttendanceStore::open(MemoryStorage::with_contents(raw)).unwrap();

    let names: Vec<_> = store.employees().iter().map(Employee::display_name).collect();
    assert_eq!(names, ["A One", "C Two"]);
    assert_eq!(store.entry_count(), 2);
    assert_eq!(store.get_day_status("1", date(2024, 1, 10)), Some(DayType::Sick));
    assert!(store.entries().all(|e| e.employee_id != "9"));
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("work_tracker_data_v1.json");

    let mut store = AttendanceStore::open(FileStorage::new(&path)).unwrap();
    assert_eq!(store.startup_state(), StartupState::Seeded);
    store.set_day_status("2", date(2024, 3, 5), Some(DayType::Working)).unwrap();
    drop(store);

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: Snapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.employees.len(), 3);
    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].employee_id, "2");

    let reopened = AttendanceStore::open(FileStorage::new(&path)).unwrap();
    assert_eq!(reopened.startup_state(), StartupState::Restored);
    assert_eq!(reopened.get_day_status("2", date(2024, 3, 5)), Some(DayType::Working));
}

#[test]
fn test_file_storage_read_error_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as a string
    let storage = FileStorage::new(dir.path());
    assert!(storage.load().is_err());
    assert!(matches!(AttendanceStore::open(storage), Err(AppError::Io(_))));
}
