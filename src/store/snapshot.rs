//! Persisted snapshot document.

use serde::{Deserialize, Serialize, de};
use serde_json::Value;

use crate::models::{AttendanceEntry, Employee};

/// The complete persisted state: `{ "employees": [...], "entries": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub entries: Vec<AttendanceEntry>,
}

/// Outcome of reading the stored document.
#[derive(Debug)]
pub enum SnapshotLoadResult {
    /// Document parsed.
    Loaded(Snapshot),
    /// Nothing stored yet (first run).
    Missing,
    /// Document present but unparseable.
    Corrupt(serde_json::Error),
}

impl SnapshotLoadResult {
    /// Classify raw storage contents.
    ///
    /// Only a JSON object is a snapshot. Derived structs would also accept an
    /// array, so the top level is checked before decoding.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return SnapshotLoadResult::Missing;
        };

        match parse_document(raw) {
            Ok(snapshot) => SnapshotLoadResult::Loaded(snapshot),
            Err(e) => SnapshotLoadResult::Corrupt(e),
        }
    }
}

fn parse_document(raw: &str) -> serde_json::Result<Snapshot> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(de::Error::custom("snapshot must be a JSON object"));
    }
    serde_json::from_value(value)
}

impl Snapshot {
    /// The three placeholder employees written on first run.
    pub fn seeded() -> Self {
        let employees = [("1", "One"), ("2", "Two"), ("3", "Three")]
            .into_iter()
            .map(|(id, last_name)| Employee {
                id: id.to_string(),
                first_name: "Employee".to_string(),
                last_name: last_name.to_string(),
            })
            .collect();

        Self {
            employees,
            entries: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_corrupt() {
        assert!(matches!(SnapshotLoadResult::from_raw(None), SnapshotLoadResult::Missing));
        assert!(matches!(
            SnapshotLoadResult::from_raw(Some("{not json")),
            SnapshotLoadResult::Corrupt(_)
        ));
        assert!(matches!(
            SnapshotLoadResult::from_raw(Some("[]")),
            SnapshotLoadResult::Corrupt(_)
        ));
    }

    #[test]
    fn test_non_object_documents_are_corrupt() {
        for raw in [r#"[[], []]"#, "null", "42", r#""employees""#] {
            assert!(
                matches!(SnapshotLoadResult::from_raw(Some(raw)), SnapshotLoadResult::Corrupt(_)),
                "{raw} should be corrupt"
            );
        }
    }

    #[test]
    fn test_missing_keys_read_as_empty() {
        match SnapshotLoadResult::from_raw(Some("{}")) {
            SnapshotLoadResult::Loaded(snapshot) => assert_eq!(snapshot, Snapshot::default()),
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_parses_documented_layout() {
        let raw = r#"{
            "employees": [{"id": "1", "firstName": "Employee", "lastName": "One"}],
            "entries": [{"id": "x", "employeeId": "1", "date": "2024-01-10", "type": "VACATION"}]
        }"#;
        let SnapshotLoadResult::Loaded(snapshot) = SnapshotLoadResult::from_raw(Some(raw)) else {
            panic!("expected a loaded snapshot");
        };
        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.entries[0].employee_id, "1");
    }

    #[test]
    fn test_seeded_names() {
        let seeded = Snapshot::seeded();
        let names: Vec<_> = seeded.employees.iter().map(Employee::display_name).collect();
        assert_eq!(names, ["Employee One", "Employee Two", "Employee Three"]);
        assert!(seeded.entries.is_empty());
    }
}
