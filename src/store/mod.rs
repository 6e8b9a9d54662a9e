//! Attendance store: employees, per-day entries and their persisted snapshot.
//!
//! The store is the only owner of both collections. Every successful mutation
//! writes the full snapshot before returning; reads are served from memory.

mod snapshot;
mod storage;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{AttendanceEntry, DayCounts, DayType, Employee};

pub use snapshot::{Snapshot, SnapshotLoadResult};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};

/// Entries are keyed by `(employee_id, date)`, so a key holds at most one entry.
type EntryKey = (String, NaiveDate);

/// How the store was initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    /// Restored from an existing snapshot.
    Restored,
    /// No snapshot existed; placeholder employees were seeded.
    Seeded,
    /// Placeholder employees were seeded but could not be written.
    SeededUnsaved,
    /// Snapshot was unreadable; started empty.
    RecoveredFromCorrupt,
}

pub struct AttendanceStore<S: SnapshotStorage> {
    storage: S,
    employees: Vec<Employee>,
    entries: BTreeMap<EntryKey, AttendanceEntry>,
    startup: StartupState,
}

impl<S: SnapshotStorage> AttendanceStore<S> {
    /// Load the store from `storage`.
    ///
    /// A missing snapshot seeds the placeholder employees and writes them out;
    /// if that write fails the store opens as `SeededUnsaved`. A corrupt snapshot
    /// is logged and replaced by empty collections; the stored document stays as
    /// it is until the next mutation. Only a failure to read the storage itself
    /// is returned as an error.
    pub fn open(storage: S) -> Result<Self> {
        let raw = storage.load()?;

        let (snapshot, startup) = match SnapshotLoadResult::from_raw(raw.as_deref()) {
            SnapshotLoadResult::Loaded(snapshot) => {
                tracing::info!(
                    "Loaded {} employees and {} entries from {}",
                    snapshot.employees.len(),
                    snapshot.entries.len(),
                    storage.describe()
                );
                (snapshot, StartupState::Restored)
            }
            SnapshotLoadResult::Missing => {
                tracing::info!("No attendance data at {}, seeding defaults", storage.describe());
                (Snapshot::seeded(), StartupState::Seeded)
            }
            SnapshotLoadResult::Corrupt(e) => {
                tracing::error!("Failed to parse attendance data at {}: {}", storage.describe(), e);
                (Snapshot::default(), StartupState::RecoveredFromCorrupt)
            }
        };

        let mut store = Self::from_snapshot(storage, snapshot, startup);

        if startup == StartupState::Seeded && store.persist().is_err() {
            store.startup = StartupState::SeededUnsaved;
        }

        Ok(store)
    }

    /// Build a store from a parsed snapshot, repairing invariant violations.
    ///
    /// Duplicate employee ids keep the first occurrence, entries for unknown
    /// employees are dropped, and duplicate `(employee, date)` keys keep the
    /// last entry.
    fn from_snapshot(storage: S, snapshot: Snapshot, startup: StartupState) -> Self {
        let mut seen = HashSet::new();
        let mut employees = Vec::with_capacity(snapshot.employees.len());
        for employee in snapshot.employees {
            if seen.insert(employee.id.clone()) {
                employees.push(employee);
            } else {
                tracing::warn!("Dropping duplicate employee id {}", employee.id);
            }
        }

        let mut entries = BTreeMap::new();
        for entry in snapshot.entries {
            if !seen.contains(&entry.employee_id) {
                tracing::warn!(
                    "Dropping entry {} for unknown employee {}",
                    entry.id,
                    entry.employee_id
                );
                continue;
            }
            let key = (entry.employee_id.clone(), entry.date);
            if entries.insert(key, entry).is_some() {
                tracing::warn!("Duplicate entry key in snapshot, keeping the last one");
            }
        }

        Self {
            storage,
            employees,
            entries,
            startup,
        }
    }

    pub fn startup_state(&self) -> StartupState {
        self.startup
    }

    /// Employees in display (insertion) order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// All entries, ordered by employee id then date.
    pub fn entries(&self) -> impl Iterator<Item = &AttendanceEntry> {
        self.entries.values()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Add an employee with trimmed, non-empty names.
    pub fn add_employee(&mut self, first_name: &str, last_name: &str) -> Result<Employee> {
        let first_name = clean_name(first_name, "First name")?;
        let last_name = clean_name(last_name, "Last name")?;

        let employee = Employee {
            id: new_id(),
            first_name,
            last_name,
        };
        tracing::debug!("Adding employee {} ({})", employee.display_name(), employee.id);
        self.employees.push(employee.clone());

        self.persist()?;
        Ok(employee)
    }

    /// Replace the name fields of an existing employee.
    pub fn update_employee(&mut self, id: &str, first_name: &str, last_name: &str) -> Result<()> {
        let first_name = clean_name(first_name, "First name")?;
        let last_name = clean_name(last_name, "Last name")?;

        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("employee {id}")))?;

        employee.first_name = first_name;
        employee.last_name = last_name;
        tracing::debug!("Updated employee {}", id);

        self.persist()
    }

    /// Remove an employee together with all of its entries.
    pub fn delete_employee(&mut self, id: &str) -> Result<()> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("employee {id}")))?;

        self.employees.remove(index);
        let removed = self.remove_entries_of(id);
        tracing::debug!("Deleted employee {} and {} entries", id, removed);

        self.persist()
    }

    /// Remove every entry of one employee, keeping the employee.
    pub fn clear_entries(&mut self, employee_id: &str) -> Result<usize> {
        self.require_employee(employee_id)?;

        let removed = self.remove_entries_of(employee_id);
        tracing::debug!("Cleared {} entries for employee {}", removed, employee_id);

        self.persist()?;
        Ok(removed)
    }

    /// Set or clear the status of one employee on one day.
    ///
    /// `Some` creates the entry or replaces its type (the entry id is kept);
    /// `None` removes it. Applying the same value twice is a no-op the second time.
    pub fn set_day_status(&mut self, employee_id: &str, date: NaiveDate, day_type: Option<DayType>) -> Result<()> {
        self.require_employee(employee_id)?;

        let key = (employee_id.to_string(), date);
        match day_type {
            Some(day_type) => {
                self.entries
                    .entry(key)
                    .and_modify(|entry| entry.day_type = day_type)
                    .or_insert_with(|| AttendanceEntry {
                        id: new_id(),
                        employee_id: employee_id.to_string(),
                        date,
                        day_type,
                    });
            }
            None => {
                self.entries.remove(&key);
            }
        }
        tracing::debug!("Set {} on {} to {:?}", employee_id, date, day_type);

        self.persist()
    }

    pub fn get_day_status(&self, employee_id: &str, date: NaiveDate) -> Option<DayType> {
        self.entries
            .get(&(employee_id.to_string(), date))
            .map(|entry| entry.day_type)
    }

    /// All entries of one employee, ordered by date.
    pub fn get_employee_entries(&self, employee_id: &str) -> Vec<AttendanceEntry> {
        self.range(employee_id, NaiveDate::MIN, NaiveDate::MAX)
            .cloned()
            .collect()
    }

    /// Count entries per type with dates in `[start, end]`.
    pub fn query_range(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> DayCounts {
        self.range(employee_id, start, end)
            .map(|entry| entry.day_type)
            .collect()
    }

    /// Current state as a snapshot document.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            employees: self.employees.clone(),
            entries: self.entries.values().cloned().collect(),
        }
    }

    fn range(&self, employee_id: &str, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &AttendanceEntry> {
        // BTreeMap::range panics on an inverted range.
        let bounds = (start <= end).then(|| (employee_id.to_string(), start)..=(employee_id.to_string(), end));

        bounds
            .into_iter()
            .flat_map(|bounds| self.entries.range(bounds))
            .map(|(_, entry)| entry)
    }

    fn remove_entries_of(&mut self, employee_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _), _| id != employee_id);
        before - self.entries.len()
    }

    fn require_employee(&self, id: &str) -> Result<()> {
        match self.employee(id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("employee {id}"))),
        }
    }

    fn persist(&self) -> Result<()> {
        let json = self.snapshot().to_json()?;
        self.storage.save(&json).map_err(|e| {
            tracing::error!("Failed to save attendance data to {}: {}", self.storage.describe(), e);
            AppError::Persist(e)
        })
    }
}

/// Trim a name and reject it when empty.
fn clean_name(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
