//! Attendance entries, day types and per-type counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of one employee on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    Working,
    Vacation,
    Sick,
    NonWorking,
}

impl DayType {
    /// All day types in cycle order.
    pub const ALL: [DayType; 4] = [DayType::Working, DayType::Vacation, DayType::Sick, DayType::NonWorking];

    /// Wire name as stored in the snapshot (e.g. `NON_WORKING`).
    pub fn code(&self) -> &'static str {
        match self {
            DayType::Working => "WORKING",
            DayType::Vacation => "VACATION",
            DayType::Sick => "SICK",
            DayType::NonWorking => "NON_WORKING",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Working => "Working",
            DayType::Vacation => "Vacation",
            DayType::Sick => "Sick",
            DayType::NonWorking => "Non-working",
        }
    }
}

/// Next status in the calendar click cycle:
/// absent -> WORKING -> VACATION -> SICK -> NON_WORKING -> absent.
pub fn next_day_status(current: Option<DayType>) -> Option<DayType> {
    match current {
        None => Some(DayType::Working),
        Some(DayType::Working) => Some(DayType::Vacation),
        Some(DayType::Vacation) => Some(DayType::Sick),
        Some(DayType::Sick) => Some(DayType::NonWorking),
        Some(DayType::NonWorking) => None,
    }
}

/// One attendance record for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: String,
    pub employee_id: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub day_type: DayType,
}

/// Entry counts per day type over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCounts {
    pub working: u32,
    pub vacation: u32,
    pub sick: u32,
    pub non_working: u32,
}

impl DayCounts {
    /// Count one more day of the given type.
    pub fn add(&mut self, day_type: DayType) {
        match day_type {
            DayType::Working => self.working += 1,
            DayType::Vacation => self.vacation += 1,
            DayType::Sick => self.sick += 1,
            DayType::NonWorking => self.non_working += 1,
        }
    }

    /// Count for a single day type.
    pub fn get(&self, day_type: DayType) -> u32 {
        match day_type {
            DayType::Working => self.working,
            DayType::Vacation => self.vacation,
            DayType::Sick => self.sick,
            DayType::NonWorking => self.non_working,
        }
    }

    /// Working + vacation + sick. Non-working days are not "tracked" days.
    pub fn tracked(&self) -> u32 {
        self.working + self.vacation + self.sick
    }

    /// All entries in the range.
    pub fn total(&self) -> u32 {
        self.tracked() + self.non_working
    }
}

impl FromIterator<DayType> for DayCounts {
    fn from_iter<I: IntoIterator<Item = DayType>>(iter: I) -> Self {
        let mut counts = DayCounts::default();
        for day_type in iter {
            counts.add(day_type);
        }
        counts
    }
}
