//! Data models for employees and attendance entries.

pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceEntry, DayCounts, DayType, next_day_status};
pub use employee::Employee;
