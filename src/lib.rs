pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod report;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
pub use store::AttendanceStore;
