//! GUI panels and application state.

pub mod app;
pub mod calendar_panel;
pub mod components;
pub mod dashboard;
pub mod export_panel;
pub mod staff_panel;

pub use app::App;
