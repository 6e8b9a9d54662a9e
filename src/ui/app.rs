//! Main application UI.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{CALENDAR, CHART_BAR, FILE_XLS, USERS};

use crate::calendar::start_of_month;
use crate::config::AppConfig;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::models::{Employee, next_day_status};
use crate::store::{AttendanceStore, FileStorage, StartupState};

use super::components::colors;
use super::{calendar_panel, dashboard, export_panel, staff_panel};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Calendar,
    Employees,
    Export,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Dashboard, Panel::Calendar, Panel::Employees, Panel::Export];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Calendar => "Calendar",
            Panel::Employees => "Employees",
            Panel::Export => "Export",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Panel::Dashboard => CHART_BAR,
            Panel::Calendar => CALENDAR,
            Panel::Employees => USERS,
            Panel::Export => FILE_XLS,
        }
    }
}

/// Form state for employee add/edit.
#[derive(Default, Clone)]
pub struct EmployeeForm {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub is_open: bool,
    pub is_editing: bool,
}

impl EmployeeForm {
    /// Reset the form to default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Empty form for a new employee.
    pub fn add() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    /// Create a form pre-filled for editing an existing employee.
    pub fn edit(emp: &Employee) -> Self {
        Self {
            id: Some(emp.id.clone()),
            first_name: emp.first_name.clone(),
            last_name: emp.last_name.clone(),
            is_open: true,
            is_editing: true,
        }
    }
}

/// Calendar panel state.
#[derive(Clone)]
pub struct CalendarState {
    pub selected_employee: Option<String>,
    /// First day of the displayed month.
    pub month: NaiveDate,
    /// Date bound to the jump-to date picker.
    pub jump_date: NaiveDate,
}

impl Default for CalendarState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            selected_employee: None,
            month: start_of_month(today),
            jump_date: today,
        }
    }
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    Employee(String, String),
}

/// Main application state.
pub struct App {
    // Attendance data
    pub store: AttendanceStore<FileStorage>,

    // Configuration
    pub config: AppConfig,

    // Navigation
    pub current_panel: Panel,

    // Panel state
    pub employee_form: EmployeeForm,
    pub employee_search: String,
    pub calendar: CalendarState,
    /// First day of the month shown on the dashboard.
    pub dashboard_month: NaiveDate,
    pub export_year: i32,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Set when a change is in memory but the last save failed
    pub unsaved_changes: bool,

    // Dialogs
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: AttendanceStore<FileStorage>,
        config: AppConfig,
        config_error: Option<String>,
    ) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = Local::now().date_naive();
        let mut app = Self {
            store,
            config,
            current_panel: Panel::default(),
            employee_form: EmployeeForm::default(),
            employee_search: String::new(),
            calendar: CalendarState::default(),
            dashboard_month: start_of_month(today),
            export_year: today.year(),
            log_messages: Vec::new(),
            unsaved_changes: false,
            show_delete_confirm: false,
            delete_target: None,
            error_message: None,
            success_message: None,
        };

        let employee_count = app.store.employees().len();
        match app.store.startup_state() {
            StartupState::Restored => app.log_info(format!("Loaded {} employees", employee_count)),
            StartupState::Seeded => app.log_info("First run: added placeholder employees"),
            StartupState::SeededUnsaved => {
                app.unsaved_changes = true;
                app.log_warning("First run: placeholder employees could not be saved");
                app.error_message = Some(format!(
                    "Placeholder employees were added but could not be saved to {}. \
                     They may be lost on restart.",
                    app.config.storage.data_file().display()
                ));
            }
            StartupState::RecoveredFromCorrupt => {
                app.log_error("Saved data could not be read; starting with no employees");
                app.error_message = Some(
                    "Saved attendance data is damaged and could not be loaded. \
                     Starting empty; the next change will overwrite it."
                        .to_string(),
                );
            }
        }

        if let Some(e) = config_error {
            app.log_warning(format!("Using default settings: {}", e));
            app.error_message.get_or_insert(format!("Config invalid, using defaults: {}", e));
        }

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Report the outcome of a store mutation.
    ///
    /// Returns the value only on full success; a failed save still shows a warning.
    fn apply<T>(&mut self, result: Result<T>, action: &str) -> Option<T> {
        match result {
            Ok(value) => {
                self.unsaved_changes = false;
                Some(value)
            }
            Err(e) if e.is_unsaved_change() => {
                // In-memory state already advanced
                self.unsaved_changes = true;
                self.log_warning(format!("{action}: {e}"));
                self.error_message = Some(format!(
                    "{action} was applied but could not be saved. It may be lost on restart.\n\n{e}"
                ));
                None
            }
            Err(e) => {
                self.log_error(format!("{action} failed: {e}"));
                self.error_message = Some(e.to_string());
                None
            }
        }
    }

    /// Create or update the employee described by the form.
    pub fn save_employee_form(&mut self) {
        let form = self.employee_form.clone();

        if form.is_editing {
            let Some(id) = form.id else {
                self.employee_form.reset();
                return;
            };
            let result = self.store.update_employee(&id, &form.first_name, &form.last_name);
            let applied = is_applied(&result);
            if self.apply(result, "Update employee").is_some() {
                self.log_success(format!("Updated employee {} {}", form.first_name.trim(), form.last_name.trim()));
            }
            if applied {
                self.employee_form.reset();
            }
        } else {
            let result = self.store.add_employee(&form.first_name, &form.last_name);
            let applied = is_applied(&result);
            if let Some(emp) = self.apply(result, "Add employee") {
                self.log_success(format!("Added employee {}", emp.display_name()));
            }
            // Close the form even if only the save failed, or a retry would add a duplicate
            if applied {
                self.employee_form.reset();
            }
        }
    }

    /// Delete an employee and its attendance records.
    pub fn delete_employee(&mut self, id: &str, name: &str) {
        let result = self.store.delete_employee(id);
        if self.apply(result, "Delete employee").is_some() {
            self.log_success(format!("Deleted employee {}", name));
        }
        if self.calendar.selected_employee.as_deref() == Some(id) {
            self.calendar.selected_employee = None;
        }
    }

    /// Advance one day of the selected employee through the status cycle.
    pub fn cycle_day(&mut self, date: NaiveDate) {
        let Some(employee_id) = self.calendar.selected_employee.clone() else {
            return;
        };

        let next = next_day_status(self.store.get_day_status(&employee_id, date));
        let result = self.store.set_day_status(&employee_id, date, next);
        self.apply(result, "Set day status");
    }

    /// Keep the calendar selection pointing at an existing employee.
    pub fn ensure_calendar_selection(&mut self) {
        let valid = self
            .calendar
            .selected_employee
            .as_deref()
            .is_some_and(|id| self.store.employee(id).is_some());

        if !valid {
            self.calendar.selected_employee = self.store.employees().first().map(|e| e.id.clone());
        }
    }

    /// Export the selected year in `format`.
    ///
    /// Writes into the configured output directory, or asks with a save dialog.
    pub fn export_selected_year(&mut self, format: ExportFormat) {
        let year = self.export_year;
        let filename = format.default_filename(year);

        let path = match self.config.export.output_dir() {
            Some(dir) => {
                if let Err(e) = std::fs::create_dir_all(&dir) {
                    self.error_message = Some(format!("Export failed: {}", e));
                    self.log_error(format!("Export failed: {}", e));
                    return;
                }
                dir.join(&filename)
            }
            None => match export::show_save_dialog(&filename, format) {
                Some(path) => path,
                None => return,
            },
        };

        match export::export_year(&self.store, year, &path, format) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported {} {}: {}", year, format.label(), path.display()));
            }
            Err(e) => {
                tracing::error!("{} export failed: {}", format.label(), e);
                self.error_message = Some(format!("Export failed: {}", e));
                self.log_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Render the navigation side bar.
    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav_bar")
            .resizable(false)
            .exact_width(170.0)
            .show(ctx, |ui| {
                ui.add_space(15.0);
                ui.label(RichText::new("WorkTracker").size(20.0).strong());
                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                for panel in Panel::ALL {
                    let label = RichText::new(format!("{}  {}", panel.icon(), panel.name())).size(15.0);
                    if ui.selectable_label(self.current_panel == panel, label).clicked() {
                        self.current_panel = panel;
                    }
                    ui.add_space(4.0);
                }
            });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        colors::NEUTRAL,
                        format!(
                            "{} employees, {} entries",
                            self.store.employees().len(),
                            self.store.entry_count()
                        ),
                    );

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.unsaved_changes {
                            ui.colored_label(colors::WARNING, "Unsaved changes");
                        } else {
                            ui.colored_label(colors::SUCCESS, "Saved");
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(DeleteTarget::Employee(_, name)) = self.delete_target.clone()
        {
            egui::Window::new("Delete Employee")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Delete employee '{}'?", name));
                    ui.label(RichText::new("This also removes all of their attendance records.").weak());
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button("Delete").clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(DeleteTarget::Employee(id, name)) = self.delete_target.take() {
            self.log_info(format!("Deleting employee: {}", name));
            self.delete_employee(&id, &name);
        }
    }
}

/// Whether a mutation reached the in-memory state.
fn is_applied<T>(result: &Result<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => e.is_unsaved_change(),
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Navigation
        self.show_nav_bar(ctx);

        // Status bar
        self.show_status_bar(ctx);

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.current_panel {
            Panel::Dashboard => dashboard::show(self, ui),
            Panel::Calendar => calendar_panel::show(self, ui),
            Panel::Employees => staff_panel::show(self, ui),
            Panel::Export => export_panel::show(self, ui),
        });
    }
}
