//! Calendar panel: one month of one employee, click a day to cycle its status.

use chrono::{Datelike, Local};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_phosphor::regular::{CALENDAR_BLANK, CARET_LEFT, CARET_RIGHT};

use crate::calendar::{WEEKDAY_LABELS, add_months, month_grid, month_name, start_of_month, sub_months};

use super::app::App;
use super::components::{action_button, colors, day_color, day_icon, day_legend, panel_header, styled_button_with_icon};

const CELL_WIDTH: f32 = 96.0;
const CELL_HEIGHT: f32 = 72.0;

/// Show the calendar panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Calendar");

    app.ensure_calendar_selection();

    if app.store.employees().is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                RichText::new("Please add employees first in the Employees tab.")
                    .size(16.0)
                    .weak(),
            );
        });
        return;
    }

    // Header controls
    ui.horizontal(|ui| {
        ui.label("Employee:");
        let selected_name = app
            .calendar
            .selected_employee
            .as_deref()
            .and_then(|id| app.store.employee(id))
            .map(|e| e.display_name())
            .unwrap_or_default();

        egui::ComboBox::from_id_salt("calendar_employee")
            .width(220.0)
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                for emp in app.store.employees() {
                    let selected = app.calendar.selected_employee.as_deref() == Some(emp.id.as_str());
                    if ui.selectable_label(selected, emp.display_name()).clicked() {
                        app.calendar.selected_employee = Some(emp.id.clone());
                    }
                }
            });

        ui.add_space(30.0);

        let month = app.calendar.month;
        if action_button(ui, CARET_LEFT, "Previous month").clicked() {
            app.calendar.month = sub_months(month, 1);
        }
        ui.label(
            RichText::new(format!("{} {}", month_name(month.month()), month.year()))
                .size(18.0)
                .strong(),
        );
        if action_button(ui, CARET_RIGHT, "Next month").clicked() {
            app.calendar.month = add_months(month, 1);
        }

        ui.add_space(20.0);

        if styled_button_with_icon(ui, CALENDAR_BLANK, "Today").clicked() {
            app.calendar.month = start_of_month(Local::now().date_naive());
        }

        ui.label("Go to:");
        let picker = ui.add(egui_extras::DatePickerButton::new(&mut app.calendar.jump_date).id_salt("calendar_jump"));
        if picker.changed() {
            app.calendar.month = start_of_month(app.calendar.jump_date);
        }
    });

    ui.add_space(8.0);
    day_legend(ui);
    ui.add_space(12.0);

    show_grid(app, ui);

    ui.add_space(8.0);
    ui.label(RichText::new("Click a day to cycle: Working, Vacation, Sick, Non-working, cleared.").small().weak());
}

fn show_grid(app: &mut App, ui: &mut Ui) {
    let Some(employee_id) = app.calendar.selected_employee.clone() else {
        return;
    };
    let month = app.calendar.month;
    let today = Local::now().date_naive();
    let mut clicked = None;

    egui::Grid::new("calendar_grid")
        .num_columns(7)
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for label in WEEKDAY_LABELS {
                ui.vertical_centered(|ui| {
                    ui.strong(label);
                });
            }
            ui.end_row();

            for (i, day) in month_grid(month).into_iter().enumerate() {
                let status = app.store.get_day_status(&employee_id, day);
                let in_month = day.month() == month.month();

                let mut text = day.day().to_string();
                if let Some(day_type) = status {
                    text = format!("{text}\n{} {}", day_icon(day_type), day_type.label());
                }

                let mut label = RichText::new(text);
                if !in_month {
                    label = label.weak();
                } else if status.is_some() {
                    label = label.color(Color32::WHITE);
                }
                if day == today {
                    label = label.strong().underline();
                }

                let mut button = egui::Button::new(label).min_size(egui::vec2(CELL_WIDTH, CELL_HEIGHT));
                if let Some(day_type) = status {
                    button = button.fill(day_color(day_type));
                }
                if day == today {
                    button = button.stroke(egui::Stroke::new(2.0, colors::PRIMARY));
                }

                if ui.add(button).clicked() {
                    clicked = Some(day);
                }

                if i % 7 == 6 {
                    ui.end_row();
                }
            }
        });

    if let Some(day) = clicked {
        app.cycle_day(day);
    }
}
