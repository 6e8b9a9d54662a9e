//! Dashboard panel with monthly and yearly summaries and the activity log.

use chrono::Datelike;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CARET_LEFT, CARET_RIGHT};

use crate::calendar::{add_months, month_name, sub_months};
use crate::report::{self, SummaryRow};

use super::app::{App, LogLevel};
use super::components::{action_button, colors, panel_header, section_frame, stat_card};

/// Show the dashboard panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Dashboard");

    let month = app.dashboard_month;
    let monthly = report::monthly_summary(&app.store, month.year(), month.month());
    let yearly = report::yearly_summary(&app.store, month.year());

    // Stat cards row
    ui.horizontal(|ui| {
        stat_card(
            ui,
            "Employees",
            &app.store.employees().len().to_string(),
            "Tracked staff members",
        );
        stat_card(
            ui,
            "Days Tracked",
            &monthly.iter().map(|r| r.counts.tracked()).sum::<u32>().to_string(),
            "This month",
        );
        stat_card(
            ui,
            "Sick Days",
            &yearly.iter().map(|r| r.counts.sick).sum::<u32>().to_string(),
            &format!("In {}", month.year()),
        );
    });

    ui.add_space(20.0);

    ScrollArea::vertical().id_salt("dashboard_scroll").show(ui, |ui| {
        // Monthly Stats
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Monthly Summary").strong());
                ui.add_space(20.0);
                if action_button(ui, CARET_LEFT, "Previous month").clicked() {
                    app.dashboard_month = sub_months(month, 1);
                }
                ui.label(format!("{} {}", month_name(month.month()), month.year()));
                if action_button(ui, CARET_RIGHT, "Next month").clicked() {
                    app.dashboard_month = add_months(month, 1);
                }
            });
            ui.add_space(10.0);
            summary_table(ui, "monthly_summary_grid", &monthly, true);
        });

        ui.add_space(20.0);

        // Yearly Stats
        section_frame(ui, |ui| {
            ui.label(RichText::new(format!("Yearly Summary ({})", month.year())).strong());
            ui.add_space(10.0);
            summary_table(ui, "yearly_summary_grid", &yearly, false);
        });

        ui.add_space(20.0);

        // Recent Activity
        section_frame(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Recent Activity").strong());
                if !app.log_messages.is_empty() && ui.small_button("Clear").clicked() {
                    app.clear_log();
                }
            });
            ui.add_space(10.0);

            if app.log_messages.is_empty() {
                ui.label(RichText::new("No recent activity").weak());
            } else {
                for entry in app.log_messages.iter().rev().take(10) {
                    let color = match entry.level {
                        LogLevel::Info => Color32::GRAY,
                        LogLevel::Success => colors::SUCCESS,
                        LogLevel::Warning => colors::WARNING,
                        LogLevel::Error => colors::ERROR,
                    };

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .color(Color32::DARK_GRAY),
                        );
                        ui.label(RichText::new(&entry.message).color(color));
                    });
                }
            }
        });
    });
}

/// Per-employee counts table. The monthly variant adds a "Total Days Tracked" column.
fn summary_table(ui: &mut Ui, id: &str, rows: &[SummaryRow], with_total: bool) {
    if rows.is_empty() {
        ui.label(RichText::new("No employees found.").weak());
        return;
    }

    egui::Grid::new(id)
        .num_columns(if with_total { 5 } else { 4 })
        .striped(true)
        .min_col_width(100.0)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            // Header
            ui.strong("Employee");
            ui.strong("Working Days");
            ui.strong("Vacation");
            ui.strong("Sick Leave");
            if with_total {
                ui.strong("Total Days Tracked");
            }
            ui.end_row();

            for row in rows {
                ui.label(&row.employee_name);
                ui.colored_label(colors::WORKING, row.counts.working.to_string());
                ui.colored_label(colors::VACATION, row.counts.vacation.to_string());
                ui.colored_label(colors::SICK, row.counts.sick.to_string());
                if with_total {
                    ui.label(row.counts.tracked().to_string());
                }
                ui.end_row();
            }
        });
}
