//! Employee management panel with add, edit, delete and search.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{PENCIL, PLUS, TRASH};

use super::app::{App, DeleteTarget, EmployeeForm};
use super::components::{action_button, danger_action_button, panel_header, primary_button_with_icon, styled_button};

/// Show the staff panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Manage Employees");

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Add Employee").clicked() {
            app.employee_form = EmployeeForm::add();
        }

        ui.add_space(20.0);

        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.employee_search)
                .desired_width(200.0)
                .hint_text("Name..."),
        );

        if !app.employee_search.is_empty() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.employee_search.clear();
            }
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    // Form dialog
    if app.employee_form.is_open {
        show_form_dialog(app, ui.ctx());
    }
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let search = app.employee_search.trim().to_lowercase();
    let filtered: Vec<_> = app
        .store
        .employees()
        .iter()
        .filter(|e| search.is_empty() || e.display_name().to_lowercase().contains(&search))
        .cloned()
        .collect();

    ui.label(format!(
        "Showing {} of {} employees",
        filtered.len(),
        app.store.employees().len()
    ));

    ui.add_space(10.0);

    if app.store.employees().is_empty() {
        ui.label(RichText::new("No employees found.").weak());
        return;
    }

    ScrollArea::vertical().id_salt("staff_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("employees_grid")
            .num_columns(4)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("");
                ui.strong("Name");
                ui.strong("Recorded Days");
                ui.strong("Actions");
                ui.end_row();

                // Data rows
                for emp in &filtered {
                    ui.label(RichText::new(emp.initials()).strong());
                    ui.label(emp.display_name());
                    ui.label(app.store.get_employee_entries(&emp.id).len().to_string());

                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            app.employee_form = EmployeeForm::edit(emp);
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Delete").clicked() {
                            app.delete_target = Some(DeleteTarget::Employee(emp.id.clone(), emp.display_name()));
                            app.show_delete_confirm = true;
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.employee_form.is_editing {
        "Edit Employee"
    } else {
        "Add New Employee"
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            egui::Grid::new("emp_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("First Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.employee_form.first_name).desired_width(220.0));
                    ui.end_row();

                    ui.label("Last Name:");
                    ui.add(egui::TextEdit::singleline(&mut app.employee_form.last_name).desired_width(220.0));
                    ui.end_row();
                });

            let can_save =
                !app.employee_form.first_name.trim().is_empty() && !app.employee_form.last_name.trim().is_empty();

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.employee_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save = ui.add_enabled_ui(can_save, |ui| primary_button_with_icon(ui, "", "Save"));
                    if save.inner.clicked() {
                        app.save_employee_form();
                    }
                });
            });
        });
}
