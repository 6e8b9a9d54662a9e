//! Export panel: pick a year and write the Excel workbook or the PDF report.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{FILE_PDF, FILE_XLS};

use crate::export::{ExportFormat, default_export_filename, default_report_filename};
use crate::report;

use super::app::App;
use super::components::{panel_header, primary_button_with_icon, section_frame};

/// Show the export panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Export Data");

    ui.label(RichText::new("Download summaries and reports.").weak());
    ui.add_space(15.0);

    ui.horizontal(|ui| {
        ui.label("Select Year:");
        ui.add(egui::DragValue::new(&mut app.export_year).range(1900..=9999).speed(0.1));
    });

    ui.add_space(15.0);

    let year = app.export_year;
    let raw_count = report::raw_rows(&app.store, year).len();

    section_frame(ui, |ui| {
        ui.label(RichText::new("Excel Workbook").strong());
        ui.add_space(5.0);
        ui.label(format!("File: {}", default_export_filename(year)));
        ui.label("Sheets: Yearly Summary, Monthly Summary, Raw Data");
        ui.label(format!("{} entries recorded in {}", raw_count, year));

        if let Some(dir) = app.config.export.output_dir() {
            ui.label(RichText::new(format!("Saved to {}", dir.display())).small().weak());
        }

        ui.add_space(10.0);

        if primary_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_selected_year(ExportFormat::Excel);
        }
    });

    ui.add_space(15.0);

    section_frame(ui, |ui| {
        ui.label(RichText::new("PDF Report").strong());
        ui.add_space(5.0);
        ui.label(format!("File: {}", default_report_filename(year)));
        ui.label("Tables: Yearly Summary, Monthly Breakdown");

        ui.add_space(10.0);

        if primary_button_with_icon(ui, FILE_PDF, "Export to PDF").clicked() {
            app.export_selected_year(ExportFormat::Pdf);
        }
    });
}
