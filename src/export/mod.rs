//! Excel and PDF export functionality.

mod pdf;

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::models::DayCounts;
use crate::report::{self, MonthRow, RawRow, SummaryRow};
use crate::store::{AttendanceStore, SnapshotStorage};

pub use pdf::{default_report_filename, export_year_to_pdf};

const XLSX_EXTENSIONS: &[&str] = &["xlsx"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Output format of a year export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Workbook with yearly, monthly and raw-data sheets.
    Excel,
    /// Printable report with the yearly and monthly tables.
    Pdf,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }

    pub fn default_filename(&self, year: i32) -> String {
        match self {
            ExportFormat::Excel => default_export_filename(year),
            ExportFormat::Pdf => default_report_filename(year),
        }
    }

    /// Save dialog filter name and extensions.
    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ExportFormat::Excel => ("Excel Files", XLSX_EXTENSIONS),
            ExportFormat::Pdf => ("PDF Files", PDF_EXTENSIONS),
        }
    }
}

/// Export one year in `format` to `path`.
pub fn export_year<S: SnapshotStorage>(
    store: &AttendanceStore<S>,
    year: i32,
    path: &Path,
    format: ExportFormat,
) -> crate::Result<()> {
    match format {
        ExportFormat::Excel => export_year_to_excel(store, year, path)?,
        ExportFormat::Pdf => export_year_to_pdf(store, year, path)?,
    }
    Ok(())
}

/// Export one year to a workbook with yearly, monthly and raw-data sheets.
pub fn export_year_to_excel<S: SnapshotStorage>(
    store: &AttendanceStore<S>,
    year: i32,
    path: &Path,
) -> Result<(), XlsxError> {
    let yearly = report::yearly_summary(store, year);
    let monthly = report::monthly_breakdown(store, year);
    let raw = report::raw_rows(store, year);

    let mut workbook = Workbook::new();
    write_yearly_sheet(workbook.add_worksheet(), &yearly)?;
    write_monthly_sheet(workbook.add_worksheet(), &monthly)?;
    write_raw_sheet(workbook.add_worksheet(), &raw)?;

    workbook.save(path)?;
    tracing::info!("Exported {} to {}", year, path.display());
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Headers, column widths, autofilter over `rows` data rows, frozen top row.
fn prepare_sheet(worksheet: &mut Worksheet, name: &str, headers: &[(&str, f64)], rows: usize) -> Result<(), XlsxError> {
    worksheet.set_name(name)?;

    let header_format = header_format();
    for (col, (header, width)) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }

    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, (headers.len() - 1) as u16)?;
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_counts(worksheet: &mut Worksheet, row: u32, first_col: u16, counts: &DayCounts) -> Result<(), XlsxError> {
    worksheet.write_number(row, first_col, counts.working)?;
    worksheet.write_number(row, first_col + 1, counts.vacation)?;
    worksheet.write_number(row, first_col + 2, counts.sick)?;
    Ok(())
}

fn write_yearly_sheet(worksheet: &mut Worksheet, rows: &[SummaryRow]) -> Result<(), XlsxError> {
    let headers = [
        ("Employee", 30.0),
        ("Working", 10.0),
        ("Vacation", 10.0),
        ("Sick", 10.0),
        ("NonWorking", 12.0),
    ];
    prepare_sheet(worksheet, "Yearly Summary", &headers, rows.len())?;

    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &record.employee_name)?;
        write_counts(worksheet, row, 1, &record.counts)?;
        worksheet.write_number(row, 4, record.counts.non_working)?;
    }

    Ok(())
}

fn write_monthly_sheet(worksheet: &mut Worksheet, rows: &[MonthRow]) -> Result<(), XlsxError> {
    let headers = [
        ("Month", 12.0),
        ("Employee", 30.0),
        ("Working", 10.0),
        ("Vacation", 10.0),
        ("Sick", 10.0),
    ];
    prepare_sheet(worksheet, "Monthly Summary", &headers, rows.len())?;

    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, record.month_name)?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        write_counts(worksheet, row, 2, &record.counts)?;
    }

    Ok(())
}

fn write_raw_sheet(worksheet: &mut Worksheet, rows: &[RawRow]) -> Result<(), XlsxError> {
    let headers = [("Date", 12.0), ("Employee", 30.0), ("Type", 14.0)];
    prepare_sheet(worksheet, "Raw Data", &headers, rows.len())?;

    for (idx, record) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, record.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 1, &record.employee_name)?;
        worksheet.write_string(row, 2, record.day_type.code())?;
    }

    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str, format: ExportFormat) -> Option<PathBuf> {
    let (filter_name, extensions) = format.filter();
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter(filter_name, extensions)
        .save_file()
}

/// Default filename for a year's export.
pub fn default_export_filename(year: i32) -> String {
    format!("WorkTracker_Export_{year}.xlsx")
}
