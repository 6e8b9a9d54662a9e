//! PDF report: yearly summary and monthly breakdown tables.

use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::{AppError, Result};
use crate::models::DayCounts;
use crate::report::{self, MonthRow, SummaryRow};
use crate::store::{AttendanceStore, SnapshotStorage};

// A4 portrait, millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_TOP: f32 = 22.0;
const MARGIN_BOTTOM: f32 = 18.0;
const ROW_HEIGHT: f32 = 7.0;
const BODY_SIZE: f32 = 10.0;
const MAX_NAME_CHARS: usize = 36;

/// Column titles with their x offset from the left margin.
const YEARLY_COLUMNS: [(&str, f32); 4] = [("Employee", 0.0), ("Working", 90.0), ("Vacation", 115.0), ("Sick", 140.0)];
const MONTHLY_COLUMNS: [(&str, f32); 5] = [
    ("Month", 0.0),
    ("Employee", 32.0),
    ("Working", 110.0),
    ("Vacation", 135.0),
    ("Sick", 160.0),
];

/// Export one year as a PDF with a yearly summary and a monthly breakdown.
pub fn export_year_to_pdf<S: SnapshotStorage>(store: &AttendanceStore<S>, year: i32, path: &Path) -> Result<()> {
    let yearly = report::yearly_summary(store, year);
    let monthly = report::monthly_breakdown(store, year);

    let title = format!("WorkTracker Summary - {year}");
    let mut writer = ReportWriter::new(&title)?;

    writer.heading(&title, 18.0);
    writer.heading("Yearly Summary", 14.0);
    writer.table(&YEARLY_COLUMNS, yearly.iter().map(yearly_cells));

    writer.heading("Monthly Breakdown", 14.0);
    writer.table(&MONTHLY_COLUMNS, monthly.iter().map(monthly_cells));

    writer.save(path)?;
    tracing::info!("Exported {} report to {}", year, path.display());
    Ok(())
}

/// Default filename for a year's PDF report.
pub fn default_report_filename(year: i32) -> String {
    format!("WorkTracker_Report_{year}.pdf")
}

fn yearly_cells(row: &SummaryRow) -> Vec<String> {
    let mut cells = vec![short_name(&row.employee_name)];
    cells.extend(count_cells(&row.counts));
    cells
}

fn monthly_cells(row: &MonthRow) -> Vec<String> {
    let mut cells = vec![row.month_name.to_string(), short_name(&row.employee_name)];
    cells.extend(count_cells(&row.counts));
    cells
}

fn count_cells(counts: &DayCounts) -> [String; 3] {
    [
        counts.working.to_string(),
        counts.vacation.to_string(),
        counts.sick.to_string(),
    ]
}

/// Names longer than the column are cut with an ellipsis.
fn short_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
    short.push_str("...");
    short
}

fn pdf_error(e: impl Display) -> AppError {
    AppError::pdf(e.to_string())
}

/// Top-to-bottom text layout over A4 pages.
struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, measured from the bottom edge.
    y: f32,
    pages: usize,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        })
    }

    fn heading(&mut self, text: &str, size: f32) {
        // Keep a heading together with the first rows below it
        self.ensure_space(ROW_HEIGHT * 3.0);
        self.layer.use_text(text, size, Mm(MARGIN_LEFT), Mm(self.y), &self.bold);
        self.y -= ROW_HEIGHT + 3.0;
    }

    /// Header row, then one row per item. The header repeats after a page break.
    fn table(&mut self, columns: &[(&str, f32)], rows: impl Iterator<Item = Vec<String>>) {
        let titles: Vec<String> = columns.iter().map(|(title, _)| title.to_string()).collect();
        self.ensure_space(ROW_HEIGHT * 2.0);
        self.row(columns, &titles, true);

        for cells in rows {
            if self.ensure_space(ROW_HEIGHT) {
                self.row(columns, &titles, true);
            }
            self.row(columns, &cells, false);
        }

        self.y -= ROW_HEIGHT;
    }

    fn row(&mut self, columns: &[(&str, f32)], cells: &[String], header: bool) {
        let font = if header { &self.bold } else { &self.regular };
        for ((_, x), cell) in columns.iter().zip(cells) {
            self.layer
                .use_text(cell.as_str(), BODY_SIZE, Mm(MARGIN_LEFT + x), Mm(self.y), font);
        }
        self.y -= ROW_HEIGHT;
    }

    /// Start a new page when less than `height` is left. Returns whether it did.
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.y - height >= MARGIN_BOTTOM {
            return false;
        }

        self.pages += 1;
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", self.pages));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
        true
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.doc.save(&mut BufWriter::new(file)).map_err(pdf_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayType;
    use crate::store::MemoryStorage;
    use chrono::NaiveDate;

    #[test]
    fn test_default_report_filename() {
        assert_eq!(default_report_filename(2024), "WorkTracker_Report_2024.pdf");
    }

    #[test]
    fn test_export_writes_pdf() {
        let mut store = AttendanceStore::open(MemoryStorage::new()).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        store.set_day_status("1", day, Some(DayType::Vacation)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_report_filename(2024));
        export_year_to_pdf(&store, 2024, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_empty_store() {
        let store = AttendanceStore::open(MemoryStorage::with_contents("{}")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");

        export_year_to_pdf(&store, 1999, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_tables_break_pages() {
        let mut writer = ReportWriter::new("paging").unwrap();
        let rows = (0..120).map(|i| vec![format!("Employee {i}"), "1".into(), "2".into(), "3".into()]);

        writer.table(&YEARLY_COLUMNS, rows);
        assert!(writer.pages >= 3);
        assert!(writer.y >= MARGIN_BOTTOM - ROW_HEIGHT);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Ann Lee"), "Ann Lee");
        let long = "x".repeat(50);
        let cut = short_name(&long);
        assert_eq!(cut.chars().count(), MAX_NAME_CHARS);
        assert!(cut.ends_with("..."));
    }
}
