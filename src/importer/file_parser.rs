// ==========================================
// Inventory Analytics - Sheet Readers
// ==========================================
// Supports: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// Output: Sheet = header row + data rows of raw cells
// ==========================================

use crate::config::SheetAliases;
use crate::domain::sheet::{Cell, Sheet, Workbook};
use crate::importer::error::{AnalyticsError, AnalyticsResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// Excel workbook reader
// ==========================================
pub struct WorkbookReader<'a> {
    aliases: &'a SheetAliases,
}

impl<'a> WorkbookReader<'a> {
    pub fn new(aliases: &'a SheetAliases) -> Self {
        Self { aliases }
    }

    /// Reads every tab and routes it to a sheet kind by name.
    /// Tabs matching no alias are skipped.
    pub fn read<P: AsRef<Path>>(&self, file_path: P) -> AnalyticsResult<Workbook> {
        let path = file_path.as_ref();
        check_file(path, &["xlsx", "xls", "xlsm", "xlsb", "ods"])?;

        let mut workbook = open_workbook_auto(path)?;
        let mut routed = Workbook::new();

        for tab in workbook.sheet_names() {
            let Some(kind) = self.aliases.classify(&tab) else {
                debug!(tab = %tab, "tab does not match any sheet alias, skipped");
                continue;
            };

            let range = workbook.worksheet_range(&tab)?;
            let rows: Vec<Vec<Cell>> = range
                .rows()
                .map(|row| row.iter().map(cell_from_data).collect())
                .collect();

            debug!(tab = %tab, kind = %kind, rows = rows.len(), "tab loaded");
            routed.insert(kind, Sheet::new(tab, rows));
        }

        info!(path = %path.display(), sheets = routed.len(), "workbook loaded");
        Ok(routed)
    }
}

/// Numbers stay numbers, dates become their serial value, errors read as empty
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ==========================================
// CSV reader (single sheet)
// ==========================================
/// Reads one CSV file as a sheet. Every cell stays text; numbers are
/// normalized downstream.
pub fn read_csv_sheet<P: AsRef<Path>>(file_path: P) -> AnalyticsResult<Sheet> {
    let path = file_path.as_ref();
    check_file(path, &["csv"])?;

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // rows may differ in length
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<Cell> = record
            .iter()
            .map(|value| {
                if value.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(value.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Sheet::new(name, rows))
}

fn check_file(path: &Path, extensions: &[&str]) -> AnalyticsResult<()> {
    if !path.exists() {
        return Err(AnalyticsError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !extensions.contains(&ext.as_str()) {
        return Err(AnalyticsError::UnsupportedFormat(ext));
    }
    Ok(())
}
