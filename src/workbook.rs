// 📒 Workbook abstraction
//
// The loader and the merger never touch a spreadsheet format directly. They
// see named sheets, each an ordered list of rows of string cells.
//
// Two sources:
// - MemoryWorkbook: rows already in memory (tests, callers with their own reader)
// - CsvWorkbook: one exported CSV file per sheet in a directory

use crate::error::{CatalogError, Result};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// ROW
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Row { cells }
    }

    /// Trimmed cell at a 0-based position, "" when the row is shorter
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    /// Cell exactly as the source holds it, "" when the row is shorter
    pub fn raw_cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// True when every cell is empty after trimming (padding rows)
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// WORKBOOK TRAIT
// ============================================================================

pub trait Workbook {
    /// Sheet names in source order
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of a sheet, header rows included
    fn rows(&self, sheet: &str) -> Result<Vec<Row>>;

    fn has_sheet(&self, sheet: &str) -> bool {
        self.sheet_names().iter().any(|s| s == sheet)
    }
}

// ============================================================================
// IN-MEMORY WORKBOOK
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Row>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: append a sheet (kept in insertion order)
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.add_sheet(name, rows);
        self
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.sheets.push((name.into(), rows));
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn rows(&self, sheet: &str) -> Result<Vec<Row>> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| CatalogError::MissingSheet {
                sheet: sheet.to_string(),
            })
    }
}

// ============================================================================
// CSV DIRECTORY WORKBOOK
// ============================================================================

/// A workbook exported as `<sheet name>.csv` files in one directory.
///
/// Header rows stay in the files; nothing is interpreted as a CSV header.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    dir: PathBuf,
    sheets: Vec<String>,
}

impl CsvWorkbook {
    /// Scan a directory for sheets. Sheet order is file-name order.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut sheets = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);

            if !path.is_file() || !is_csv {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                sheets.push(stem.to_string());
            }
        }

        sheets.sort();
        log::debug!("Found {} sheet(s) in {}", sheets.len(), dir.display());

        Ok(CsvWorkbook {
            dir: dir.to_path_buf(),
            sheets,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }
}

impl Workbook for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.clone()
    }

    fn rows(&self, sheet: &str) -> Result<Vec<Row>> {
        if !self.has_sheet(sheet) {
            return Err(CatalogError::MissingSheet {
                sheet: sheet.to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(self.sheet_path(sheet))?;

        let mut rows: Vec<Row> = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().collect());
        }

        Ok(rows)
    }
}

// ============================================================================
// TESTS
// ============================================================================
