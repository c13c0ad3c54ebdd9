//! Excel importer implementation - generated worksheet → Record

use super::exporter::{field_row, SHEET_NAME, TIMESTAMP_ROW, VALUE_COL};
use crate::error::{EtfError, EtfResult};
use crate::types::{Field, Record};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads workbooks produced by [`super::ExcelExporter`]
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn open(&self) -> EtfResult<Xlsx<std::io::BufReader<std::fs::File>>> {
        open_workbook(&self.path)
            .map_err(|e| EtfError::Import(format!("Failed to open Excel file: {}", e)))
    }

    /// Read the four field values back into a record
    pub fn import(&self) -> EtfResult<Record> {
        let mut workbook = self.open()?;
        let range = workbook
            .worksheet_range(SHEET_NAME)
            .map_err(|e| EtfError::Import(format!("Missing sheet '{}': {}", SHEET_NAME, e)))?;

        let mut record = Record::default();
        for field in Field::ALL {
            record.set(field, cell_text(&range, field_row(field), VALUE_COL as u32));
        }

        debug!(path = %self.path.display(), code = %record.code, "imported workbook");
        Ok(record)
    }

    /// Formula stored in the timestamp cell, without the leading `=`
    pub fn timestamp_formula(&self) -> EtfResult<Option<String>> {
        let mut workbook = self.open()?;
        let formulas = workbook
            .worksheet_formula(SHEET_NAME)
            .map_err(|e| EtfError::Import(format!("Missing sheet '{}': {}", SHEET_NAME, e)))?;

        Ok(formulas
            .get_value((TIMESTAMP_ROW, VALUE_COL as u32))
            .filter(|f| !f.is_empty())
            .cloned())
    }

    /// Whether the timestamp cell carries the live `NOW()` formula
    pub fn has_now_formula(&self) -> EtfResult<bool> {
        Ok(self
            .timestamp_formula()?
            .map(|f| f.trim_start_matches('=').eq_ignore_ascii_case("NOW()"))
            .unwrap_or(false))
    }
}

fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
