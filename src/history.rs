//! Append-only JSON history of saved records

use crate::error::EtfResult;
use crate::types::Record;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default history location, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Read the history file, or return an empty list if it does not exist
pub fn load(path: &Path) -> EtfResult<Vec<Record>> {
    if !path.exists() {
        debug!(path = %path.display(), "history file absent, starting empty");
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), count = records.len(), "loaded history");
    Ok(records)
}

/// Overwrite the history file with `records`
///
/// Output is UTF-8, two-space indented, with non-ASCII text kept literal.
pub fn save(path: &Path, records: &[Record]) -> EtfResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    debug!(path = %path.display(), count = records.len(), "saved history");
    Ok(())
}

/// In-memory history bound to its backing file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl HistoryStore {
    /// Load the history at `path` (empty if the file is missing)
    pub fn open<P: AsRef<Path>>(path: P) -> EtfResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = load(&path)?;
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// ETF codes in insertion order, as shown in the history selector
    pub fn codes(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.code.as_str()).collect()
    }

    /// Rewrite the backing file with the in-memory records
    pub fn save(&self) -> EtfResult<()> {
        save(&self.path, &self.records)
    }

    /// Validate, append, and persist a record
    ///
    /// Every field must be non-empty after trimming; the trimmed record is
    /// stored. On a validation or write failure the in-memory history is left
    /// as it was.
    pub fn append_and_persist(&mut self, record: &Record) -> EtfResult<&Record> {
        let record = record.validated()?;
        self.records.push(record);

        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }

        let index = self.records.len() - 1;
        info!(code = %self.records[index].code, index, "record saved to history");
        Ok(&self.records[index])
    }
}
