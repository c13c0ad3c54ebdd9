//! ETF Valuation - record ETF quotes and export a templated Excel worksheet
//!
//! This library keeps an append-only JSON history of ETF records and renders
//! any record into a fixed-layout workbook.
//!
//! # Features
//!
//! - Four-field ETF record (code, market price, NAV, market trend)
//! - JSON history file, rewritten on every save, non-ASCII kept literal
//! - Excel export with styled title, trend dropdown, and live `NOW()` timestamp
//! - Chinese / English interface labels
//!
//! # Example
//!
//! ```no_run
//! use etf_valuation::excel::ExcelExporter;
//! use etf_valuation::history::HistoryStore;
//! use etf_valuation::types::Record;
//! use std::path::Path;
//!
//! let mut history = HistoryStore::open("history.json")?;
//! let record = Record::new("0050", "150.5", "149.8", "牛市");
//! history.append_and_persist(&record)?;
//!
//! ExcelExporter::new(record)?.export(Path::new("ETF估值分析.xlsx"))?;
//! # Ok::<(), etf_valuation::error::EtfError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod history;
pub mod locale;
pub mod shell;
pub mod types;

// Re-export commonly used types
pub use error::{EtfError, EtfResult};
pub use history::HistoryStore;
pub use locale::Locale;
pub use shell::FormState;
pub use types::{Field, Record};
