//! Excel workbook template
//!
//! - Export: Record → fixed-layout .xlsx (styled title, trend dropdown, live timestamp)
//! - Import: generated .xlsx → Record

mod exporter;
mod importer;

pub use exporter::{
    ExcelExporter, DEFAULT_WORKBOOK_FILE, SECTION_HEADER, SHEET_NAME, TIMESTAMP_FORMULA,
    TIMESTAMP_LABEL, TITLE, TITLE_FILL,
};
pub use importer::ExcelImporter;
