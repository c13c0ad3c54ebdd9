//! Excel exporter implementation - Record → fixed-layout worksheet

use crate::error::{EtfError, EtfResult};
use crate::types::{Field, Record, TREND_OPTIONS};
use rust_xlsxwriter::{
    Color, DataValidation, Format, FormatPattern, Formula, Workbook, Worksheet, XlsxError,
};
use std::path::Path;
use tracing::info;

/// Default output file, relative to the working directory
pub const DEFAULT_WORKBOOK_FILE: &str = "ETF估值分析.xlsx";

pub const SHEET_NAME: &str = "ETF分析工具";
pub const TITLE: &str = "ETF智能估值分析系統";
pub const SECTION_HEADER: &str = "📌 基本資料輸入";
pub const TIMESTAMP_LABEL: &str = "✅ 產出時間";
pub const TIMESTAMP_FORMULA: &str = "=NOW()";

/// Title fill (steel blue)
pub const TITLE_FILL: u32 = 0x4682B4;

// Worksheet positions are 0-indexed: row 0 is Excel row 1, col 0 is column A.
pub(crate) const TITLE_LAST_COL: u16 = 7;
pub(crate) const SECTION_ROW: u32 = 2;
pub(crate) const FIRST_FIELD_ROW: u32 = 3;
pub(crate) const LABEL_COL: u16 = 0;
pub(crate) const VALUE_COL: u16 = 1;
pub(crate) const TIMESTAMP_ROW: u32 = 9;

/// Worksheet row holding `field`
pub(crate) fn field_row(field: Field) -> u32 {
    let offset = Field::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default();
    FIRST_FIELD_ROW + offset as u32
}

fn export_err(what: &str) -> impl Fn(XlsxError) -> EtfError + '_ {
    move |e| EtfError::Export(format!("Failed to {}: {}", what, e))
}

/// Excel exporter for a single ETF record
///
/// Construction checks that price and NAV parse as numbers, so a workbook is
/// never rendered for non-numeric input.
#[derive(Debug)]
pub struct ExcelExporter {
    record: Record,
}

impl ExcelExporter {
    /// Create an exporter, rejecting non-numeric price or NAV
    pub fn new(record: Record) -> EtfResult<Self> {
        record.check_numeric()?;
        Ok(Self { record })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Build the workbook in memory
    pub fn render(&self) -> EtfResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(export_err("set worksheet name"))?;

        self.write_title(worksheet)?;
        self.write_fields(worksheet)?;
        self.write_trend_dropdown(worksheet)?;
        self.write_timestamp(worksheet)?;

        Ok(workbook)
    }

    /// Render and save to `output_path`, replacing any existing file
    pub fn export(&self, output_path: &Path) -> EtfResult<()> {
        let mut workbook = self.render()?;
        workbook
            .save(output_path)
            .map_err(|e| EtfError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(
            code = %self.record.code,
            path = %output_path.display(),
            "workbook generated"
        );
        Ok(())
    }

    /// Render to an in-memory .xlsx file
    pub fn to_buffer(&self) -> EtfResult<Vec<u8>> {
        let mut workbook = self.render()?;
        workbook
            .save_to_buffer()
            .map_err(export_err("serialize workbook"))
    }

    fn write_title(&self, worksheet: &mut Worksheet) -> EtfResult<()> {
        let title_format = Format::new()
            .set_bold()
            .set_font_size(16)
            .set_font_color(Color::White)
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(TITLE_FILL));

        worksheet
            .merge_range(0, 0, 0, TITLE_LAST_COL, TITLE, &title_format)
            .map_err(export_err("write title"))?;

        let section_format = Format::new().set_bold().set_font_size(12);
        worksheet
            .write_string_with_format(SECTION_ROW, LABEL_COL, SECTION_HEADER, &section_format)
            .map_err(export_err("write section header"))?;

        Ok(())
    }

    fn write_fields(&self, worksheet: &mut Worksheet) -> EtfResult<()> {
        for field in Field::ALL {
            let row = field_row(field);
            worksheet
                .write_string(row, LABEL_COL, field.key())
                .map_err(export_err("write field label"))?;
            worksheet
                .write_string(row, VALUE_COL, self.record.get(field))
                .map_err(export_err("write field value"))?;
        }
        Ok(())
    }

    fn write_trend_dropdown(&self, worksheet: &mut Worksheet) -> EtfResult<()> {
        let row = field_row(Field::Trend);
        worksheet
            .write_string(row, VALUE_COL, &self.record.trend)
            .map_err(export_err("write trend"))?;

        let validation = DataValidation::new()
            .allow_list_strings(&TREND_OPTIONS)
            .map_err(export_err("build trend list"))?;
        worksheet
            .add_data_validation(row, VALUE_COL, row, VALUE_COL, &validation)
            .map_err(export_err("add data validation"))?;

        Ok(())
    }

    fn write_timestamp(&self, worksheet: &mut Worksheet) -> EtfResult<()> {
        worksheet
            .write_string(TIMESTAMP_ROW, LABEL_COL, TIMESTAMP_LABEL)
            .map_err(export_err("write timestamp label"))?;
        worksheet
            .write_formula(TIMESTAMP_ROW, VALUE_COL, Formula::new(TIMESTAMP_FORMULA))
            .map_err(export_err("write timestamp formula"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rows() {
        assert_eq!(field_row(Field::Code), 3);
        assert_eq!(field_row(Field::Price), 4);
        assert_eq!(field_row(Field::Nav), 5);
        assert_eq!(field_row(Field::Trend), 6);
    }

    #[test]
    fn test_new_rejects_non_numeric_price() {
        let result = ExcelExporter::new(Record::new("0050", "abc", "149.8", "牛市"));
        assert!(matches!(
            result,
            Err(EtfError::NonNumeric {
                field: Field::Price,
                ..
            })
        ));
    }

    #[test]
    fn test_render_to_buffer() {
        let exporter = ExcelExporter::new(Record::new("0050", "150.5", "149.8", "牛市")).unwrap();
        let bytes = exporter.to_buffer().unwrap();
        // .xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }
}
