//! Form state behind the interactive front end
//!
//! [`FormState`] owns everything the form displays: the four text inputs, the
//! history selector, and the active language. Front ends feed it user actions
//! and show whatever [`FormState::render_view`] returns.

use crate::error::{EtfError, EtfResult};
use crate::excel::ExcelExporter;
use crate::history::HistoryStore;
use crate::locale::{Label, Locale};
use crate::types::{Field, Record};
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub struct FormState {
    locale: Locale,
    inputs: Record,
    selection: Option<usize>,
    history: HistoryStore,
}

impl FormState {
    pub fn new(history: HistoryStore, locale: Locale) -> Self {
        Self {
            locale,
            inputs: Record::default(),
            selection: None,
            history,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn inputs(&self) -> &Record {
        &self.inputs
    }

    pub fn input(&self, field: Field) -> &str {
        self.inputs.get(field)
    }

    pub fn set_input(&mut self, field: Field, value: impl Into<String>) {
        self.inputs.set(field, value);
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Entries of the history selector: the ETF code of each record
    pub fn selector_entries(&self) -> Vec<&str> {
        self.history.codes()
    }

    /// Select a history entry; an out-of-range index clears the selection
    pub fn select(&mut self, index: usize) {
        self.selection = (index < self.history.len()).then_some(index);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Copy the selected record into the inputs
    pub fn load_selected(&mut self) -> EtfResult<()> {
        let record = self
            .selection
            .and_then(|i| self.history.get(i))
            .cloned()
            .ok_or(EtfError::NoSelection)?;
        self.inputs = record;
        debug!(index = ?self.selection, code = %self.inputs.code, "loaded history entry");
        Ok(())
    }

    /// Save the current inputs to history, returning the confirmation text
    pub fn save_current(&mut self) -> EtfResult<&'static str> {
        self.history.append_and_persist(&self.inputs)?;
        Ok(self.locale.saved_message())
    }

    /// Export the current inputs to a workbook at `path`
    pub fn generate(&self, path: &Path) -> EtfResult<&'static str> {
        ExcelExporter::new(self.inputs.clone())?.export(path)?;
        Ok(self.locale.generated_message())
    }

    /// Switch language; inputs and history are untouched
    pub fn toggle_language(&mut self) {
        self.locale = self.locale.toggled();
    }

    /// User-facing text for an error in the active language
    pub fn message_for(&self, error: &EtfError) -> String {
        self.locale.error_message(error)
    }

    /// All visible text of the form in the active language
    pub fn render_view(&self) -> String {
        let locale = self.locale;
        let mut lines = vec![locale.label(Label::Title).to_string(), String::new()];

        lines.extend(
            Field::ALL
                .iter()
                .map(|&field| format!("  {:<24}{}", field.label(locale), self.input(field))),
        );
        lines.push(String::new());

        lines.extend(self.selector_entries().iter().enumerate().map(|(i, code)| {
            let marker = if self.selection == Some(i) { '>' } else { ' ' };
            format!(" {} [{}] {}", marker, i, code)
        }));
        lines.push(String::new());

        lines.push(format!(
            "[{}]  [{}]  [{}]  [{}]",
            locale.label(Label::Load),
            locale.label(Label::Save),
            locale.label(Label::Generate),
            locale.label(Label::Language)
        ));

        let mut view = lines.join("\n");
        view.push('\n');
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn form_with(records: &[Record]) -> (TempDir, FormState) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        crate::history::save(&path, records).unwrap();
        let store = HistoryStore::open(&path).unwrap();
        (dir, FormState::new(store, Locale::Zh))
    }

    #[test]
    fn test_select_out_of_range_clears() {
        let (_dir, mut form) = form_with(&[Record::new("0050", "1", "1", "牛市")]);
        form.select(0);
        assert_eq!(form.selection(), Some(0));
        form.select(5);
        assert_eq!(form.selection(), None);
    }

    #[test]
    fn test_load_without_selection_keeps_inputs() {
        let (_dir, mut form) = form_with(&[Record::new("0050", "1", "1", "牛市")]);
        form.set_input(Field::Code, "draft");

        let err = form.load_selected().unwrap_err();
        assert!(matches!(err, EtfError::NoSelection));
        assert_eq!(form.input(Field::Code), "draft");
        assert_eq!(form.message_for(&err), "請選擇一筆資料");
    }

    #[test]
    fn test_render_view_line_layout() {
        let (_dir, mut form) = form_with(&[]);
        form.toggle_language();
        let view = form.render_view();
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "ETF Valuation Analysis System");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("  ETF Code"));
        assert!(lines[5].starts_with("  Market Trend"));
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "[Load]  [Save]  [Generate Excel]  [中文]");
        assert!(view.ends_with('\n'));
    }

    #[test]
    fn test_render_view_follows_locale() {
        let (_dir, mut form) = form_with(&[]);
        form.set_input(Field::Price, "150.5");

        let zh = form.render_view();
        assert!(zh.contains("ETF智能估值分析系統"));
        assert!(zh.contains("目前市價"));
        assert!(zh.contains("150.5"));

        form.toggle_language();
        let en = form.render_view();
        assert!(en.contains("ETF Valuation Analysis System"));
        assert!(en.contains("Market Price"));
        assert!(en.contains("150.5"));
        assert!(en.contains("[中文]"));
    }
}
