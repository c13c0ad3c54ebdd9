use crate::locale::Locale;
use crate::types::Field;
use thiserror::Error;

pub type EtfResult<T> = Result<T, EtfError>;

#[derive(Error, Debug)]
pub enum EtfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} cannot be empty", .0.label(Locale::En))]
    EmptyField(Field),

    #[error("{} is not a valid number: {value:?}", .field.label(Locale::En))]
    NonNumeric { field: Field, value: String },

    #[error("No history entry selected")]
    NoSelection,

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),
}

impl EtfError {
    /// Errors the form recovers from by showing a message and leaving state as-is
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EtfError::EmptyField(_) | EtfError::NonNumeric { .. } | EtfError::NoSelection
        )
    }
}
