use crate::error::{EtfError, EtfResult};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

//==============================================================================
// Field Descriptors
//==============================================================================

/// One of the four fixed inputs of an ETF record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    Price,
    Nav,
    Trend,
}

impl Field {
    /// All fields in form / workbook order
    pub const ALL: [Field; 4] = [Field::Code, Field::Price, Field::Nav, Field::Trend];

    /// Key used in the history file and as the workbook label
    pub fn key(self) -> &'static str {
        match self {
            Field::Code => "ETF代碼",
            Field::Price => "目前市價",
            Field::Nav => "淨資產價值(NAV)",
            Field::Trend => "市場趨勢",
        }
    }

    /// Display label for the given locale
    pub fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Zh => self.key(),
            Locale::En => match self {
                Field::Code => "ETF Code",
                Field::Price => "Market Price",
                Field::Nav => "Net Asset Value (NAV)",
                Field::Trend => "Market Trend",
            },
        }
    }

    /// Short ASCII identifier, used on the command line
    pub fn id(self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Price => "price",
            Field::Nav => "nav",
            Field::Trend => "trend",
        }
    }

    /// Resolve a field from its identifier, key, or English label (case-insensitive)
    pub fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.into_iter().find(|f| {
            f.id().eq_ignore_ascii_case(name)
                || f.key() == name
                || f.label(Locale::En).eq_ignore_ascii_case(name)
        })
    }

    /// Whether the workbook export requires this field to parse as a number
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Price | Field::Nav)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Dropdown options for the market-trend cell: bull, bear, oscillating, neutral
pub const TREND_OPTIONS: [&str; 4] = ["牛市", "熊市", "震盪", "中性"];

//==============================================================================
// Record
//==============================================================================

/// A saved ETF data entry
///
/// Serialized with the fixed Chinese keys in descriptor order. Missing keys
/// read as empty strings and are written back as `""`. Unknown keys found in
/// the history file are kept in `extra` and written back after the fixed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ETF代碼", default)]
    pub code: String,
    #[serde(rename = "目前市價", default)]
    pub price: String,
    #[serde(rename = "淨資產價值(NAV)", default)]
    pub nav: String,
    #[serde(rename = "市場趨勢", default)]
    pub trend: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(
        code: impl Into<String>,
        price: impl Into<String>,
        nav: impl Into<String>,
        trend: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            price: price.into(),
            nav: nav.into(),
            trend: trend.into(),
            extra: Map::new(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Code => &self.code,
            Field::Price => &self.price,
            Field::Nav => &self.nav,
            Field::Trend => &self.trend,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Code => &mut self.code,
            Field::Price => &mut self.price,
            Field::Nav => &mut self.nav,
            Field::Trend => &mut self.trend,
        };
        *slot = value.into();
    }

    /// Trim every field and reject the first one left empty
    ///
    /// The result holds only the four fields, like a freshly typed entry.
    pub fn validated(&self) -> EtfResult<Record> {
        let mut trimmed = Record::default();
        for field in Field::ALL {
            let value = self.get(field).trim();
            if value.is_empty() {
                return Err(EtfError::EmptyField(field));
            }
            trimmed.set(field, value);
        }
        Ok(trimmed)
    }

    /// Parse a numeric field, tolerating surrounding whitespace and single
    /// `_` separators between digits (`1_000.5`)
    pub fn parse_number(&self, field: Field) -> EtfResult<f64> {
        let raw = self.get(field);
        strip_digit_separators(raw.trim())
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| EtfError::NonNumeric {
                field,
                value: raw.to_string(),
            })
    }

    /// Check that price and NAV both parse as floating-point numbers
    pub fn check_numeric(&self) -> EtfResult<()> {
        for field in Field::ALL.into_iter().filter(|f| f.is_numeric()) {
            self.parse_number(field)?;
        }
        Ok(())
    }
}

/// Remove `_` separators; `None` if one is not between two ASCII digits
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        out.push(c);
    }
    Some(out)
}
