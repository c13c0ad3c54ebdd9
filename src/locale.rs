//! Label dictionaries for the two interface languages

use crate::error::EtfError;
use std::fmt;
use std::str::FromStr;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Traditional Chinese
    #[default]
    Zh,
    /// English
    En,
}

/// Fixed interface captions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    Load,
    Save,
    Generate,
    /// Caption of the language toggle, naming the *other* language
    Language,
}

impl Locale {
    pub fn toggled(self) -> Locale {
        match self {
            Locale::Zh => Locale::En,
            Locale::En => Locale::Zh,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn label(self, label: Label) -> &'static str {
        match (self, label) {
            (Locale::Zh, Label::Title) => "ETF智能估值分析系統",
            (Locale::Zh, Label::Load) => "載入",
            (Locale::Zh, Label::Save) => "儲存",
            (Locale::Zh, Label::Generate) => "產生Excel",
            (Locale::Zh, Label::Language) => "English",
            (Locale::En, Label::Title) => "ETF Valuation Analysis System",
            (Locale::En, Label::Load) => "Load",
            (Locale::En, Label::Save) => "Save",
            (Locale::En, Label::Generate) => "Generate Excel",
            (Locale::En, Label::Language) => "中文",
        }
    }

    pub fn saved_message(self) -> &'static str {
        match self {
            Locale::Zh => "儲存成功",
            Locale::En => "Saved successfully!",
        }
    }

    pub fn generated_message(self) -> &'static str {
        match self {
            Locale::Zh => "Excel 產生成功",
            Locale::En => "Excel generated successfully!",
        }
    }

    /// User-facing text for an error in this language
    pub fn error_message(self, error: &EtfError) -> String {
        match error {
            EtfError::EmptyField(field) => match self {
                Locale::Zh => format!("{} 不能為空", field.label(self)),
                Locale::En => format!("{} cannot be empty!", field.label(self)),
            },
            EtfError::NonNumeric { .. } => match self {
                Locale::Zh => "請確認價格欄位為數字".to_string(),
                Locale::En => "Please ensure prices are valid numbers!".to_string(),
            },
            EtfError::NoSelection => match self {
                Locale::Zh => "請選擇一筆資料".to_string(),
                Locale::En => "Please select an entry".to_string(),
            },
            other => match self {
                Locale::Zh => format!("操作失敗: {}", other),
                Locale::En => format!("Operation failed: {}", other),
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "zh-tw" | "中文" => Ok(Locale::Zh),
            "en" | "en-us" | "english" => Ok(Locale::En),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}
