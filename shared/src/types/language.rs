//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language a subscriber receives newsletters in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "uk")]
    Ukrainian,
    #[serde(rename = "he")]
    Hebrew,
    #[serde(rename = "ar")]
    Arabic,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Ukrainian => "uk",
            Language::Hebrew => "he",
            Language::Arabic => "ar",
        }
    }

    /// Check if language uses right-to-left script
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Hebrew | Language::Arabic)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "ru" | "rus" | "russian" => Ok(Language::Russian),
            "uk" | "ukr" | "ua" | "ukrainian" => Ok(Language::Ukrainian),
            "he" | "heb" | "hebrew" => Ok(Language::Hebrew),
            "ar" | "ara" | "arabic" => Ok(Language::Arabic),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
