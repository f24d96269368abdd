//! The closed set of languages the translator works with.

use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the translator can read or produce.
///
/// Serialized as its short code (`"en"` / `"ko"`), which is what the
/// translation endpoints expect in the `from`/`to` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ko")]
    Korean,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Korean];

    /// Short ISO 639-1 code (`en`, `ko`)
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Korean => "ko",
        }
    }

    /// English display name
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Korean => "Korean",
        }
    }

    /// The other member of the pair
    pub fn other(self) -> Language {
        match self {
            Language::English => Language::Korean,
            Language::Korean => Language::English,
        }
    }

    fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::English),
            "ko" => Some(Language::Korean),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names neither English nor Korean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLanguage(pub String);

impl fmt::Display for UnsupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported language '{}' (expected one of: en, ko)",
            self.0
        )
    }
}

impl std::error::Error for UnsupportedLanguage {}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    /// Accepts short codes, BCP 47 tags (`ko-KR`, `en-US`) and the English
    /// names. Only the base language subtag of a tag is considered.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "english" => return Ok(Language::English),
            "korean" => return Ok(Language::Korean),
            _ => {}
        }

        let locale: Locale = trimmed
            .parse()
            .map_err(|_| UnsupportedLanguage(trimmed.to_string()))?;

        Language::from_code(locale.id.language.as_str())
            .ok_or_else(|| UnsupportedLanguage(trimmed.to_string()))
    }
}
