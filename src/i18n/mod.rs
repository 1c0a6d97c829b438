//! UI text translation for the static pages (English/Thai).
//!
//! Independent of the blog build. Pages mark translatable elements with
//! `data-i18n="<dotted.key>"`; a [`Translator`] resolves every marked element
//! against a [`Dictionary`] and writes the result back through the
//! [`Document`] abstraction, then persists the active language in a
//! [`LanguageStore`].
//!
//! | Piece | Role |
//! |---|---|
//! | [`Dictionary`] | Nested TOML tables flattened once into `(lang, "a.b.c")` keys |
//! | [`Lang`] | The two supported languages |
//! | [`LanguageStore`] | Durable `language` preference ([`MemoryStore`], [`JsonFileStore`]) |
//! | [`Document`] / [`Element`] | Minimal DOM surface; [`StaticDocument`] in memory |
//! | [`Translator`] | Scan, translate, toggle |

mod dictionary;
mod dom;
mod store;
mod translator;

pub use dictionary::Dictionary;
pub use dom::{Document, Element, StaticDocument, StaticElement};
pub use store::{JsonFileStore, LANGUAGE_KEY, LanguageStore, MemoryStore};
pub use translator::{I18N_ATTRIBUTE, LANG_TOGGLE_ID, Translator};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("translation '{key}' must be a string")]
    NotAString { key: String },
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    En,
    /// Used on a first visit.
    #[default]
    Th,
}

impl Lang {
    /// Lookups missing from the active language retry here.
    pub const FALLBACK: Lang = Lang::En;

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Th => "th",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::En => Self::Th,
            Self::Th => Self::En,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "th" => Ok(Self::Th),
            other => Err(I18nError::UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_toggle() {
        assert_eq!(Lang::En.code(), "en");
        assert_eq!(Lang::Th.to_string(), "th");
        assert_eq!(Lang::En.toggle(), Lang::Th);
        assert_eq!(Lang::Th.toggle().toggle(), Lang::Th);
        assert_eq!(Lang::default(), Lang::Th);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("EN".parse::<Lang>().unwrap(), Lang::En);
        assert_eq!(" th ".parse::<Lang>().unwrap(), Lang::Th);
        assert!(matches!(
            "de".parse::<Lang>(),
            Err(I18nError::UnknownLanguage(code)) if code == "de"
        ));
    }
}
