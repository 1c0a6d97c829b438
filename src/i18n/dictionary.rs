//! The flattened translation table.

use super::{I18nError, Lang};
use std::collections::HashMap;

const BUILTIN: &str = include_str!("../../static/translations.toml");

/// Translations keyed by language code and dotted path.
///
/// ```toml
/// [en.contact]
/// success = "Thank you!"
/// ```
///
/// becomes `("en", "contact.success") → "Thank you!"`.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<(String, String), String>,
}

impl Dictionary {
    /// Parse a dictionary whose top-level tables are language codes.
    pub fn from_toml(content: &str) -> Result<Self, I18nError> {
        let root: toml::Table = toml::from_str(content)?;
        let mut entries = HashMap::new();
        for (lang, value) in root {
            flatten(&lang, String::new(), value, &mut entries)?;
        }
        Ok(Self { entries })
    }

    /// The dictionary shipped with the site.
    pub fn builtin() -> Result<Self, I18nError> {
        Self::from_toml(BUILTIN)
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&(lang.to_string(), key.to_string()))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolve `key` in `lang`, then in [`Lang::FALLBACK`], else return the
    /// key unchanged.
    ///
    /// `lang` may be any code, including one with no table at all.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.lookup(lang, key)
            .or_else(|| self.lookup(Lang::FALLBACK.code(), key))
            .unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(
    lang: &str,
    prefix: String,
    value: toml::Value,
    out: &mut HashMap<(String, String), String>,
) -> Result<(), I18nError> {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(lang, path, child, out)?;
            }
            Ok(())
        }
        toml::Value::String(text) => {
            out.insert((lang.to_string(), prefix), text);
            Ok(())
        }
        _ => Err(I18nError::NotAString {
            key: format!("{lang}.{prefix}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_parses() {
        let dict = Dictionary::builtin().unwrap();
        assert!(!dict.is_empty());
        assert_eq!(dict.translate("en", "nav.contact"), "CONTACT");
    }

    #[test]
    fn nested_keys_flatten_to_dotted_paths() {
        let dict = Dictionary::builtin().unwrap();
        assert_eq!(dict.translate("th", "about.languages.thai"), "ภาษาแม่");
        assert_eq!(dict.translate("en", "about.languages.thai"), "Native");
        assert_eq!(dict.translate("en", "automation.cicd.title"), "CI/CD");
    }

    #[test]
    fn selected_language_wins() {
        let dict = Dictionary::builtin().unwrap();
        assert_eq!(
            dict.translate("th", "contact.success"),
            "ขอบคุณ! ข้อความของคุณถูกส่งเรียบร้อยแล้ว"
        );
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let dict = Dictionary::builtin().unwrap();
        assert_eq!(
            dict.translate("de", "contact.success"),
            "Thank you! Your message has been sent successfully."
        );
    }

    #[test]
    fn key_missing_from_language_falls_back_to_english() {
        let dict = Dictionary::builtin().unwrap();
        assert_eq!(dict.translate("th", "contact.send"), "Send Message");
    }

    #[test]
    fn absent_key_returns_key() {
        let dict = Dictionary::builtin().unwrap();
        assert_eq!(dict.translate("th", "no.such.key"), "no.such.key");
        assert_eq!(dict.translate("en", "contact"), "contact");
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let dict = Dictionary::from_toml(
            r#"
            [en]
            greeting = "Hello"
            blank = ""
            [th]
            greeting = ""
            "#,
        )
        .unwrap();
        assert_eq!(dict.translate("th", "greeting"), "Hello");
        assert_eq!(dict.translate("en", "blank"), "blank");
    }

    #[test]
    fn non_string_leaf_is_rejected() {
        let err = Dictionary::from_toml("[en]\ncount = 3").unwrap_err();
        assert!(matches!(err, I18nError::NotAString { ref key } if key == "en.count"));
    }
}
