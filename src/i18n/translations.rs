//! Site-wide UI strings loaded from `translations.json`.
//!
//! The file maps a language code to a nested object:
//!
//! ```json
//! { "tr": { "nav": { "home": "Ana Sayfa" } }, "en": { "nav": { "home": "Home" } } }
//! ```
//!
//! Lookups use dotted keys (`nav.home`) and fall back to Turkish.

use super::Lang;
use crate::log;
use serde_json::{Value, json};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq)]
pub struct Translations(Value);

impl Default for Translations {
    /// Minimal table used when `translations.json` cannot be read.
    fn default() -> Self {
        Self(json!({
            "tr": { "site": { "title": "ByCh4n Group" } },
            "en": { "site": { "title": "ByCh4n Group" } },
        }))
    }
}

impl Translations {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Load from disk, degrading to the built-in table on any failure.
    pub fn load(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str::<Value>(&text).map_err(anyhow::Error::from));

        match parsed {
            Ok(value) if value.is_object() => Self(value),
            Ok(_) => {
                log!("content"; "failed to load translations: top level is not an object");
                Self::default()
            }
            Err(err) => {
                log!("content"; "failed to load translations: {err}");
                Self::default()
            }
        }
    }

    /// Raw value at a dotted key, active language first, then Turkish.
    pub fn value(&self, lang: Lang, key: &str) -> Option<&Value> {
        let lookup = |code: &str| {
            key.split('.')
                .try_fold(self.0.get(code)?, |node, part| node.get(part))
                .filter(|value| !value.is_null())
        };
        lookup(lang.code()).or_else(|| lookup(Lang::Tr.code()))
    }

    /// Non-empty string at a dotted key.
    pub fn get(&self, lang: Lang, key: &str) -> Option<&str> {
        self.value(lang, key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// String at a dotted key, or `default` when missing.
    pub fn text(&self, lang: Lang, key: &str, default: &str) -> String {
        self.get(lang, key).unwrap_or(default).to_owned()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Translations {
        Translations::from_value(json!({
            "tr": {
                "nav": { "home": "Ana Sayfa", "blog": "Blog" },
                "hero": { "cta": { "primary": "Blog'u Keşfet" } },
                "features": { "items": [{ "title": "Eğitim" }] }
            },
            "en": {
                "nav": { "home": "Home" }
            }
        }))
    }

    #[test]
    fn test_dotted_lookup() {
        let t = sample();
        assert_eq!(t.get(Lang::Tr, "nav.home"), Some("Ana Sayfa"));
        assert_eq!(t.get(Lang::En, "nav.home"), Some("Home"));
        assert_eq!(t.get(Lang::Tr, "hero.cta.primary"), Some("Blog'u Keşfet"));
    }

    #[test]
    fn test_falls_back_to_turkish() {
        let t = sample();
        assert_eq!(t.get(Lang::En, "nav.blog"), Some("Blog"));
        assert_eq!(t.get(Lang::En, "hero.cta.primary"), Some("Blog'u Keşfet"));
    }

    #[test]
    fn test_missing_key_uses_default() {
        let t = sample();
        assert_eq!(t.get(Lang::Tr, "nav.missing"), None);
        assert_eq!(t.text(Lang::En, "footer.copyright", "All rights reserved"), "All rights reserved");
        assert_eq!(t.get(Lang::Tr, "nav.home.deeper"), None);
    }

    #[test]
    fn test_non_string_values() {
        let t = sample();
        let items = t.value(Lang::En, "features.items").unwrap();
        assert!(items.is_array());
        assert_eq!(t.get(Lang::Tr, "features.items"), None);
    }

    #[test]
    fn test_load_missing_file_uses_builtin() {
        let t = Translations::load(Path::new("/nonexistent/translations.json"));
        assert_eq!(t.get(Lang::En, "site.title"), Some("ByCh4n Group"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tr": {{"site": {{"title": "Test"}}}}}}"#).unwrap();

        let t = Translations::load(file.path());
        assert_eq!(t.get(Lang::En, "site.title"), Some("Test"));
    }

    #[test]
    fn test_load_malformed_file_uses_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();

        let t = Translations::load(file.path());
        assert_eq!(t, Translations::default());
    }
}
