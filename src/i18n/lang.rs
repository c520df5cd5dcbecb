//! Supported languages and per-language text.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A supported site language. Turkish is the primary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Tr,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Tr, Lang::En];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }

    /// Parse a two-letter code; anything unsupported is `None`.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "tr" => Some(Self::Tr),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// BCP 47 locale used in `<html lang>` and feed metadata.
    pub const fn locale(self) -> &'static str {
        match self {
            Self::Tr => "tr-TR",
            Self::En => "en-US",
        }
    }

    /// Path prefix of this language's pages relative to the site root.
    ///
    /// The default language lives at the root; the other one under `/{code}`.
    pub fn url_prefix(self, default: Lang) -> String {
        if self == default {
            String::new()
        } else {
            format!("/{}", self.code())
        }
    }

    /// Display name for the language switcher.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tr => "TR",
            Self::En => "EN",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text keyed by language code.
///
/// Data files may give either a map (`{"tr": "…", "en": "…"}`) or a plain
/// string, which is treated as the Turkish value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocalizedRepr")]
pub struct Localized(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    Map(BTreeMap<String, String>),
}

impl From<LocalizedRepr> for Localized {
    fn from(repr: LocalizedRepr) -> Self {
        match repr {
            LocalizedRepr::Plain(text) => Self::single(text),
            LocalizedRepr::Map(map) => Self(map),
        }
    }
}

impl Localized {
    /// Same text for every language.
    pub fn single(text: impl Into<String>) -> Self {
        Self(BTreeMap::from([(Lang::Tr.code().to_owned(), text.into())]))
    }

    pub fn new(tr: impl Into<String>, en: impl Into<String>) -> Self {
        Self(BTreeMap::from([
            (Lang::Tr.code().to_owned(), tr.into()),
            (Lang::En.code().to_owned(), en.into()),
        ]))
    }

    /// Active-language text, else Turkish, else empty.
    pub fn get(&self, lang: Lang) -> &str {
        self.0
            .get(lang.code())
            .filter(|text| !text.is_empty())
            .or_else(|| self.0.get(Lang::Tr.code()))
            .map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_parse() {
        assert_eq!(Lang::parse("tr"), Some(Lang::Tr));
        assert_eq!(Lang::parse("EN"), Some(Lang::En));
        assert_eq!(Lang::parse("de"), None);
        assert_eq!(Lang::parse(""), None);
    }

    #[test]
    fn test_url_prefix() {
        assert_eq!(Lang::Tr.url_prefix(Lang::Tr), "");
        assert_eq!(Lang::En.url_prefix(Lang::Tr), "/en");
        assert_eq!(Lang::Tr.url_prefix(Lang::En), "/tr");
    }

    #[test]
    fn test_localized_fallback() {
        let text: Localized = serde_json::from_str(r#"{"tr": "Merhaba"}"#).unwrap();
        assert_eq!(text.get(Lang::En), "Merhaba");

        let text: Localized = serde_json::from_str(r#"{"tr": "Merhaba", "en": ""}"#).unwrap();
        assert_eq!(text.get(Lang::En), "Merhaba");

        let text: Localized = serde_json::from_str(r#"{"en": "Hello"}"#).unwrap();
        assert_eq!(text.get(Lang::Tr), "");
        assert_eq!(text.get(Lang::En), "Hello");
    }

    #[test]
    fn test_localized_plain_string() {
        let text: Localized = serde_json::from_str(r#""Rust""#).unwrap();
        assert_eq!(text.get(Lang::Tr), "Rust");
        assert_eq!(text.get(Lang::En), "Rust");
    }

    #[test]
    fn test_localized_serializes_as_map() {
        let text = Localized::new("Merhaba", "Hello");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"en":"Hello","tr":"Merhaba"}"#);
    }
}
