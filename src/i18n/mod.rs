//! Turkish/English localisation.
//!
//! - [`Lang`] and [`Localized`]: supported languages and per-language text
//! - [`Translations`]: `translations.json` with dotted-key lookup
//! - [`PreferenceStore`]: persisted language preference
//! - [`Phrase`]: fixed interface strings

mod lang;
mod phrases;
mod storage;
mod translations;

pub use lang::{Lang, Localized};
pub use phrases::{Phrase, project_count, status_label};
pub use storage::PreferenceStore;
pub use translations::Translations;

/// Choose the display language.
///
/// Order: a stored supported preference, then an `/en/` path prefix, then
/// the first two letters of the browser language, then Turkish.
pub fn detect_language(stored: Option<&str>, path: &str, accept_language: Option<&str>) -> Lang {
    if let Some(lang) = stored.and_then(Lang::parse) {
        return lang;
    }
    if path.starts_with("/en/") {
        return Lang::En;
    }
    accept_language
        .and_then(|header| header.get(..2))
        .and_then(Lang::parse)
        .unwrap_or_default()
}

/// Display name of a blog category slug; unknown slugs are returned as-is.
pub fn category_label(slug: &str, lang: Lang) -> String {
    let label = match (slug, lang) {
        ("web-development", Lang::Tr) => "Web Geliştirme",
        ("web-development", Lang::En) => "Web Development",
        ("javascript", _) => "JavaScript",
        ("python", _) => "Python",
        ("tutorial", Lang::Tr) => "Eğitim",
        ("tutorial", Lang::En) => "Tutorial",
        ("open-source", Lang::Tr) => "Açık Kaynak",
        ("open-source", Lang::En) => "Open Source",
        (other, _) => other,
    };
    label.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_stored() {
        assert_eq!(detect_language(Some("en"), "/", Some("tr-TR")), Lang::En);
        assert_eq!(detect_language(Some("tr"), "/en/blog.html", None), Lang::Tr);
    }

    #[test]
    fn test_detect_ignores_unsupported_stored() {
        assert_eq!(detect_language(Some("de"), "/en/docs.html", None), Lang::En);
    }

    #[test]
    fn test_detect_path_then_browser() {
        assert_eq!(detect_language(None, "/en/", Some("tr")), Lang::En);
        assert_eq!(detect_language(None, "/en", Some("tr")), Lang::Tr);
        assert_eq!(detect_language(None, "/", Some("en-US,en;q=0.9")), Lang::En);
        assert_eq!(detect_language(None, "/", Some("de-DE")), Lang::Tr);
        assert_eq!(detect_language(None, "/", None), Lang::Tr);
        assert_eq!(detect_language(None, "/", Some("e")), Lang::Tr);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("web-development", Lang::Tr), "Web Geliştirme");
        assert_eq!(category_label("open-source", Lang::En), "Open Source");
        assert_eq!(category_label("rust", Lang::En), "rust");
    }
}
