//! Everything a page controller renders from.

use crate::{
    config::SiteConfig,
    content::{ContentStores, query::read_time},
    i18n::{Lang, Phrase, PreferenceStore, Translations},
    utils::date::DateTimeUtc,
};

/// Explicitly constructed and passed to every controller.
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    pub content: &'a ContentStores,
    pub prefs: &'a PreferenceStore,
    lang: Lang,
}

impl<'a> SiteContext<'a> {
    pub fn new(
        config: &'a SiteConfig,
        content: &'a ContentStores,
        prefs: &'a PreferenceStore,
        lang: Lang,
    ) -> Self {
        Self {
            config,
            content,
            prefs,
            lang,
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Switch language and persist the choice. Returns `false` when unchanged.
    pub fn set_language(&mut self, lang: Lang) -> bool {
        if lang == self.lang {
            return false;
        }
        self.lang = lang;
        self.prefs.set(&self.config.i18n.storage_key, lang.code());
        true
    }

    pub fn translations(&self) -> &'a Translations {
        &self.content.translations
    }

    /// Translated text for a dotted key, or `default`.
    pub fn t(&self, key: &str, default: &str) -> String {
        self.translations().text(self.lang, key, default)
    }

    pub fn phrase(&self, phrase: Phrase) -> &'static str {
        phrase.text(self.lang)
    }

    /// Site-absolute link to `path` in the current language.
    pub fn href(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.lang.url_prefix(self.config.i18n.default_language)
        )
    }

    /// Localized long date; empty for missing or malformed dates.
    pub fn format_date(&self, date: Option<&str>) -> String {
        date.and_then(DateTimeUtc::parse)
            .map(|date| date.format_long(self.lang))
            .unwrap_or_default()
    }

    pub fn read_time(&self, content: &str) -> usize {
        read_time(content, self.config.listing.words_per_minute)
    }
}
