//! Shareable view state in the URL query string.
//!
//! ```text
//! /docs.html?doc=git-basics&search=branch
//! /blog.html?filter=python&page=2
//! ```
//!
//! Empty values are dropped when writing and `page=1` is implied.

use crate::{i18n::Lang, log};
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    pub search: Option<String>,
    pub doc: Option<String>,
    pub filter: Option<String>,
    pub page: Option<usize>,
    pub lang: Option<Lang>,
}

impl UrlState {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown keys are ignored; malformed values are logged and skipped.
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(value) = decode(raw) else {
                log!("url"; "ignoring undecodable `{key}`");
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key {
                "search" => state.search = Some(value.to_owned()),
                "doc" => state.doc = Some(value.to_owned()),
                "filter" => state.filter = Some(value.to_owned()),
                "page" => match value.parse::<usize>() {
                    Ok(page) if page > 0 => state.page = Some(page),
                    _ => log!("url"; "ignoring page `{value}`"),
                },
                "lang" => match Lang::parse(value) {
                    Some(lang) => state.lang = Some(lang),
                    None => log!("url"; "ignoring unsupported language `{value}`"),
                },
                _ => {}
            }
        }
        state
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query string without the `?`; empty when there is nothing to share.
    pub fn to_query(&self) -> String {
        let page = self.page.filter(|&page| page > 1).map(|page| page.to_string());
        let pairs = [
            ("doc", self.doc.as_deref()),
            ("search", self.search.as_deref()),
            ("filter", self.filter.as_deref().filter(|&filter| filter != "all")),
            ("page", page.as_deref()),
            ("lang", self.lang.map(Lang::code)),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path` with this state appended.
    pub fn to_url(&self, path: &str) -> String {
        match self.to_query() {
            query if query.is_empty() => path.to_owned(),
            query => format!("{path}?{query}"),
        }
    }
}

/// Form decoding: `+` is a space.
fn decode(raw: &str) -> Option<String> {
    let raw: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&raw).ok().map(Cow::into_owned)
}

/// Permanent link to a document.
pub fn share_link(base: &str, doc_id: &str) -> String {
    format!(
        "{}/docs.html?doc={}",
        base.trim_end_matches('/'),
        urlencoding::encode(doc_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let state = UrlState::parse("?filter=python&search=g%C3%BC%C3%A7l%C3%BC+kod&page=2&lang=en");
        assert_eq!(state.filter.as_deref(), Some("python"));
        assert_eq!(state.search.as_deref(), Some("güçlü kod"));
        assert_eq!(state.page, Some(2));
        assert_eq!(state.lang, Some(Lang::En));
        assert!(state.doc.is_none());
    }

    #[test]
    fn test_parse_skips_malformed() {
        let state = UrlState::parse("page=abc&lang=de&doc=&search=%FF&unknown=1");
        assert!(state.is_empty());

        let state = UrlState::parse("page=0&doc");
        assert!(state.is_empty());
    }

    #[test]
    fn test_to_query_omits_defaults() {
        let state = UrlState {
            doc: Some("git basics".into()),
            search: Some(String::new()),
            filter: Some("all".into()),
            page: Some(1),
            lang: None,
        };
        assert_eq!(state.to_query(), "doc=git%20basics");
        assert_eq!(state.to_url("/docs.html"), "/docs.html?doc=git%20basics");
        assert_eq!(UrlState::default().to_url("/docs.html"), "/docs.html");
    }

    #[test]
    fn test_query_round_trip() {
        let state = UrlState {
            search: Some("c++ & rust".into()),
            filter: Some("tutorial".into()),
            page: Some(3),
            ..UrlState::default()
        };
        assert_eq!(UrlState::parse(&state.to_query()), state);
    }

    #[test]
    fn test_share_link() {
        assert_eq!(
            share_link("https://bych4n-group.github.io/", "getting-started"),
            "https://bych4n-group.github.io/docs.html?doc=getting-started"
        );
    }
}
