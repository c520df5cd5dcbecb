//! Filtering, search and pagination over ordered records.
//!
//! ```text
//! records ──► filter (category/tag) ──► search (substring) ──► page slice
//! ```
//!
//! The input order is preserved; the store sorts once at load time.

use super::types::{Doc, Record};
use crate::i18n::Lang;
use rustc_hash::FxHashMap;

// ============================================================================
// View State
// ============================================================================

/// Category or tag restriction of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Token(String),
}

impl Filter {
    /// `all` and the empty string mean no restriction.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "" | "all" => Self::All,
            token => Self::Token(token.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Token(token) => token,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn accepts<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::All => true,
            Self::Token(token) => record.matches_token(token),
        }
    }
}

/// Per-listing query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: Filter,
    search: String,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: Filter::All,
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Lower-cased search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_lowercase();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Back to the unfiltered first page.
    pub fn clear(&mut self) {
        self.filter = Filter::All;
        self.search.clear();
        self.page = 1;
    }

    pub fn is_default(&self) -> bool {
        self.filter.is_all() && self.search.is_empty() && self.page == 1
    }
}

/// How a page of results is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageMode {
    /// Only the current page.
    #[default]
    Replace,
    /// Everything up to the current page ("load more").
    Append,
}

// ============================================================================
// Selection
// ============================================================================

/// Result of [`select_view`].
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a, T> {
    pub items: Vec<&'a T>,
    /// Count after filter and search, before pagination.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    /// Index in `items` where the newly revealed page starts.
    pub new_from: usize,
}

impl<'a, T> View<'a, T> {
    /// Whether a "load more" step would reveal anything.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Items revealed by the last step.
    pub fn fresh(&self) -> &[&'a T] {
        &self.items[self.new_from.min(self.items.len())..]
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Records matching the filter and the search, in input order.
pub fn matching<'a, T: Record>(records: &'a [T], state: &ViewState, lang: Lang) -> Vec<&'a T> {
    let needle = state.search();
    records
        .iter()
        .filter(|record| state.filter.accepts(*record))
        .filter(|record| {
            needle.is_empty()
                || record
                    .search_fields(lang)
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle))
        })
        .collect()
}

/// Filter, search and paginate.
pub fn select_view<'a, T: Record>(
    records: &'a [T],
    state: &ViewState,
    lang: Lang,
    mode: PageMode,
) -> View<'a, T> {
    let matched = matching(records, state, lang);
    let total = matched.len();
    let size = state.page_size.max(1);
    let page = state.page.max(1);

    let end = page.saturating_mul(size).min(total);
    let page_start = ((page - 1).saturating_mul(size)).min(end);
    let start = match mode {
        PageMode::Replace => page_start,
        PageMode::Append => 0,
    };

    View {
        items: matched[start..end].to_vec(),
        total,
        page,
        total_pages: total.div_ceil(size),
        new_from: page_start - start,
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Occurrences of each key, most frequent first; ties keep first-seen order.
fn count_desc<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_owned(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn category_counts<T: Record>(records: &[T]) -> Vec<(String, usize)> {
    count_desc(records.iter().flat_map(|r| r.categories().iter().map(String::as_str)))
}

/// A tag cloud entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWeight {
    pub tag: String,
    pub count: usize,
    /// Font size in `em`.
    pub size: f32,
}

/// The `limit` most used tags.
pub fn tag_cloud<T: Record>(records: &[T], limit: usize) -> Vec<TagWeight> {
    count_desc(records.iter().flat_map(|r| r.tags().iter().map(String::as_str)))
        .into_iter()
        .take(limit)
        .map(|(tag, count)| TagWeight {
            size: (0.8 + 0.1 * count as f32).min(1.2),
            tag,
            count,
        })
        .collect()
}

/// First `n` records of an already ordered collection.
pub fn recent<T>(records: &[T], n: usize) -> &[T] {
    &records[..n.min(records.len())]
}

/// Minutes to read: words separated by single spaces, rounded up.
pub fn read_time(content: &str, words_per_minute: usize) -> usize {
    let words = content.split(' ').count();
    words.div_ceil(words_per_minute.max(1))
}

/// Docs sharing a category label, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocGroup<'a> {
    pub category: String,
    pub docs: Vec<&'a Doc>,
}

pub fn group_by_category<'a>(docs: impl IntoIterator<Item = &'a Doc>, lang: Lang) -> Vec<DocGroup<'a>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<DocGroup<'a>> = Vec::new();

    for doc in docs {
        let category = doc.category.get(lang);
        match index.get(category) {
            Some(&i) => groups[i].docs.push(doc),
            None => {
                index.insert(category.to_owned(), groups.len());
                groups.push(DocGroup {
                    category: category.to_owned(),
                    docs: vec![doc],
                });
            }
        }
    }

    groups
}
