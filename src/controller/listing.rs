//! Generic filter/search/paginate controller.
//!
//! ```text
//! Action ──► ViewState ──► select_view ──► Listing::results ──► Repaint
//!                                      └─► Listing::decorations ─┘
//! ```

use super::{Action, Repaint};
use crate::{
    config::SiteConfig,
    content::{Filter, PageMode, Record, View, ViewState, select_view},
    context::SiteContext,
    render::{Fragment, Markup, Mode, Stamp, render_view},
    url_state::UrlState,
};

/// What a concrete listing page supplies to [`ListingController`].
pub trait Listing {
    type Item: Record;

    /// Element id of the results container.
    const CONTAINER: &'static str;

    /// `Append` for listings grown by "load more".
    const SELECTION: PageMode = PageMode::Replace;

    fn page_size(&self, config: &SiteConfig) -> usize;

    fn records<'a>(&self, ctx: &SiteContext<'a>) -> &'a [Self::Item];

    fn card(&self, ctx: &SiteContext<'_>, item: &Self::Item, stamp: Stamp) -> Markup;

    /// Shown instead of the cards when nothing matches.
    fn empty(&self, ctx: &SiteContext<'_>) -> Markup;

    /// Content of the results container.
    fn results(&self, ctx: &SiteContext<'_>, view: &View<'_, Self::Item>, mode: Mode) -> Fragment {
        if view.is_empty() {
            return Fragment::replace(Self::CONTAINER, self.empty(ctx));
        }
        render_view(Self::CONTAINER, view, mode, |item, stamp| self.card(ctx, item, stamp))
    }

    /// Other containers repainted with the results (sidebars, counters).
    fn decorations(
        &self,
        _ctx: &SiteContext<'_>,
        _state: &ViewState,
        _view: &View<'_, Self::Item>,
        _mode: Mode,
    ) -> Vec<Fragment> {
        Vec::new()
    }
}

/// Owns the view state of one listing page.
pub struct ListingController<P: Listing> {
    listing: P,
    state: ViewState,
}

impl<P: Listing> ListingController<P> {
    pub fn new(listing: P, config: &SiteConfig) -> Self {
        let state = ViewState::new(listing.page_size(config));
        Self { listing, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn listing(&self) -> &P {
        &self.listing
    }

    pub fn listing_mut(&mut self) -> &mut P {
        &mut self.listing
    }

    /// Apply shared view state from a URL.
    pub fn restore(&mut self, url: &UrlState) {
        if let Some(filter) = &url.filter {
            self.state.set_filter(Filter::parse(filter));
        }
        if let Some(search) = &url.search {
            self.state.set_search(search);
        }
        if let Some(page) = url.page {
            self.state.set_page(page);
        }
    }

    pub fn url_state(&self) -> UrlState {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        UrlState {
            filter: non_empty(self.state.filter.as_str()).filter(|f| f != "all"),
            search: non_empty(self.state.search()),
            page: (self.state.page > 1).then_some(self.state.page),
            ..UrlState::default()
        }
    }

    pub fn view<'a>(&self, ctx: &SiteContext<'a>) -> View<'a, P::Item> {
        select_view(self.listing.records(ctx), &self.state, ctx.lang(), P::SELECTION)
    }

    /// Results plus decorations for the current state.
    pub fn repaint(&self, ctx: &SiteContext<'_>, mode: Mode) -> Repaint {
        let view = self.view(ctx);
        let mut fragments = vec![self.listing.results(ctx, &view, mode)];
        fragments.extend(self.listing.decorations(ctx, &self.state, &view, mode));
        Repaint {
            fragments,
            url: self.url_state(),
        }
    }

    /// Handle a listing action; `None` when nothing changes.
    pub fn dispatch(&mut self, ctx: &mut SiteContext<'_>, action: Action) -> Option<Repaint> {
        match action {
            Action::SetFilter(token) => self.state.set_filter(Filter::parse(&token)),
            Action::SetSearch(text) => self.state.set_search(&text),
            Action::Submit => {}
            Action::LoadMore => {
                if !self.view(ctx).has_more() {
                    return None;
                }
                self.state.set_page(self.state.page + 1);
                return Some(self.repaint(ctx, Mode::Append));
            }
            Action::ClearFilters => self.state.clear(),
            Action::SetLanguage(lang) => {
                if !ctx.set_language(lang) {
                    return None;
                }
            }
            _ => return None,
        }
        Some(self.repaint(ctx, Mode::Replace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{ContentStores, Post},
        i18n::{Lang, PreferenceStore, Translations},
        render::html::escape,
    };
    use serde_json::json;

    struct Titles;

    impl Listing for Titles {
        type Item = Post;
        const CONTAINER: &'static str = "titles";
        const SELECTION: PageMode = PageMode::Append;

        fn page_size(&self, _config: &SiteConfig) -> usize {
            2
        }

        fn records<'a>(&self, ctx: &SiteContext<'a>) -> &'a [Post] {
            &ctx.content.posts
        }

        fn card(&self, ctx: &SiteContext<'_>, post: &Post, stamp: Stamp) -> Markup {
            Markup::new(format!("<p {}>{}</p>", stamp.attrs("t"), escape(post.title.get(ctx.lang()))))
        }

        fn empty(&self, _ctx: &SiteContext<'_>) -> Markup {
            Markup::new("none")
        }
    }

    fn content() -> ContentStores {
        let posts = (0..5)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": format!("p{i}"),
                    "title": {"tr": format!("Yazı {i}"), "en": format!("Post {i}")},
                    "categories": [if i < 2 { "python" } else { "tutorial" }],
                    "date": format!("2024-01-0{}", 9 - i),
                }))
                .unwrap()
            })
            .collect();
        ContentStores::from_records(posts, vec![], vec![], Translations::default())
    }

    #[test]
    fn test_load_more_appends_until_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new(dir.path().join("prefs.json"));
        let mut ctx = SiteContext::new(&config, &content, &prefs, Lang::Tr);
        let mut controller = ListingController::new(Titles, &config);

        let first = controller.repaint(&ctx, Mode::Replace);
        assert_eq!(first.fragments[0].html.matches("<p ").count(), 2);

        let more = controller.dispatch(&mut ctx, Action::LoadMore).unwrap();
        assert_eq!(more.fragments[0].mode, Mode::Append);
        assert!(more.fragments[0].html.contains("Yazı 2"));
        assert!(!more.fragments[0].html.contains("Yazı 0"));
        assert_eq!(more.url.page, Some(2));

        assert!(controller.dispatch(&mut ctx, Action::LoadMore).is_some());
        assert!(controller.dispatch(&mut ctx, Action::LoadMore).is_none());
        assert_eq!(controller.state().page, 3);
    }

    #[test]
    fn test_filter_search_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new(dir.path().join("prefs.json"));
        let mut ctx = SiteContext::new(&config, &content, &prefs, Lang::Tr);
        let mut controller = ListingController::new(Titles, &config);

        let repaint = controller.dispatch(&mut ctx, Action::SetFilter("python".into())).unwrap();
        assert_eq!(repaint.url.filter.as_deref(), Some("python"));
        assert!(repaint.fragments[0].html.contains("Yazı 0"));

        let repaint = controller.dispatch(&mut ctx, Action::SetSearch("Nope".into())).unwrap();
        assert_eq!(repaint.fragments[0].html, "none");

        let repaint = controller.dispatch(&mut ctx, Action::ClearFilters).unwrap();
        assert!(repaint.url.is_empty());
        assert!(controller.state().is_default());

        assert!(controller.dispatch(&mut ctx, Action::Back).is_none());
    }

    #[test]
    fn test_set_language_repaints_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new(dir.path().join("prefs.json"));
        let mut ctx = SiteContext::new(&config, &content, &prefs, Lang::Tr);
        let mut controller = ListingController::new(Titles, &config);

        let repaint = controller.dispatch(&mut ctx, Action::SetLanguage(Lang::En)).unwrap();
        assert!(repaint.fragments[0].html.contains("Post 0"));
        assert!(controller.dispatch(&mut ctx, Action::SetLanguage(Lang::En)).is_none());
    }

    #[test]
    fn test_restore_from_url() {
        let config = SiteConfig::default();
        let mut controller = ListingController::new(Titles, &config);
        controller.restore(&UrlState::parse("filter=tutorial&search=Yazı&page=2"));

        assert_eq!(controller.state().filter, Filter::Token("tutorial".into()));
        assert_eq!(controller.state().search(), "yazı");
        assert_eq!(controller.state().page, 2);
        assert_eq!(controller.url_state().to_query(), "search=yaz%C4%B1&filter=tutorial&page=2");
    }
}
