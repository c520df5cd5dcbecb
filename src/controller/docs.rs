//! Documentation: searchable grid grouped by category, and the reader.
//!
//! The grid and the open document share the page; opening a document hides
//! the grid, `Back` or any search shows it again.

use super::listing::{Listing, ListingController};
use super::{Action, Repaint};
use crate::{
    config::SiteConfig,
    content::{
        Doc, View,
        query::{DocGroup, group_by_category},
    },
    context::SiteContext,
    i18n::Phrase,
    markdown,
    render::{Fragment, Markup, Mode, NavItem, Page, Stamp, render, templates},
    url_state::{UrlState, share_link},
};

pub const NAV: &str = "docs-nav";
pub const ARTICLE: &str = "doc-article";
pub const SEARCH: &str = "docs-search";

pub struct DocsListing;

impl Listing for DocsListing {
    type Item = Doc;
    const CONTAINER: &'static str = "docs-container";

    /// The grid shows every match; there is no load-more on this page.
    fn page_size(&self, _config: &SiteConfig) -> usize {
        usize::MAX
    }

    fn records<'a>(&self, ctx: &SiteContext<'a>) -> &'a [Doc] {
        &ctx.content.docs
    }

    fn card(&self, ctx: &SiteContext<'_>, doc: &Doc, stamp: Stamp) -> Markup {
        templates::doc_card(ctx, doc, stamp)
    }

    fn empty(&self, ctx: &SiteContext<'_>) -> Markup {
        templates::empty_state(
            ctx.phrase(Phrase::NoDocs),
            ctx.phrase(Phrase::ClearSearch),
            "reset-search-btn",
            Action::ClearFilters,
        )
    }

    /// Cards grouped under their category headings.
    fn results(&self, ctx: &SiteContext<'_>, view: &View<'_, Doc>, mode: Mode) -> Fragment {
        if view.is_empty() {
            return Fragment::replace(Self::CONTAINER, self.empty(ctx));
        }

        let mut out = Markup::default();
        for group in group_by_category(view.items.iter().copied(), ctx.lang()) {
            let cards = render(Self::CONTAINER, &group.docs, mode, |doc, stamp| {
                self.card(ctx, doc, stamp)
            });
            out.push(templates::docs_category(
                &group,
                Markup {
                    html: cards.html,
                    bindings: cards.bindings,
                },
            ));
        }
        Fragment::replace(Self::CONTAINER, out)
    }
}

/// Docs page controller.
pub struct DocsController {
    listing: ListingController<DocsListing>,
    /// Index of the open document in the global order.
    open: Option<usize>,
}

impl DocsController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            listing: ListingController::new(DocsListing, config),
            open: None,
        }
    }

    pub fn open_doc<'a>(&self, ctx: &SiteContext<'a>) -> Option<&'a Doc> {
        self.open.and_then(|index| ctx.content.docs.get(index))
    }

    /// Apply `?search=` and `?doc=`; an unknown doc id is ignored.
    pub fn restore(&mut self, ctx: &SiteContext<'_>, url: &UrlState) {
        self.listing.restore(&UrlState {
            search: url.search.clone(),
            ..UrlState::default()
        });
        if let Some(id) = &url.doc {
            self.open = ctx.content.doc_index(id);
        }
    }

    pub fn url_state(&self, ctx: &SiteContext<'_>) -> UrlState {
        UrlState {
            doc: self.open_doc(ctx).map(|doc| doc.id.clone()),
            search: self.listing.url_state().search,
            ..UrlState::default()
        }
    }

    /// Link to the open document for the "copy link" button.
    pub fn share_link(&self, ctx: &SiteContext<'_>) -> Option<String> {
        let base = format!("{}{}", ctx.config.base_url(), ctx.href(""));
        self.open_doc(ctx).map(|doc| share_link(&base, &doc.id))
    }

    pub fn dispatch(&mut self, ctx: &mut SiteContext<'_>, action: Action) -> Option<Repaint> {
        match action {
            Action::ShowDocument(id) => {
                self.open = Some(ctx.content.doc_index(&id)?);
                Some(self.repaint(ctx))
            }
            Action::Back => {
                self.open.take()?;
                Some(self.repaint(ctx))
            }
            Action::CopyLink(_) => None,
            Action::SetLanguage(lang) => ctx.set_language(lang).then(|| self.repaint(ctx)),
            action => {
                let mut repaint = self.listing.dispatch(ctx, action)?;
                self.open = None;
                repaint.fragments.push(self.nav(ctx));
                repaint.fragments.push(Fragment::replace(ARTICLE, Markup::default()));
                repaint.url = self.url_state(ctx);
                Some(repaint)
            }
        }
    }

    /// Everything for the current state: grid or article, plus the sidebar.
    pub fn repaint(&self, ctx: &SiteContext<'_>) -> Repaint {
        let mut fragments = vec![self.nav(ctx)];
        match self.open_doc(ctx) {
            Some(doc) => {
                fragments.push(self.article(ctx, doc));
                fragments.push(Fragment::replace(DocsListing::CONTAINER, Markup::default()));
            }
            None => {
                fragments.extend(self.listing.repaint(ctx, Mode::Replace).fragments);
                fragments.push(Fragment::replace(ARTICLE, Markup::default()));
            }
        }
        Repaint {
            fragments,
            url: self.url_state(ctx),
        }
    }

    fn nav(&self, ctx: &SiteContext<'_>) -> Fragment {
        let groups: Vec<DocGroup<'_>> = group_by_category(&ctx.content.docs, ctx.lang());
        let active = self.open_doc(ctx).map(|doc| doc.id.as_str());
        Fragment::replace(NAV, templates::docs_nav(ctx, &groups, active))
    }

    fn article(&self, ctx: &SiteContext<'_>, doc: &Doc) -> Fragment {
        let body = markdown::render(doc.content.get(ctx.lang()));
        let (prev, next) = self
            .open
            .map(|index| ctx.content.doc_neighbours(index))
            .unwrap_or((None, None));
        let link = self.share_link(ctx).unwrap_or_default();
        Fragment::replace(
            ARTICLE,
            templates::doc_article(ctx, doc, &body, prev, next, &link),
        )
    }

    pub fn page(&self, ctx: &SiteContext<'_>) -> Page {
        let repaint = self.repaint(ctx);
        let reading = self.open.is_some();
        let hidden = |hide: bool| if hide { r#" style="display: none""# } else { "" };
        let slot = |id: &str, tag: &str, class: &str| {
            repaint
                .fragment(id)
                .map(|fragment| fragment.wrap(tag, class))
                .unwrap_or_default()
        };

        let search = templates::search_box(
            SEARCH,
            self.listing.state().search(),
            ctx.phrase(Phrase::Search),
        );
        let mut body = Markup::new(format!(
            r#"<section class="docs-section"><div class="docs-layout"><aside class="docs-sidebar">{search}{nav}</aside><div class="docs-main"><div class="docs-grid"{grid_hidden}>{grid}</div><article class="doc-view"{article_hidden}>{article}</article></div></div></section>"#,
            search = search.html,
            nav = slot(NAV, "nav", "docs-nav"),
            grid_hidden = hidden(reading),
            grid = slot(DocsListing::CONTAINER, "div", "docs-container"),
            article_hidden = hidden(!reading),
            article = slot(ARTICLE, "div", "doc-article"),
        ));
        body.bindings = search.bindings;
        body.bindings.extend(repaint.into_bindings());

        let title = match self.open_doc(ctx) {
            Some(doc) => doc.title.get(ctx.lang()).to_owned(),
            None => ctx.t("nav.docs", "Dökümanlar"),
        };
        Page {
            nav: NavItem::Docs,
            path: NavItem::Docs.path().to_owned(),
            title: Some(title),
            body,
        }
    }
}
