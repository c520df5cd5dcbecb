//! Blog listing: filter, search, sidebar and "load more".

use super::listing::{Listing, ListingController};
use crate::{
    config::SiteConfig,
    content::{
        PageMode, Post, View, ViewState,
        query::{category_counts, recent, tag_cloud},
    },
    context::SiteContext,
    controller::action::Action,
    i18n::Phrase,
    markdown,
    render::{Fragment, Markup, Mode, NavItem, Page, Stamp, templates},
};

pub const CATEGORIES: &str = "blog-categories";
pub const TAGS: &str = "blog-tags";
pub const RECENT: &str = "recent-posts";
pub const LOAD_MORE: &str = "load-more-container";
pub const SEARCH: &str = "blog-search";

pub struct BlogListing;

impl Listing for BlogListing {
    type Item = Post;
    const CONTAINER: &'static str = "blog-posts-container";
    const SELECTION: PageMode = PageMode::Append;

    fn page_size(&self, config: &SiteConfig) -> usize {
        config.listing.blog_page_size
    }

    fn records<'a>(&self, ctx: &SiteContext<'a>) -> &'a [Post] {
        &ctx.content.posts
    }

    fn card(&self, ctx: &SiteContext<'_>, post: &Post, stamp: Stamp) -> Markup {
        templates::blog_card(ctx, post, stamp)
    }

    fn empty(&self, ctx: &SiteContext<'_>) -> Markup {
        templates::empty_state(
            ctx.phrase(Phrase::NoPosts),
            ctx.phrase(Phrase::ClearFilters),
            "reset-filters-btn",
            Action::ClearFilters,
        )
    }

    fn decorations(
        &self,
        ctx: &SiteContext<'_>,
        state: &ViewState,
        view: &View<'_, Post>,
        mode: Mode,
    ) -> Vec<Fragment> {
        let load_more = Fragment::replace(LOAD_MORE, templates::load_more(ctx, view.has_more()));
        if mode == Mode::Append {
            return vec![load_more];
        }

        let posts = &ctx.content.posts;
        let listing = &ctx.config.listing;
        vec![
            load_more,
            Fragment::replace(
                CATEGORIES,
                templates::category_list(ctx, &category_counts(posts), state.filter.as_str()),
            ),
            Fragment::replace(TAGS, templates::tag_cloud(&tag_cloud(posts, listing.top_tags))),
            Fragment::replace(
                RECENT,
                templates::recent_posts(ctx, recent(posts, listing.recent_posts)),
            ),
        ]
    }
}

pub type BlogController = ListingController<BlogListing>;

impl ListingController<BlogListing> {
    pub fn blog(config: &SiteConfig) -> Self {
        Self::new(BlogListing, config)
    }

    /// Full blog page for the current state.
    pub fn page(&self, ctx: &SiteContext<'_>) -> Page {
        let repaint = self.repaint(ctx, Mode::Replace);
        let slot = |id: &str, tag: &str, class: &str| {
            repaint
                .fragment(id)
                .map(|fragment| fragment.wrap(tag, class))
                .unwrap_or_default()
        };

        let search = templates::search_box(SEARCH, self.state().search(), ctx.phrase(Phrase::Search));
        let mut body = Markup::new(format!(
            r#"<section class="blog-section"><div class="container"><div class="blog-layout"><div class="blog-main">{search}{posts}{more}</div><aside class="blog-sidebar"><div class="sidebar-widget"><h3>{categories_title}</h3>{categories}</div><div class="sidebar-widget"><h3>{tags_title}</h3>{tags}</div><div class="sidebar-widget"><h3>{recent_title}</h3>{recent}</div></aside></div></div></section>"#,
            search = search.html,
            posts = slot(BlogListing::CONTAINER, "div", "blog-grid"),
            more = slot(LOAD_MORE, "div", "load-more-container"),
            categories_title = ctx.phrase(Phrase::Categories),
            categories = slot(CATEGORIES, "ul", "category-list"),
            tags_title = ctx.phrase(Phrase::Tags),
            tags = slot(TAGS, "div", "tag-cloud"),
            recent_title = ctx.phrase(Phrase::RecentPosts),
            recent = slot(RECENT, "div", "recent-posts"),
        ));
        body.bindings = search.bindings;
        body.bindings.extend(repaint.into_bindings());

        Page {
            nav: NavItem::Blog,
            path: NavItem::Blog.path().to_owned(),
            title: Some(ctx.t("nav.blog", "Blog")),
            body,
        }
    }
}

/// Standalone page of one post.
pub fn post_page(ctx: &SiteContext<'_>, post: &Post) -> Page {
    let body = markdown::render(post.content.get(ctx.lang()));
    Page {
        nav: NavItem::Blog,
        path: format!("/blog/{}.html", post.id),
        title: Some(post.title.get(ctx.lang()).to_owned()),
        body: Markup::new(format!(
            r#"<section class="post-section"><div class="container">{}</div></section>"#,
            templates::post_article(ctx, post, &body).html
        )),
    }
}
