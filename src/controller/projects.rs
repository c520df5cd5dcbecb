//! Projects: category filter, tech/status highlight and layout toggle.
//!
//! A category filter hides non-matching cards. A tech or status highlight
//! keeps every card of the category visible and dims the non-matching ones.

use super::listing::{Listing, ListingController};
use super::{Action, Repaint};
use crate::{
    config::SiteConfig,
    content::{Project, View, ViewState},
    context::SiteContext,
    controller::action::Binding,
    i18n::{Lang, Phrase, project_count, status_label},
    render::{Fragment, Markup, Mode, NavItem, Page, Stamp, html::classes, html::escape, templates},
    url_state::UrlState,
};
use serde::Serialize;

pub const COUNT: &str = "project-count";
pub const FILTERS: &str = "project-filters";
pub const INDICATOR: &str = "filter-indicator-slot";
pub const VIEW_TOGGLE: &str = "view-toggle";

/// Card arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight {
    /// Case-insensitive technology name.
    Tech(String),
    /// Status slug.
    Status(String),
}

impl Highlight {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::Tech(tech) => project.uses_tech(tech),
            Self::Status(status) => project.status == *status,
        }
    }

    /// `Teknoloji: GSAP` / `Status: Active`
    pub fn label(&self, lang: Lang) -> String {
        match self {
            Self::Tech(tech) => format!("{}: {tech}", Phrase::Technology.text(lang)),
            Self::Status(status) => {
                format!("{}: {}", Phrase::Status.text(lang), status_label(status, lang))
            }
        }
    }
}

fn category_name(slug: &str, lang: Lang) -> String {
    let name = match (slug, lang) {
        ("web", _) => "Web",
        ("library", Lang::Tr) => "Kütüphane",
        ("library", Lang::En) => "Library",
        ("api", _) => "API",
        ("tool", Lang::Tr) => "Araç",
        ("tool", Lang::En) => "Tool",
        (other, _) => other,
    };
    name.to_owned()
}

#[derive(Debug, Default)]
pub struct ProjectsListing {
    highlight: Option<Highlight>,
    layout: Layout,
}

impl ProjectsListing {
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    fn filter_buttons(&self, ctx: &SiteContext<'_>, active: &str) -> Markup {
        let mut categories: Vec<&str> = Vec::new();
        for project in &ctx.content.projects {
            if !categories.contains(&project.category.as_str()) {
                categories.push(&project.category);
            }
        }

        let mut out = Markup::default();
        for token in std::iter::once("all").chain(categories) {
            let label = match token {
                "all" => ctx.phrase(Phrase::All).to_owned(),
                slug => category_name(slug, ctx.lang()),
            };
            let class = classes(["filter-btn", if token == active { "active" } else { "" }]);
            let token_attr = escape(token);
            out.push(
                Markup::new(format!(
                    r#"<a href="?filter={}" class="{class}" data-filter="{token_attr}">{}</a>"#,
                    urlencoding::encode(token),
                    escape(&label)
                ))
                .bind(Binding::click(
                    format!(r#".filter-btn[data-filter="{token_attr}"]"#),
                    Action::SetFilter(token.to_owned()),
                )),
            );
        }
        out
    }

    fn view_toggle(&self, ctx: &SiteContext<'_>) -> Markup {
        let mut out = Markup::default();
        for (layout, icon, label) in [
            (Layout::Grid, "fa-th", Phrase::GridView),
            (Layout::List, "fa-list", Phrase::ListView),
        ] {
            let class = classes(["view-btn", if layout == self.layout { "active" } else { "" }]);
            out.push(
                Markup::new(format!(
                    r#"<button class="{class}" data-view="{view}" title="{title}"><i class="fas {icon}"></i></button>"#,
                    view = layout.as_str(),
                    title = ctx.phrase(label),
                ))
                .bind(Binding::click(
                    format!(r#".view-btn[data-view="{}"]"#, layout.as_str()),
                    Action::SetLayout(layout),
                )),
            );
        }
        out
    }
}

impl Listing for ProjectsListing {
    type Item = Project;
    const CONTAINER: &'static str = "projects-container";

    /// Every project on one page.
    fn page_size(&self, _config: &SiteConfig) -> usize {
        usize::MAX
    }

    fn records<'a>(&self, ctx: &SiteContext<'a>) -> &'a [Project] {
        &ctx.content.projects
    }

    fn card(&self, ctx: &SiteContext<'_>, project: &Project, stamp: Stamp) -> Markup {
        let dimmed = self.highlight.as_ref().is_some_and(|h| !h.matches(project));
        templates::project_card(ctx, project, stamp, dimmed)
    }

    fn empty(&self, ctx: &SiteContext<'_>) -> Markup {
        templates::empty_state(
            ctx.phrase(Phrase::NoProjects),
            ctx.phrase(Phrase::ClearFilters),
            "reset-filters-btn",
            Action::ClearFilters,
        )
    }

    fn results(&self, ctx: &SiteContext<'_>, view: &View<'_, Project>, mode: Mode) -> Fragment {
        if view.is_empty() {
            return Fragment::replace(Self::CONTAINER, self.empty(ctx));
        }
        let cards = crate::render::render_view(Self::CONTAINER, view, mode, |project, stamp| {
            self.card(ctx, project, stamp)
        });
        Fragment::replace(
            Self::CONTAINER,
            Markup {
                html: format!(
                    r#"<div class="projects-grid {}-view">{}</div>"#,
                    self.layout.as_str(),
                    cards.html
                ),
                bindings: cards.bindings,
            },
        )
    }

    fn decorations(
        &self,
        ctx: &SiteContext<'_>,
        state: &ViewState,
        view: &View<'_, Project>,
        _mode: Mode,
    ) -> Vec<Fragment> {
        let indicator = self
            .highlight
            .as_ref()
            .map(|highlight| templates::filter_indicator(&highlight.label(ctx.lang())))
            .unwrap_or_default();

        vec![
            Fragment::replace(COUNT, Markup::new(escape(&project_count(view.total, ctx.lang())))),
            Fragment::replace(FILTERS, self.filter_buttons(ctx, state.filter.as_str())),
            Fragment::replace(INDICATOR, indicator),
            Fragment::replace(VIEW_TOGGLE, self.view_toggle(ctx)),
        ]
    }
}

/// Projects page controller.
pub struct ProjectsController {
    listing: ListingController<ProjectsListing>,
}

impl ProjectsController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            listing: ListingController::new(ProjectsListing::default(), config),
        }
    }

    pub fn restore(&mut self, url: &UrlState) {
        self.listing.restore(&UrlState {
            filter: url.filter.clone(),
            ..UrlState::default()
        });
    }

    pub fn listing(&self) -> &ProjectsListing {
        self.listing.listing()
    }

    pub fn dispatch(&mut self, ctx: &mut SiteContext<'_>, action: Action) -> Option<Repaint> {
        let projects = self.listing.listing_mut();
        match action {
            Action::FilterTech(tech) => projects.highlight = Some(Highlight::Tech(tech)),
            Action::FilterStatus(status) => projects.highlight = Some(Highlight::Status(status)),
            Action::SetLayout(layout) => {
                if projects.layout == layout {
                    return None;
                }
                projects.layout = layout;
            }
            Action::ClearFilters => {
                projects.highlight = None;
                return self.listing.dispatch(ctx, Action::ClearFilters);
            }
            Action::SetFilter(token) => {
                projects.highlight = None;
                return self.listing.dispatch(ctx, Action::SetFilter(token));
            }
            action => return self.listing.dispatch(ctx, action),
        }
        Some(self.listing.repaint(ctx, Mode::Replace))
    }

    pub fn page(&self, ctx: &SiteContext<'_>) -> Page {
        let repaint = self.listing.repaint(ctx, Mode::Replace);
        let slot = |id: &str, tag: &str, class: &str| {
            repaint
                .fragment(id)
                .map(|fragment| fragment.wrap(tag, class))
                .unwrap_or_default()
        };

        let body = Markup {
            html: format!(
                r#"<section class="projects-section"><div class="container"><div class="projects-toolbar">{filters}{toggle}{count}</div>{indicator}{grid}</div></section>"#,
                filters = slot(FILTERS, "div", "project-filters"),
                toggle = slot(VIEW_TOGGLE, "div", "view-toggle"),
                count = slot(COUNT, "span", "project-count"),
                indicator = slot(INDICATOR, "div", "filter-indicator-slot"),
                grid = slot(ProjectsListing::CONTAINER, "div", "projects-container"),
            ),
            bindings: repaint.into_bindings(),
        };

        Page {
            nav: NavItem::Projects,
            path: NavItem::Projects.path().to_owned(),
            title: Some(ctx.t("nav.projects", "Projeler")),
            body,
        }
    }
}
