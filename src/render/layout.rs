//! Page shell shared by every page.

use super::fragment::Markup;
use super::html::{classes, escape};
use crate::{
    context::SiteContext,
    controller::action::{Action, Binding},
    i18n::Lang,
};
use chrono::Datelike;

/// Top navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Blog,
    Docs,
    Projects,
    Contact,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [Self::Home, Self::Blog, Self::Docs, Self::Projects, Self::Contact];

    /// Path of the page relative to the language root.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Blog => "/blog.html",
            Self::Docs => "/docs.html",
            Self::Projects => "/projects.html",
            Self::Contact => "/contact.html",
        }
    }

    const fn key(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Home => ("nav-home", "nav.home", "Ana Sayfa"),
            Self::Blog => ("nav-blog", "nav.blog", "Blog"),
            Self::Docs => ("nav-docs", "nav.docs", "Dökümanlar"),
            Self::Projects => ("nav-projects", "nav.projects", "Projeler"),
            Self::Contact => ("nav-contact", "nav.contact", "İletişim"),
        }
    }
}

/// A page ready to be wrapped in the shell.
pub struct Page {
    pub nav: NavItem,
    /// Path of this page relative to the language root, used by the switcher.
    pub path: String,
    /// Shown before the site title, e.g. a post title.
    pub title: Option<String>,
    pub body: Markup,
}

/// Full HTML document for `page`.
pub fn shell(ctx: &SiteContext<'_>, page: &Page) -> String {
    let lang = ctx.lang();
    let site_title = ctx.t("site.title", &ctx.config.base.title);
    let description = ctx.t("site.description", &ctx.config.base.description);
    let title = match &page.title {
        Some(title) => format!("{title} - {site_title}"),
        None => format!("{site_title} - {description}"),
    };

    let mut bindings = page.body.bindings.clone();
    let nav = navigation(ctx, page, &site_title, &mut bindings);
    let alternates: String = Lang::ALL
        .iter()
        .filter(|&&other| other != lang)
        .map(|&other| {
            format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                other.code(),
                escape(&lang_href(ctx, other, &page.path))
            )
        })
        .collect();
    let build = &ctx.config.build;
    let feed = if build.rss.enable {
        let href = build.rss.path.strip_prefix(&build.output).unwrap_or(&build.rss.path);
        format!(
            r#"<link rel="alternate" type="application/rss+xml" href="/{}">"#,
            escape(&href.to_string_lossy())
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><meta name="description" content="{description}">{alternates}{feed}<link rel="stylesheet" href="/assets/css/style.css"></head><body>{nav}<main>{body}</main>{footer}<script type="application/json" id="page-bindings">{bindings}</script></body></html>"#,
        lang = lang.code(),
        title = escape(&title),
        description = escape(&description),
        body = page.body.html,
        footer = footer(ctx),
        bindings = bindings_json(&bindings),
    )
}

fn navigation(ctx: &SiteContext<'_>, page: &Page, site_title: &str, bindings: &mut Vec<Binding>) -> String {
    let links: String = NavItem::ALL
        .iter()
        .map(|&item| {
            let (id, key, default) = item.key();
            let class = classes(["nav-link", if item == page.nav { "active" } else { "" }]);
            format!(
                r#"<li><a id="{id}" href="{}" class="{class}">{}</a></li>"#,
                escape(&ctx.href(item.path())),
                escape(&ctx.t(key, default))
            )
        })
        .collect();

    let switcher: String = Lang::ALL
        .iter()
        .map(|&lang| {
            bindings.push(Binding::click(
                format!(r#"[data-lang="{}"]"#, lang.code()),
                Action::SetLanguage(lang),
            ));
            let class = classes(["lang-btn", if lang == ctx.lang() { "active" } else { "" }]);
            format!(
                r#"<a href="{}" class="{class}" data-lang="{}">{}</a>"#,
                escape(&lang_href(ctx, lang, &page.path)),
                lang.code(),
                lang.label()
            )
        })
        .collect();

    format!(
        r#"<nav id="navbar" class="navbar"><a href="{home}" class="brand"><span class="brand-text">{brand}</span></a><ul id="navbar-menu" class="navbar-menu">{links}</ul><div class="language-switcher">{switcher}</div></nav>"#,
        home = escape(&ctx.href("/")),
        brand = escape(site_title),
    )
}

/// The same page in another language.
fn lang_href(ctx: &SiteContext<'_>, lang: Lang, path: &str) -> String {
    format!("{}{path}", lang.url_prefix(ctx.config.i18n.default_language))
}

fn footer(ctx: &SiteContext<'_>) -> String {
    let copyright = ctx.t("footer.copyright", "Tüm hakları saklıdır");
    format!(
        r#"<footer class="footer"><p class="footer-copyright">© {} ByCh4n Group. {}.</p></footer>"#,
        chrono::Utc::now().year(),
        escape(&copyright)
    )
}

/// Listener table embedded in the page; `</` is escaped so the JSON cannot
/// close the script element.
fn bindings_json(bindings: &[Binding]) -> String {
    serde_json::to_string(bindings)
        .unwrap_or_else(|_| "[]".to_owned())
        .replace("</", "<\\/")
}
