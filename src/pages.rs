//! Page routing: which pages exist and how each one is rendered.
//!
//! Paths are relative to the language root (`/blog.html`); the English copy
//! of every page lives under `/en`.

use crate::{
    context::SiteContext,
    controller::{
        BlogController, ContactController, DocsController, HomeController, ProjectsController,
        blog::post_page,
    },
    i18n::Lang,
    render::{NavItem, Page, shell},
    url_state::UrlState,
    utils::date::DateTimeUtc,
};
use std::path::PathBuf;

/// A finished HTML document.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub lang: Lang,
    /// Site-absolute URL path, e.g. `/en/blog.html`.
    pub url_path: String,
    /// Output file relative to the output directory.
    pub file: PathBuf,
    pub html: String,
    /// `YYYY-MM-DD` of the underlying record, if dated.
    pub lastmod: Option<String>,
}

/// Language-relative paths of every page.
pub fn paths(ctx: &SiteContext<'_>) -> Vec<String> {
    NavItem::ALL
        .iter()
        .map(|item| item.path().to_owned())
        .chain(ctx.content.posts.iter().map(|post| format!("/blog/{}.html", post.id)))
        .collect()
}

/// Page at `path` with its view restored from `url`; `None` for unknown paths.
pub fn page_for(ctx: &SiteContext<'_>, path: &str, url: &UrlState) -> Option<Page> {
    let config = ctx.config;
    let page = match path {
        "/" | "/index.html" => HomeController::default().page(ctx),
        "/blog.html" => {
            let mut blog = BlogController::blog(config);
            blog.restore(url);
            blog.page(ctx)
        }
        "/docs.html" => {
            let mut docs = DocsController::new(config);
            docs.restore(ctx, url);
            docs.page(ctx)
        }
        "/projects.html" => {
            let mut projects = ProjectsController::new(config);
            projects.restore(url);
            projects.page(ctx)
        }
        "/contact.html" => ContactController::simulated(&config.contact).page(ctx),
        _ => {
            let id = path.strip_prefix("/blog/")?.strip_suffix(".html")?;
            post_page(ctx, ctx.content.post(id)?)
        }
    };
    Some(page)
}

/// Render the page at `path` in its initial state.
pub fn render(ctx: &SiteContext<'_>, path: &str) -> Option<RenderedPage> {
    let page = page_for(ctx, path, &UrlState::default())?;
    Some(finish(ctx, &page))
}

/// Wrap a page in the shell.
pub fn finish(ctx: &SiteContext<'_>, page: &Page) -> RenderedPage {
    let url_path = ctx.href(&page.path);
    let lastmod = page
        .path
        .strip_prefix("/blog/")
        .and_then(|rest| rest.strip_suffix(".html"))
        .and_then(|id| ctx.content.post(id))
        .and_then(|post| post.date.as_deref())
        .and_then(DateTimeUtc::parse)
        .map(DateTimeUtc::to_iso_date);

    RenderedPage {
        lang: ctx.lang(),
        file: output_file(&url_path),
        url_path,
        html: shell(ctx, page),
        lastmod,
    }
}

/// `/` → `index.html`, `/en/blog.html` → `en/blog.html`.
pub fn output_file(url_path: &str) -> PathBuf {
    let relative = url_path.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        PathBuf::from(relative).join("index.html")
    } else {
        PathBuf::from(relative)
    }
}

/// Split a request path into its language and language-relative path.
pub fn split_lang(path: &str, default: Lang) -> (Lang, &str) {
    for lang in Lang::ALL {
        let prefix = lang.url_prefix(default);
        if prefix.is_empty() {
            continue;
        }
        if path == prefix {
            return (lang, "/");
        }
        match path.strip_prefix(&prefix) {
            Some(rest) if rest.starts_with('/') => return (lang, rest),
            _ => {}
        }
    }
    (default, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SiteConfig,
        content::ContentStores,
        i18n::{PreferenceStore, Translations},
    };
    use serde_json::json;
    use std::path::Path;

    fn content() -> ContentStores {
        let post = serde_json::from_value(json!({
            "id": "python-basics",
            "title": {"tr": "Python Temelleri", "en": "Python Basics"},
            "content": {"tr": "merhaba", "en": "hello"},
            "categories": ["python"],
            "date": "2024-01-15",
        }))
        .unwrap();
        let doc = serde_json::from_value(json!({
            "id": "git-basics",
            "title": {"tr": "Git", "en": "Git"},
            "content": {"tr": "# Git", "en": "# Git"},
            "category": {"tr": "Araçlar", "en": "Tools"},
        }))
        .unwrap();
        ContentStores::from_records(vec![post], vec![doc], vec![], Translations::default())
    }

    #[test]
    fn test_paths_cover_posts() {
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new("/nonexistent/prefs.json");
        let ctx = SiteContext::new(&config, &content, &prefs, Lang::Tr);

        let paths = paths(&ctx);
        assert_eq!(paths.len(), 6);
        assert!(paths.contains(&"/blog/python-basics.html".to_owned()));
    }

    #[test]
    fn test_render_english_post() {
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new("/nonexistent/prefs.json");
        let ctx = SiteContext::new(&config, &content, &prefs, Lang::En);

        let page = render(&ctx, "/blog/python-basics.html").unwrap();
        assert_eq!(page.url_path, "/en/blog/python-basics.html");
        assert_eq!(page.file, Path::new("en/blog/python-basics.html"));
        assert_eq!(page.lastmod.as_deref(), Some("2024-01-15"));
        assert!(page.html.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(page.html.contains("Python Basics"));

        assert!(render(&ctx, "/blog/missing.html").is_none());
        assert!(render(&ctx, "/about.html").is_none());
    }

    #[test]
    fn test_page_for_restores_url_state() {
        let config = SiteConfig::default();
        let content = content();
        let prefs = PreferenceStore::new("/nonexistent/prefs.json");
        let ctx = SiteContext::new(&config, &content, &prefs, Lang::Tr);

        let page = page_for(&ctx, "/docs.html", &UrlState::parse("doc=git-basics")).unwrap();
        assert!(page.body.html.contains(r#"<h1 id="heading-0">Git</h1>"#));
    }

    #[test]
    fn test_output_file() {
        assert_eq!(output_file("/"), Path::new("index.html"));
        assert_eq!(output_file("/en/"), Path::new("en/index.html"));
        assert_eq!(output_file("/blog.html"), Path::new("blog.html"));
    }

    #[test]
    fn test_split_lang() {
        assert_eq!(split_lang("/en/docs.html", Lang::Tr), (Lang::En, "/docs.html"));
        assert_eq!(split_lang("/en", Lang::Tr), (Lang::En, "/"));
        assert_eq!(split_lang("/english.html", Lang::Tr), (Lang::Tr, "/english.html"));
        assert_eq!(split_lang("/docs.html", Lang::Tr), (Lang::Tr, "/docs.html"));
    }
}
