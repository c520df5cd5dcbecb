//! Development server with live views and file watching.
//!
//! Built on `tiny_http`:
//!
//! - Static files from the build output, `index.html` for directories
//! - Query-driven views (`/docs.html?doc=git-basics`) rendered on demand
//! - Contact form posts validated and answered server-side
//! - `/lang/{code}` stores the language preference and redirects
//! - File watching and rebuild (via the `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌───────────────────────┐
//! │   Main Thread   │     │ ScheduledTask "watch" │
//! │  (HTTP Server)  │     │    (File Monitor)     │
//! └────────┬────────┘     └───────────┬───────────┘
//!          │    Arc<RwLock<ContentStores>>
//!          │◀─────────────────────────┤
//!          ▼                          ▼
//!    route() → Reply            reload + rebuild
//!                                     │
//!                                     ▼
//!                             config.build.output
//! ```

use crate::{
    config::SiteConfig,
    content::ContentStores,
    context::SiteContext,
    controller::{Action, ContactController, contact::SimulatedSubmitter},
    i18n::{Lang, PreferenceStore, detect_language},
    log,
    pages::{self, split_lang},
    url_state::UrlState,
    watch::spawn_watcher,
};
use anyhow::{Context, Result, anyhow};
use parking_lot::RwLock;
use std::{
    fs,
    io::{Cursor, Read},
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Pages whose view can be restored from the query string.
const LIVE_VIEWS: [&str; 3] = ["/blog.html", "/docs.html", "/projects.html"];

// ============================================================================
// Server Entry Point
// ============================================================================

/// Shared server state.
struct Site<'a> {
    config: &'a SiteConfig,
    content: Arc<RwLock<ContentStores>>,
    prefs: PreferenceStore,
}

/// Serve the built site until Ctrl+C.
///
/// `content` is the data the site was just built from; the watcher replaces
/// it when data files change.
pub fn serve_site(config: &'static SiteConfig, content: ContentStores) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    let site = Site {
        config,
        content: Arc::new(RwLock::new(content)),
        prefs: PreferenceStore::new(&config.i18n.storage),
    };
    let watcher = spawn_watcher(config, Arc::clone(&site.content))?;

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &site) {
            log!("serve"; "request error: {e:#}");
        }
    }

    if let Some(watcher) = watcher {
        watcher.stop();
    }
    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Routing
// ============================================================================

/// What to answer a request with.
#[derive(Debug, PartialEq)]
enum Reply {
    Html(String),
    File(PathBuf),
    Redirect(String),
    NotFound,
}

/// The parts of a request routing looks at.
struct Incoming<'r> {
    post: bool,
    url: &'r str,
    accept_language: Option<&'r str>,
    body: &'r str,
}

/// Request resolution order:
/// 1. `/lang/{code}` → store preference, redirect to that language's home
/// 2. `/` with a preferred language other than the default → redirect
/// 3. POST `/contact` → validated form page
/// 4. Live view with a query string → rendered on demand
/// 5. File in the output directory (or `{path}.html`, `index.html`)
/// 6. Nothing found → 404
fn route(site: &Site<'_>, incoming: &Incoming<'_>) -> Reply {
    let config = site.config;
    let default = config.i18n.default_language;

    // the query stays encoded; `UrlState::parse` decodes each value once
    let (raw_path, query) = incoming.url.split_once('?').unwrap_or((incoming.url, ""));
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw_path.to_owned());
    let path = path.as_str();

    if let Some(code) = path.strip_prefix("/lang/") {
        return match Lang::parse(code.trim_end_matches('/')) {
            Some(lang) => {
                site.prefs.set(&config.i18n.storage_key, lang.code());
                Reply::Redirect(format!("{}/", lang.url_prefix(default)))
            }
            None => Reply::NotFound,
        };
    }

    if matches!(path, "/" | "/index.html") {
        let stored = site.prefs.get(&config.i18n.storage_key);
        let lang = detect_language(stored.as_deref(), path, incoming.accept_language);
        if lang != default {
            return Reply::Redirect(format!("{}/", lang.url_prefix(default)));
        }
    }

    let (lang, relative) = split_lang(path, default);
    let content = site.content.read();
    let mut ctx = SiteContext::new(config, &content, &site.prefs, lang);

    if incoming.post {
        if !matches!(relative, "/contact" | "/contact.html") {
            return Reply::NotFound;
        }
        // no simulated latency: requests are served one at a time
        let submitter = SimulatedSubmitter::new(Duration::ZERO, config.contact.success_rate);
        let mut contact = ContactController::new(&config.contact, submitter);
        contact.fill(incoming.body);
        contact.dispatch(&mut ctx, Action::SubmitForm);
        let page = pages::finish(&ctx, &contact.page(&ctx));
        return Reply::Html(page.html);
    }

    if !query.is_empty() && LIVE_VIEWS.contains(&relative) {
        if let Some(page) = pages::page_for(&ctx, relative, &UrlState::parse(query)) {
            return Reply::Html(pages::finish(&ctx, &page).html);
        }
    }

    static_file(&config.build.output, path).map_or(Reply::NotFound, Reply::File)
}

/// Resolve `path` below the output directory.
fn static_file(root: &Path, path: &str) -> Option<PathBuf> {
    let relative = path.trim_matches('/');
    if relative.split('/').any(|part| part == "..") {
        return None;
    }
    let local = root.join(relative);
    [
        local.clone(),
        local.with_extension("html"),
        local.join("index.html"),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

// ============================================================================
// Response Helpers
// ============================================================================

fn handle_request(mut request: Request, site: &Site<'_>) -> Result<()> {
    let post = *request.method() == Method::Post;
    let mut body = String::new();
    if post {
        request
            .as_reader()
            .read_to_string(&mut body)
            .context("Failed to read request body")?;
    }
    let accept_language = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Accept-Language"))
        .map(|h| h.value.as_str().to_owned());
    let url = request.url().to_owned();

    let reply = route(
        site,
        &Incoming {
            post,
            url: &url,
            accept_language: accept_language.as_deref(),
            body: &body,
        },
    );

    match reply {
        Reply::Html(html) => serve_html(request, html),
        Reply::File(path) => serve_file(request, &path),
        Reply::Redirect(location) => {
            let response = Response::empty(StatusCode(302)).with_header(header("Location", &location)?);
            request.respond(response)?;
            Ok(())
        }
        Reply::NotFound => serve_not_found(request),
    }
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("Invalid header {name}: {value}"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content).with_header(header("Content-Type", guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

fn serve_html(request: Request, content: String) -> Result<()> {
    let response =
        Response::from_string(content).with_header(header("Content-Type", "text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    const BODY: &str = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![header("Content-Type", "text/plain")?],
        Cursor::new(BODY),
        Some(BODY.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::build_with, i18n::Translations};
    use serde_json::json;

    fn content() -> ContentStores {
        let posts = [("cpp-rust", "C++ & Rust"), ("c-dili", "C dili")]
            .into_iter()
            .map(|(id, title)| {
                serde_json::from_value(json!({
                    "id": id,
                    "title": {"tr": title, "en": title},
                    "date": "2024-01-01",
                }))
                .unwrap()
            })
            .collect();
        let doc = serde_json::from_value(json!({
            "id": "git-basics",
            "title": {"tr": "Git Temelleri", "en": "Git Basics"},
            "content": {"tr": "# Git", "en": "# Git"},
            "category": {"tr": "Araçlar", "en": "Tools"},
        }))
        .unwrap();
        ContentStores::from_records(posts, vec![doc], vec![], Translations::default())
    }

    fn site(root: &Path) -> Site<'static> {
        let mut config = SiteConfig::default();
        config.build.data = root.join("data");
        config.build.assets = root.join("assets");
        config.build.output = root.join("public");
        config.i18n.storage = root.join(".bych4n/storage.json");
        let config: &'static SiteConfig = Box::leak(Box::new(config));

        let content = content();
        build_with(config, &content).unwrap();
        Site {
            config,
            content: Arc::new(RwLock::new(content)),
            prefs: PreferenceStore::new(&config.i18n.storage),
        }
    }

    fn get<'r>(url: &'r str, accept_language: Option<&'r str>) -> Incoming<'r> {
        Incoming {
            post: false,
            url,
            accept_language,
            body: "",
        }
    }

    #[test]
    fn test_static_files() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        let public = dir.path().join("public");

        assert_eq!(route(&site, &get("/docs.html", None)), Reply::File(public.join("docs.html")));
        assert_eq!(route(&site, &get("/en/docs", None)), Reply::File(public.join("en/docs.html")));
        assert_eq!(route(&site, &get("/en/", None)), Reply::File(public.join("en/index.html")));
        assert_eq!(route(&site, &get("/missing.html", None)), Reply::NotFound);
        assert_eq!(route(&site, &get("/../secret", None)), Reply::NotFound);
    }

    #[test]
    fn test_live_view_from_query() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        let Reply::Html(html) = route(&site, &get("/en/docs.html?doc=git-basics", None)) else {
            panic!("expected a rendered page");
        };
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("Git Basics"));
    }

    #[test]
    fn test_shared_search_survives_request() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        let state = UrlState {
            search: Some("c++ & rust".into()),
            ..UrlState::default()
        };
        let url = state.to_url("/blog.html");

        let Reply::Html(html) = route(&site, &get(&url, None)) else {
            panic!("expected a rendered page");
        };
        assert!(html.contains(r#"<h3 class="blog-title"><a href="/blog/cpp-rust.html">"#));
        assert!(!html.contains(r#"<h3 class="blog-title"><a href="/blog/c-dili.html">"#));
    }

    #[test]
    fn test_encoded_path_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());
        let public = dir.path().join("public");
        assert_eq!(route(&site, &get("/en/docs%2Ehtml", None)), Reply::File(public.join("en/docs.html")));
    }

    #[test]
    fn test_language_switch_persists() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        assert_eq!(route(&site, &get("/lang/en", None)), Reply::Redirect("/en/".into()));
        assert_eq!(site.prefs.get(&site.config.i18n.storage_key).as_deref(), Some("en"));
        assert_eq!(route(&site, &get("/", None)), Reply::Redirect("/en/".into()));

        assert_eq!(route(&site, &get("/lang/tr", None)), Reply::Redirect("/".into()));
        assert!(matches!(route(&site, &get("/", None)), Reply::File(_)));
        assert_eq!(route(&site, &get("/lang/de", None)), Reply::NotFound);
    }

    #[test]
    fn test_root_follows_browser_language() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        assert_eq!(route(&site, &get("/", Some("en-US,en;q=0.9"))), Reply::Redirect("/en/".into()));
        assert!(matches!(route(&site, &get("/", Some("tr-TR"))), Reply::File(_)));
    }

    #[test]
    fn test_contact_post_validates() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        let post = Incoming {
            post: true,
            url: "/en/contact",
            accept_language: None,
            body: "name=Ada+Lovelace&email=not-an-email&subject=Hi&message=Hello",
        };
        let Reply::Html(html) = route(&site, &post) else {
            panic!("expected the contact page");
        };
        assert!(html.contains(r#"value="Ada Lovelace""#));
        assert!(html.contains("field-error"));

        let valid = Incoming {
            body: "name=Ada&email=ada%40example.com&subject=Hi&message=Hello",
            ..post
        };
        let started = std::time::Instant::now();
        assert!(matches!(route(&site, &valid), Reply::Html(_)));
        assert!(started.elapsed() < site.config.contact.simulated_delay());

        let stray = Incoming { url: "/docs.html", ..post };
        assert_eq!(route(&site, &stray), Reply::NotFound);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(guess_content_type(Path::new("a.css")), "text/css; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("feed.xml")), "application/xml; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }
}
