//! Minification of rendered pages and generated feeds.
//!
//! Pages go through `minify_html`; the sitemap and RSS feed only lose the
//! indentation between tags.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

/// Minify `content` when `[build] minify` is on; borrowed otherwise.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match (config.build.minify, content) {
        (false, MinifyType::Html(bytes) | MinifyType::Xml(bytes)) => Cow::Borrowed(bytes),
        (true, MinifyType::Html(html)) => Cow::Owned(minify_page(html)),
        (true, MinifyType::Xml(xml)) => Cow::Owned(collapse_xml(xml)),
    }
}

/// Pages carry inline CSS but no authored scripts; the JSON binding block
/// is left as it is.
fn minify_page(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.minify_css = true;
    minify_html::minify(html, &cfg)
}

/// Drop indentation and blank lines.
///
/// Lines are glued directly only between two tags; text that wraps over
/// several lines keeps a single space at each break.
fn collapse_xml(xml: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(xml);
    let mut out = String::with_capacity(text.len());
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if !out.is_empty() && !(out.ends_with('>') && line.starts_with('<')) {
            out.push(' ');
        }
        out.push_str(line);
    }
    out.into_bytes()
}
