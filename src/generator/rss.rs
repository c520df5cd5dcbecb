//! rss feed generation.
//!
//! One item per blog post, in the default language.

use crate::{
    config::SiteConfig,
    content::Post,
    log,
    utils::{
        date::DateTimeUtc,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
pub fn build_rss(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::new(config, posts).write()?;
    }
    Ok(())
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a [Post],
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, posts: &'a [Post]) -> Self {
        Self { config, posts }
    }

    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .filter_map(|post| post_to_rss_item(post, self.config))
            .collect();

        let base = self.config.base_url();
        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(format!("{base}/"))
            .description(&self.config.base.description)
            .language(Some(self.config.i18n.default_language.code().to_owned()))
            .generator(Some(env!("CARGO_PKG_NAME").to_owned()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    fn write(self) -> Result<()> {
        let config = self.config;
        let xml = self.into_xml()?;
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);
        let rss_path = &config.build.rss.path;

        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(rss_path, &*xml)
            .with_context(|| format!("Failed to write rss feed to {}", rss_path.display()))?;

        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an rss item.
/// Returns None if the title or a valid date is missing.
fn post_to_rss_item(post: &Post, config: &SiteConfig) -> Option<rss::Item> {
    let lang = config.i18n.default_language;
    let title = post.title.get(lang);
    if title.is_empty() {
        return None;
    }
    let pub_date = post
        .date
        .as_deref()
        .and_then(DateTimeUtc::parse)
        .map(DateTimeUtc::to_rfc2822)?;
    let link = format!("{}/blog/{}.html", config.base_url(), post.id);
    let excerpt = post.excerpt.get(lang);
    let categories = post
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(name.as_str()).build())
        .collect::<Vec<_>>();

    Some(
        ItemBuilder::default()
            .title(Some(title.to_owned()))
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description((!excerpt.is_empty()).then(|| excerpt.to_owned()))
            .pub_date(pub_date)
            .author(normalize_rss_author(&post.author, config))
            .categories(categories)
            .build(),
    )
}

/// Normalize author field to rss format: "email@example.com (Name)"
///
/// Priority:
/// 1. Post author if already in valid format
/// 2. Site config author if in valid format
/// 3. Site email with the post author, or the site author when the post has none
fn normalize_rss_author(author: &str, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.to_owned());
    }

    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    if config.base.email.is_empty() {
        return None;
    }
    let name = if author.is_empty() { site_author } else { author };
    Some(format!("{} ({})", config.base.email, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_config(author: &str, email: &str) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.author = author.to_string();
        config.base.email = email.to_string();
        config.base.url = Some("https://bych4n.example/".to_string());
        config
    }

    fn make_post(date: Option<&str>, author: &str) -> Post {
        serde_json::from_value(json!({
            "id": "python-basics",
            "title": {"tr": "Python Temelleri", "en": "Python Basics"},
            "excerpt": {"tr": "Giriş", "en": "Intro"},
            "categories": ["python", "tutorial"],
            "date": date,
            "author": author,
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_rss_author() {
        let config = make_config("ByCh4n Team", "team@bych4n.example");

        assert_eq!(
            normalize_rss_author("post@example.com (Post Author)", &config).as_deref(),
            Some("post@example.com (Post Author)")
        );
        assert_eq!(
            normalize_rss_author("Ayşe", &config).as_deref(),
            Some("team@bych4n.example (Ayşe)")
        );
        assert_eq!(
            normalize_rss_author("", &config).as_deref(),
            Some("team@bych4n.example (ByCh4n Team)")
        );

        let config_valid = make_config("site@example.com (Site Author)", "");
        assert_eq!(
            normalize_rss_author("Ayşe", &config_valid).as_deref(),
            Some("site@example.com (Site Author)")
        );
        assert_eq!(normalize_rss_author("Ayşe", &make_config("Team", "")), None);
    }

    #[test]
    fn test_post_to_rss_item() {
        let config = make_config("ByCh4n Team", "team@bych4n.example");
        let item = post_to_rss_item(&make_post(Some("2024-01-15"), "Ayşe"), &config).unwrap();

        assert_eq!(item.title(), Some("Python Temelleri"));
        assert_eq!(item.link(), Some("https://bych4n.example/blog/python-basics.html"));
        assert_eq!(item.description(), Some("Giriş"));
        assert_eq!(item.categories().len(), 2);
        assert!(item.pub_date().unwrap().contains("15 Jan 2024"));
    }

    #[test]
    fn test_post_without_date_is_skipped() {
        let config = make_config("ByCh4n Team", "team@bych4n.example");
        assert!(post_to_rss_item(&make_post(None, ""), &config).is_none());
        assert!(post_to_rss_item(&make_post(Some("someday"), ""), &config).is_none());
    }

    #[test]
    fn test_feed_xml() {
        let config = make_config("ByCh4n Team", "team@bych4n.example");
        let posts = vec![make_post(Some("2024-01-15"), "Ayşe"), make_post(None, "")];
        let xml = RssFeed::new(&config, &posts).into_xml().unwrap();

        assert!(xml.contains("<link>https://bych4n.example/</link>"));
        assert!(xml.contains("<language>tr</language>"));
        assert_eq!(xml.matches("<item>").count(), 1);
    }

    #[test]
    fn test_build_rss_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = make_config("ByCh4n Team", "team@bych4n.example");
        config.build.rss.enable = true;
        config.build.rss.path = dir.path().join("feed.xml");

        build_rss(&config, &[make_post(Some("2024-01-15"), "")]).unwrap();
        let xml = fs::read_to_string(dir.path().join("feed.xml")).unwrap();
        assert!(xml.contains("Python Temelleri"));
    }
}
