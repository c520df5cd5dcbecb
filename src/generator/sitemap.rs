//! Sitemap generation.
//!
//! Lists every rendered page, in both languages, for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/python-basics.html</loc>
//!     <lastmod>2024-01-15</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    pages::RenderedPage,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, pages: &[RenderedPage]) -> Result<()> {
    if config.build.sitemap.enable {
        Sitemap::from_pages(config, pages).write(config)?;
    }
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    /// Full URL location
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
}

impl Sitemap {
    fn from_pages(config: &SiteConfig, pages: &[RenderedPage]) -> Self {
        let base = config.base_url();
        let urls = pages
            .iter()
            .map(|page| UrlEntry {
                loc: format!("{base}{}", page.url_path),
                lastmod: page.lastmod.clone(),
            })
            .collect();
        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = &config.build.sitemap.path;
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;
    use std::path::PathBuf;

    fn make_page(url_path: &str, lastmod: Option<&str>) -> RenderedPage {
        RenderedPage {
            lang: Lang::Tr,
            url_path: url_path.to_owned(),
            file: PathBuf::from("index.html"),
            html: String::new(),
            lastmod: lastmod.map(String::from),
        }
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.url = Some("https://bych4n.example/".to_owned());
        config
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a href=\"x\">'b' & c</a>"), "&lt;a href=&quot;x&quot;&gt;&apos;b&apos; &amp; c&lt;/a&gt;");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::from_pages(&config(), &[]).into_xml();
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_pages() {
        let pages = [
            make_page("/", None),
            make_page("/en/blog.html", None),
            make_page("/blog/python-basics.html", Some("2024-01-15")),
        ];
        let xml = Sitemap::from_pages(&config(), &pages).into_xml();

        assert!(xml.contains("<loc>https://bych4n.example/</loc>"));
        assert!(xml.contains("<loc>https://bych4n.example/en/blog.html</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("<lastmod>").count(), 1);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
    }

    #[test]
    fn test_build_sitemap_writes_minified() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.build.sitemap.enable = true;
        config.build.sitemap.path = dir.path().join("sitemap.xml");

        build_sitemap(&config, &[make_page("/docs.html", None)]).unwrap();
        let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<loc>https://bych4n.example/docs.html</loc>"));
    }
}
