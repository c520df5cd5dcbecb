//! `[build]` section configuration.
//!
//! Paths of the data files, output and assets, plus rss and sitemap switches.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in bych4n.toml.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"
/// output = "public"
/// minify = true
///
/// [build.files]
/// posts = "blog-posts.json"
///
/// [build.rss]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding the JSON data files.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets copied verbatim (styles, scripts, images).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    #[serde(default)]
    pub files: DataFiles,

    #[serde(default)]
    pub rss: RssConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[build.files]` - data file names, relative to `build.data`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct DataFiles {
    #[serde(default = "defaults::build::files::translations")]
    #[educe(Default = defaults::build::files::translations())]
    pub translations: PathBuf,

    #[serde(default = "defaults::build::files::posts")]
    #[educe(Default = defaults::build::files::posts())]
    pub posts: PathBuf,

    #[serde(default = "defaults::build::files::docs")]
    #[educe(Default = defaults::build::files::docs())]
    pub docs: PathBuf,

    #[serde(default = "defaults::build::files::projects")]
    #[educe(Default = defaults::build::files::projects())]
    pub projects: PathBuf,
}

/// `[build.rss]` - blog post feed. Requires `[base].url`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct RssConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    /// Relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

/// `[build.sitemap]` - sitemap.xml. Requires `[base].url`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.data, PathBuf::from("data"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.files.posts, PathBuf::from("blog-posts.json"));
        assert_eq!(config.build.files.docs, PathBuf::from("docs.json"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(!config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("feed.xml"));
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_build_config_custom_files() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            data = "content"
            minify = false

            [build.files]
            posts = "posts.json"

            [build.rss]
            enable = true
            path = "rss.xml"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.data, PathBuf::from("content"));
        assert!(!config.build.minify);
        assert_eq!(config.build.files.posts, PathBuf::from("posts.json"));
        assert_eq!(config.build.files.docs, PathBuf::from("docs.json"));
        assert!(config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("rss.xml"));
    }

    #[test]
    fn test_build_config_unknown_field() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [build.files]
            comments = "comments.json"
        "#,
        );
        assert!(result.is_err());
    }
}
