//! `[base]` section configuration.
//!
//! Site metadata used by the page shell, the rss feed and the sitemap.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in bych4n.toml.
///
/// # Example
/// ```toml
/// [base]
/// title = "ByCh4n Group"
/// description = "We Learn Together"
/// url = "https://bych4n-group.github.io"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Fallback site title when translations lack `site.title`.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Fallback site description when translations lack `site.description`.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Absolute site url, required for rss and sitemap.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    #[serde(default)]
    pub copyright: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "ByCh4n Group"
            description = "Birlikte Öğreniyoruz"
            url = "https://bych4n-group.github.io"
            copyright = "ByCh4n Group"
        "#,
        )
        .unwrap();

        assert_eq!(config.base.title, "ByCh4n Group");
        assert_eq!(config.base.description, "Birlikte Öğreniyoruz");
        assert_eq!(config.base.url.as_deref(), Some("https://bych4n-group.github.io"));
        assert_eq!(config.base.copyright, "ByCh4n Group");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "ByCh4n Group");
        assert_eq!(config.base.description, "We Learn Together");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.email, "contact@noreply.bych4n");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [base]
            theme = "dark"
        "#,
        );
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }
}
