//! `[listing]` section configuration.
//!
//! Page sizes and sidebar limits for the listing pages.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[listing]` section in bych4n.toml.
///
/// # Example
/// ```toml
/// [listing]
/// blog_page_size = 6
/// top_tags = 20
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Posts revealed per "load more" step.
    #[serde(default = "defaults::listing::blog_page_size")]
    #[educe(Default = defaults::listing::blog_page_size())]
    pub blog_page_size: usize,

    /// Entries in the "recent posts" sidebar block.
    #[serde(default = "defaults::listing::recent_posts")]
    #[educe(Default = defaults::listing::recent_posts())]
    pub recent_posts: usize,

    /// Posts shown on the landing page.
    #[serde(default = "defaults::listing::home_latest_posts")]
    #[educe(Default = defaults::listing::home_latest_posts())]
    pub home_latest_posts: usize,

    /// Tags shown in the tag cloud.
    #[serde(default = "defaults::listing::top_tags")]
    #[educe(Default = defaults::listing::top_tags())]
    pub top_tags: usize,

    #[serde(default = "defaults::listing::words_per_minute")]
    #[educe(Default = defaults::listing::words_per_minute())]
    pub words_per_minute: usize,

    /// Card image for posts without one.
    #[serde(default = "defaults::listing::default_image")]
    #[educe(Default = defaults::listing::default_image())]
    pub default_image: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_listing_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.listing.blog_page_size, 6);
        assert_eq!(config.listing.recent_posts, 5);
        assert_eq!(config.listing.home_latest_posts, 3);
        assert_eq!(config.listing.top_tags, 20);
        assert_eq!(config.listing.words_per_minute, 200);
        assert_eq!(config.listing.default_image, "/assets/images/blog/default.jpg");
    }

    #[test]
    fn test_listing_partial_override() {
        let config: SiteConfig = toml::from_str(
            r#"
            [listing]
            blog_page_size = 9
        "#,
        )
        .unwrap();

        assert_eq!(config.listing.blog_page_size, 9);
        assert_eq!(config.listing.recent_posts, 5);
    }
}
