//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "ByCh4n Group".into()
    }

    pub fn description() -> String {
        "We Learn Together".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "ByCh4n Group".into()
    }

    pub fn email() -> String {
        "contact@noreply.bych4n".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub mod files {
        use std::path::PathBuf;

        pub fn translations() -> PathBuf {
            "translations.json".into()
        }

        pub fn posts() -> PathBuf {
            "blog-posts.json".into()
        }

        pub fn docs() -> PathBuf {
            "docs.json".into()
        }

        pub fn projects() -> PathBuf {
            "projects.json".into()
        }
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "feed.xml".into()
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [listing] Section Defaults
// ============================================================================

pub mod listing {
    pub fn blog_page_size() -> usize {
        6
    }

    pub fn recent_posts() -> usize {
        5
    }

    pub fn home_latest_posts() -> usize {
        3
    }

    pub fn top_tags() -> usize {
        20
    }

    pub fn words_per_minute() -> usize {
        200
    }

    pub fn default_image() -> String {
        "/assets/images/blog/default.jpg".into()
    }
}

// ============================================================================
// [i18n] Section Defaults
// ============================================================================

pub mod i18n {
    use crate::i18n::Lang;
    use std::path::PathBuf;

    pub fn default_language() -> Lang {
        Lang::Tr
    }

    pub fn storage() -> PathBuf {
        ".bych4n/storage.json".into()
    }

    pub fn storage_key() -> String {
        "bych4n-language".into()
    }
}

// ============================================================================
// [contact] Section Defaults
// ============================================================================

pub mod contact {
    pub fn message_timeout_ms() -> u64 {
        5000
    }

    pub fn simulated_delay_ms() -> u64 {
        2000
    }

    pub fn success_rate() -> f64 {
        0.9
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
