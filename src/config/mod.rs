//! Site configuration management for `bych4n.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)               |
//! | `[build]`   | Data files, output, assets, RSS, sitemap         |
//! | `[listing]` | Page sizes and sidebar limits                    |
//! | `[i18n]`    | Default language and preference storage          |
//! | `[contact]` | Contact form timings                             |
//! | `[serve]`   | Development server (port, interface, watch)      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "ByCh4n Group"
//! url = "https://bych4n-group.github.io"
//!
//! [build]
//! data = "data"
//! output = "public"
//!
//! [build.rss]
//! enable = true
//!
//! [listing]
//! blog_page_size = 6
//! ```

mod base;
mod build;
mod contact;
pub mod defaults;
mod error;
mod i18n;
mod listing;
mod serve;

use base::BaseConfig;
use build::BuildConfig;
pub use contact::ContactConfig;
use error::ConfigError;
use i18n::I18nConfig;
use listing::ListingConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing bych4n.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub contact: ContactConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute path of a data file named in `[build.files]`.
    pub fn data_file(&self, file: &Path) -> PathBuf {
        self.build.data.join(file)
    }

    /// Site url without a trailing slash, empty when unset.
    pub fn base_url(&self) -> &str {
        self.base.url.as_deref().unwrap_or("").trim_end_matches('/')
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => {
                let base = cli
                    .root
                    .as_ref()
                    .cloned()
                    .unwrap_or_else(|| self.get_root().to_owned());
                base.join(name)
            }
            _ => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.update_path_with_root(&root, &cli.config);

        if let Some(args) = cli.build_args() {
            if args.clean {
                self.build.clean = true;
            }
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            build_args,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            if build_args.base_url.is_none() {
                self.base.url = Some(self.serve.local_url());
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every configured path against the root and make it absolute
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.i18n.storage = Self::normalize_path(&root.join(&self.i18n.storage));
        self.build.rss.path = self.build.output.join(&self.build.rss.path);
        self.build.sitemap.path = self.build.output.join(&self.build.sitemap.path);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let needs_url = self.build.rss.enable || self.build.sitemap.enable;
        match &self.base.url {
            None if needs_url => {
                bail!(ConfigError::Validation(
                    "[base.url] is required for RSS and sitemap generation".into()
                ))
            }
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                bail!(ConfigError::Validation(
                    "[base.url] must start with http:// or https://".into()
                ))
            }
            _ => {}
        }

        for (field, value) in [
            ("[listing.blog_page_size]", self.listing.blog_page_size),
            ("[listing.words_per_minute]", self.listing.words_per_minute),
        ] {
            if value == 0 {
                bail!(ConfigError::Validation(format!(
                    "{field} must be greater than 0"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.contact.success_rate) {
            bail!(ConfigError::Validation(
                "[contact.success_rate] must be between 0 and 1".into()
            ));
        }

        if self.i18n.storage_key.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[i18n.storage_key] must not be empty".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["bych4n"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.base.title, "ByCh4n Group");
        assert_eq!(config.listing.blog_page_size, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = SiteConfig::from_str("[deploy]\nforce = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/bych4n.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_rss_requires_url() {
        let config = SiteConfig::from_str("[build.rss]\nenable = true").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[base.url]"));
    }

    #[test]
    fn test_url_scheme_checked() {
        let config = SiteConfig::from_str(
            r#"
            [base]
            url = "bych4n-group.github.io"
        "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = SiteConfig::from_str("[listing]\nblog_page_size = 0").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blog_page_size"));
    }

    #[test]
    fn test_success_rate_range() {
        let config = SiteConfig::from_str("[contact]\nsuccess_rate = 1.5").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_update_with_cli_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "--data", "content", "build"]));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.build.data, root.join("content"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.config_path, root.join("bych4n.toml"));
        assert_eq!(config.build.rss.path, root.join("public").join("feed.xml"));
        assert_eq!(
            config.data_file(&config.build.files.posts),
            root.join("content").join("blog-posts.json")
        );
    }

    #[test]
    fn test_update_with_cli_build_flags() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&[
            "build",
            "--clean",
            "--minify",
            "false",
            "--rss",
            "--base-url",
            "https://bych4n-group.github.io/",
        ]));

        assert!(config.build.clean);
        assert!(!config.build.minify);
        assert!(config.build.rss.enable);
        assert_eq!(config.base_url(), "https://bych4n-group.github.io");
    }

    #[test]
    fn test_serve_sets_local_url() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["serve", "--port", "8000"]));

        assert_eq!(config.serve.port, 8000);
        assert_eq!(config.base.url.as_deref(), Some("http://127.0.0.1:8000"));
    }

    #[test]
    fn test_init_joins_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["--root", root, "init", "site"]));

        let expected = dir.path().canonicalize().unwrap().join("site");
        assert_eq!(config.get_root(), expected.as_path());
    }
}
