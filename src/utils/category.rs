//! File category classification for watch mode.
//!
//! | Category | Rebuild Strategy               | Example Files             |
//! |----------|--------------------------------|---------------------------|
//! | Data     | Reload stores + full rebuild   | `data/blog-posts.json`    |
//! | Asset    | Copy the changed file          | `assets/css/style.css`    |
//! | Config   | Full rebuild                   | `bych4n.toml`             |
//! | Unknown  | Ignored                        | Files outside watched dirs|

use crate::config::SiteConfig;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    /// JSON data file
    Data,
    /// Static file copied verbatim
    Asset,
    /// Site configuration (bych4n.toml)
    Config,
    /// File outside watched directories
    Unknown,
}

impl FileCategory {
    pub const WATCHED: [FileCategory; 3] = [Self::Data, Self::Asset, Self::Config];

    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Asset => "assets",
            Self::Config => "config",
            Self::Unknown => "unknown",
        }
    }

    pub fn path(self, config: &SiteConfig) -> Option<&Path> {
        match self {
            Self::Data => Some(&config.build.data),
            Self::Asset => Some(&config.build.assets),
            Self::Config => Some(&config.config_path),
            Self::Unknown => None,
        }
    }

    /// Returns true if this category represents a directory (vs a single file)
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Data | Self::Asset)
    }
}

/// Categorize a changed path to decide how to rebuild.
pub fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    let path = normalize_path(path);

    if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.data) {
        FileCategory::Data
    } else if path.starts_with(&config.build.assets) {
        FileCategory::Asset
    } else {
        FileCategory::Unknown
    }
}

/// Normalize a path to absolute form for reliable comparison.
///
/// Config paths are already canonicalized, so incoming watcher paths are
/// canonicalized too before comparison.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
