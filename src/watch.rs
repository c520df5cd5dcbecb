//! File system watcher for live rebuilds during `serve`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │            ScheduledTask "watch" (every POLL_MS)             │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  data   → reload+build │  │
//! │                                  │  config → full build   │  │
//! │                                  │  assets → copy files   │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::{
    anim::{ScheduledTask, StopHandle},
    build::{build_with, copy_asset},
    config::SiteConfig,
    content::ContentStores,
    log,
    logger::WatchStatus,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

const POLL_MS: u64 = 100;
const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// `/site/data/docs.json` → `data/docs.json`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }
}

// =============================================================================
// Change Handling
// =============================================================================

/// What a batch of changed paths requires.
#[derive(Debug, Default, PartialEq, Eq)]
struct Plan {
    reload: bool,
    rebuild: bool,
    config: bool,
    assets: Vec<PathBuf>,
}

fn plan(paths: &[PathBuf], config: &SiteConfig) -> Plan {
    let mut plan = Plan::default();
    for path in paths {
        match categorize_path(path, config) {
            FileCategory::Data => {
                plan.reload = true;
                plan.rebuild = true;
            }
            FileCategory::Config => {
                plan.config = true;
                plan.rebuild = true;
            }
            FileCategory::Asset => plan.assets.push(path.clone()),
            FileCategory::Unknown => {}
        }
    }
    plan
}

/// Apply a batch of changes. Returns true when a full rebuild ran.
fn handle_changes(
    paths: &[PathBuf],
    config: &SiteConfig,
    content: &RwLock<ContentStores>,
    status: &mut WatchStatus,
) -> bool {
    let root = config.get_root();
    let names = paths.iter().map(|p| rel_path(p, root)).collect::<Vec<_>>().join(", ");
    let plan = plan(paths, config);

    if plan.reload {
        *content.write() = ContentStores::load(config);
    }

    if plan.rebuild {
        if plan.config {
            log!("watch"; "config changed; restart serve to apply new settings");
        }
        return match build_with(config, &content.read()) {
            Ok(pages) => {
                status.success(&format!("{names} changed, rebuilt {} pages", pages.len()));
                true
            }
            Err(e) => {
                status.error(&format!("{names}: build failed"), &format!("{e:#}"));
                false
            }
        };
    }

    if !plan.assets.is_empty() {
        let failed: Vec<_> = plan
            .assets
            .iter()
            .filter(|path| path.is_file())
            .filter_map(|path| copy_asset(path, config).err().map(|e| format!("{e:#}")))
            .collect();
        if failed.is_empty() {
            status.success(&format!("{names} copied"));
        } else {
            status.error(&format!("{names}: copy failed"), &failed.join("\n"));
        }
    }
    false
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();
    for cat in FileCategory::WATCHED {
        let Some(path) = cat.path(config).filter(|path| path.exists()) else {
            continue;
        };
        let mode = if cat.is_directory() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(path, mode)
            .with_context(|| format!("Failed to watch {}: {}", cat.name(), path.display()))?;
        watched.push(rel_path(path, root));
    }

    if !watched.is_empty() {
        log!("watch"; "{}", watched.join(", "));
    }
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Start watching data, assets and config; `None` when watching is disabled.
///
/// The returned handle stops the watcher when dropped.
pub fn spawn_watcher(
    config: &'static SiteConfig,
    content: Arc<RwLock<ContentStores>>,
) -> Result<Option<StopHandle>> {
    if !config.serve.watch {
        return Ok(None);
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();
    let handle = ScheduledTask::spawn("watch", Duration::from_millis(POLL_MS), move || {
        // keeps the watcher alive as long as the task
        let _watcher = &watcher;
        for event in rx.try_iter() {
            match event {
                Ok(event) if is_relevant(&event) && !debouncer.in_cooldown() => debouncer.add(event),
                Ok(_) => {}
                Err(e) => log!("watch"; "error: {e}"),
            }
        }
        if debouncer.ready() && handle_changes(&debouncer.take(), config, &content, &mut status) {
            debouncer.mark_rebuild();
        }
    })?;

    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn site(root: &Path) -> SiteConfig {
        let root = root.canonicalize().unwrap();
        let mut config = SiteConfig::default();
        config.config_path = root.join("bych4n.toml");
        config.build.data = root.join("data");
        config.build.assets = root.join("assets");
        config.build.output = root.join("public");
        config.i18n.storage = root.join(".bych4n/storage.json");
        fs::create_dir_all(&config.build.data).unwrap();
        fs::create_dir_all(config.build.assets.join("css")).unwrap();
        config
    }

    #[test]
    fn test_temp_files_ignored() {
        assert!(is_temp_file(Path::new("/site/data/.docs.json.swp")));
        assert!(is_temp_file(Path::new("/site/data/docs.json~")));
        assert!(!is_temp_file(Path::new("/site/data/docs.json")));
    }

    #[test]
    fn test_debouncer_batches_paths() {
        let mut debouncer = Debouncer::new();
        let event = Event::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(PathBuf::from("/site/data/docs.json"))
            .add_path(PathBuf::from("/site/data/docs.json.tmp"));
        debouncer.add(event);
        assert!(!debouncer.ready());

        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS));
        assert!(debouncer.ready());
        assert_eq!(debouncer.take(), vec![PathBuf::from("/site/data/docs.json")]);
        assert!(!debouncer.ready());

        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_plan() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path());
        let data = config.build.data.join("docs.json");
        let css = config.build.assets.join("css/style.css");

        let assets_only = plan(&[css.clone()], &config);
        assert_eq!(
            assets_only,
            Plan {
                reload: false,
                rebuild: false,
                config: false,
                assets: vec![css.clone()]
            }
        );
        let with_data = plan(&[css, data], &config);
        assert!(with_data.reload && with_data.rebuild);
    }

    #[test]
    fn test_data_change_reloads_stores() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path());
        let content = RwLock::new(ContentStores::default());
        let posts = config.build.data.join("blog-posts.json");
        fs::write(
            &posts,
            json!([{"id": "new", "title": {"tr": "Yeni"}, "date": "2024-05-01"}]).to_string(),
        )
        .unwrap();

        let mut status = WatchStatus::new();
        assert!(handle_changes(&[posts], &config, &content, &mut status));
        assert_eq!(content.read().posts.len(), 1);
        assert!(dir.path().join("public/blog/new.html").exists());
    }

    #[test]
    fn test_asset_change_copies_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path());
        let css = config.build.assets.join("css/style.css");
        fs::write(&css, "body {}").unwrap();

        let content = RwLock::new(ContentStores::default());
        let mut status = WatchStatus::new();
        assert!(!handle_changes(&[css], &config, &content, &mut status));
        assert!(dir.path().join("public/assets/css/style.css").exists());
    }
}
