//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── ContentStores::load() ──► posts, docs, projects, translations
//!     │
//!     ├── pages::render() ──► every page × every language ──► output/*.html
//!     │   copy_file()      ──► assets/ → output/assets, data/ → output/data
//!     │
//!     └── build_rss() + build_sitemap()
//! ```

use crate::{
    config::SiteConfig,
    content::ContentStores,
    context::SiteContext,
    generator::{rss::build_rss, sitemap::build_sitemap},
    i18n::{Lang, PreferenceStore},
    log,
    logger::ProgressBars,
    pages::{self, RenderedPage},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Load the data files and build the whole site.
///
/// Returns the loaded stores so `serve` can render live views from them.
pub fn build_site(config: &SiteConfig) -> Result<ContentStores> {
    let content = ContentStores::load(config);
    build_with(config, &content)?;
    Ok(content)
}

/// Build the site from already loaded stores.
pub fn build_with(config: &SiteConfig, content: &ContentStores) -> Result<Vec<RenderedPage>> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let prefs = PreferenceStore::new(&config.i18n.storage);
    let jobs: Vec<(Lang, String)> = Lang::ALL
        .into_iter()
        .flat_map(|lang| {
            let ctx = SiteContext::new(config, content, &prefs, lang);
            pages::paths(&ctx).into_iter().map(move |path| (lang, path))
        })
        .collect();

    let asset_files = collect_files(&config.build.assets);
    let data_files = collect_files(&config.build.data);

    let progress = ProgressBars::new(&[
        ("pages", jobs.len()),
        ("assets", asset_files.len() + data_files.len()),
    ]);
    let has_error = AtomicBool::new(false);

    log!("build"; "rendering {} pages...", jobs.len());
    let (pages_result, assets_result) = rayon::join(
        || {
            jobs.par_iter()
                .map(|(lang, path)| {
                    if has_error.load(Ordering::Relaxed) {
                        return Err(anyhow!("Aborted"));
                    }
                    let ctx = SiteContext::new(config, content, &prefs, *lang);
                    let result = pages::render(&ctx, path)
                        .ok_or_else(|| anyhow!("no page at {path}"))
                        .and_then(|page| write_page(&page, config).map(|()| page));
                    if let Err(e) = &result {
                        if !has_error.swap(true, Ordering::Relaxed) {
                            log!("error"; "{} {path}: {:#}", lang.code(), e);
                        }
                    }
                    progress.inc("pages");
                    result
                })
                .collect::<Result<Vec<_>>>()
        },
        || {
            let copy = |files: &[PathBuf], from: &Path, to: &Path| {
                files.par_iter().try_for_each(|file| {
                    if has_error.load(Ordering::Relaxed) {
                        return Err(anyhow!("Aborted"));
                    }
                    if let Err(e) = copy_file(file, from, to) {
                        if !has_error.swap(true, Ordering::Relaxed) {
                            log!("error"; "{}: {:#}", file.display(), e);
                        }
                        return Err(anyhow!("Build failed"));
                    }
                    progress.inc("assets");
                    Ok(())
                })
            };
            rayon::join(
                || copy(&asset_files, &config.build.assets, &output.join("assets")),
                || copy(&data_files, &config.build.data, &output.join("data")),
            )
        },
    );

    progress.finish();

    let rendered = pages_result?;
    let (assets_res, data_res) = assets_result;
    assets_res?;
    data_res?;

    let (rss_result, sitemap_result) = rayon::join(
        || build_rss(config, &content.posts),
        || build_sitemap(config, &rendered),
    );
    rss_result?;
    sitemap_result?;

    log!("build"; "done, {} pages", rendered.len());
    Ok(rendered)
}

/// Create the output directory, emptying it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_page(page: &RenderedPage, config: &SiteConfig) -> Result<()> {
    let path = config.build.output.join(&page.file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let html = minify(MinifyType::Html(page.html.as_bytes()), config);
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))
}

/// Every regular file below `dir`; empty when it does not exist.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Copy a single changed asset into `output/assets`.
pub fn copy_asset(file: &Path, config: &SiteConfig) -> Result<()> {
    copy_file(file, &config.build.assets, &config.build.output.join("assets"))
}

/// Copy `file` from below `from` to the same relative place below `to`.
fn copy_file(file: &Path, from: &Path, to: &Path) -> Result<()> {
    let relative = file.strip_prefix(from)?;
    let dest = to.join(relative);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(file, &dest)
        .with_context(|| format!("Failed to copy {} to {}", file.display(), dest.display()))?;
    Ok(())
}
