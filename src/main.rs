//! bych4n - Builder and development server for the ByCh4n Group community site.

mod anim;
mod build;
mod cli;
mod config;
mod content;
mod context;
mod controller;
mod generator;
mod i18n;
mod init;
mod logger;
mod markdown;
mod pages;
mod query;
mod render;
mod serve;
mod url_state;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use query::{QueryArgs, run_query};
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { name } => new_site(config, name.is_some()),
        Commands::Build { .. } => build_site(config).map(|_| ()),
        Commands::Serve { .. } => {
            let content = build_site(config)?;
            serve_site(config, content)
        }
        Commands::Query {
            collection,
            filter,
            search,
            page,
            lang,
            append,
        } => {
            run_query(
                config,
                &QueryArgs {
                    collection: *collection,
                    filter,
                    search,
                    page: *page,
                    lang: lang.unwrap_or(config.i18n.default_language),
                    append: *append,
                },
            );
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
