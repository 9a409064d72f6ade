//! Lattice - build-time content catalog engine for a static marketing site.

mod catalog;
mod check;
mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod suggest;
mod utils;

use anyhow::{Result, bail};
use catalog::Catalog;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use generator::routes::{StaticRoutes, build_routes};
use generator::sitemap::build_sitemap;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Any table failure aborts here; there is no partial catalog.
    let catalog = Catalog::from_config(&config)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config, &catalog),
        Commands::Routes => {
            println!("{}", StaticRoutes::from_catalog(&catalog).to_json()?);
            Ok(())
        }
        Commands::Suggest => {
            print!("{}", suggest::render_report(&catalog, &config));
            Ok(())
        }
        Commands::Check => {
            // Drift is expected; the audit informs, it does not fail.
            print!("{}", check::render_report(&catalog, &config));
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Generate sitemap and static routes in parallel.
///
/// Both artifacts are controlled by their `[build.*]` config sections.
fn build_all(config: &SiteConfig, catalog: &Catalog) -> Result<()> {
    let (sitemap_result, routes_result) = rayon::join(
        || build_sitemap(config, catalog),
        || build_routes(config, catalog),
    );

    routes_result?;
    sitemap_result
}
