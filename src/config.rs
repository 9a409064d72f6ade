//! Site configuration.
//!
//! Loads `lattice.toml`, applies CLI overrides, and validates before any
//! build step runs. The config is read once and passed by reference into
//! every pipeline stage.

use crate::cli::Cli;
use anyhow::{Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// Config Sections
// ============================================================================

/// Top-level site configuration, mirror of `lattice.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// `[site]` section
    pub site: BaseConfig,

    /// `[build]` section
    pub build: BuildConfig,

    /// Project root (CLI-provided, not part of the file)
    #[serde(skip)]
    pub root: PathBuf,

    /// Path the config was loaded from
    #[serde(skip)]
    pub config_path: PathBuf,
}

/// `[site]` section: identity of the generated site.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used in report headers
    pub title: String,

    /// Absolute base URL, no trailing slash (e.g. `https://example.com`)
    pub base_url: String,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            title: "Lattice Site".into(),
            base_url: String::new(),
        }
    }
}

/// `[build]` section: directories and artifact toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Content directory (posts + data tables), relative to root
    pub content: PathBuf,

    /// Output directory for generated artifacts, relative to root
    pub output: PathBuf,

    /// Minify generated XML
    pub minify: bool,

    /// Sitemap generation settings
    pub sitemap: SitemapConfig,

    /// Static-route emission settings
    pub routes: RoutesConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            output: PathBuf::from("public"),
            minify: false,
            sitemap: SitemapConfig::default(),
            routes: RoutesConfig::default(),
        }
    }
}

/// `[build.sitemap]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Generate sitemap.xml during `build`
    pub enable: bool,

    /// Output file name, relative to the output directory
    pub filename: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            filename: PathBuf::from("sitemap.xml"),
        }
    }
}

/// `[build.routes]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    /// Emit routes.json during `build`
    pub enable: bool,

    /// Output file name, relative to the output directory
    pub filename: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            enable: true,
            filename: PathBuf::from("routes.json"),
        }
    }
}

// ============================================================================
// Loading & Validation
// ============================================================================

impl SiteConfig {
    /// Load config from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Toml)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Apply CLI overrides on top of the file-loaded values.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        self.root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));

        if let Some(args) = cli.build_args() {
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if let Some(base_url) = &args.base_url {
                self.site.base_url = base_url.clone();
            }
        }
        if let Some(content) = &cli.content {
            self.build.content = content.clone();
        }
        if let Some(output) = &cli.output {
            self.build.output = output.clone();
        }
    }

    fn update_option<T: Clone>(target: &mut T, value: Option<&T>) {
        if let Some(value) = value {
            *target = value.clone();
        }
    }

    /// Validate the merged config before building.
    pub fn validate(&self) -> Result<()> {
        if self.site.base_url.is_empty() {
            bail!(ConfigError::Validation(
                "[site.base_url] is required".into()
            ));
        }
        if !self.site.base_url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[site.base_url] must start with http:// or https://".into()
            ));
        }
        if self.site.base_url.ends_with('/') {
            bail!(ConfigError::Validation(
                "[site.base_url] must not end with a slash".into()
            ));
        }
        if !self.content_dir().is_dir() {
            bail!(ConfigError::Validation(format!(
                "content directory not found: {}",
                self.content_dir().display()
            )));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Path & URL helpers
    // ------------------------------------------------------------------------

    /// Content directory, resolved against the project root.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.build.content)
    }

    /// Output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Absolute URL for a site-relative path. `path` must start with `/`.
    pub fn url(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'), "site paths start with /");
        format!("{}{path}", self.site.base_url)
    }
}

// ============================================================================
// Tests
// ============================================================================
