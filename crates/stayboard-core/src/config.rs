//! Configuration types for stayboard.
//!
//! [`Config::load`] reads `~/.config/stayboard/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
path = "OYO.json"

[ui]
sidebar_width_pct = 28
theme             = "default"

[charts]
rating_bins   = 20
discount_bins = 25
top_hotels    = 10
top_cities    = 10
top_amenities = 15
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/stayboard/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Dataset loaded when no path is given on the command line.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf { PathBuf::from("OYO.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width_pct")]
    pub sidebar_width_pct: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_sidebar_width_pct() -> u16 { 28 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width_pct: default_sidebar_width_pct(),
            theme: default_theme(),
        }
    }
}

/// `[charts]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_rating_bins")]
    pub rating_bins: usize,
    #[serde(default = "default_discount_bins")]
    pub discount_bins: usize,
    #[serde(default = "default_top_hotels")]
    pub top_hotels: usize,
    #[serde(default = "default_top_cities")]
    pub top_cities: usize,
    #[serde(default = "default_top_amenities")]
    pub top_amenities: usize,
}

fn default_rating_bins() -> usize { 20 }
fn default_discount_bins() -> usize { 25 }
fn default_top_hotels() -> usize { 10 }
fn default_top_cities() -> usize { 10 }
fn default_top_amenities() -> usize { 15 }

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            rating_bins: default_rating_bins(),
            discount_bins: default_discount_bins(),
            top_hotels: default_top_hotels(),
            top_cities: default_top_cities(),
            top_amenities: default_top_amenities(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/stayboard/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::from_sources(Some(path))
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Defaults overlaid with the TOML file at `path`, if given and present.
    pub fn from_sources(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("stayboard")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
