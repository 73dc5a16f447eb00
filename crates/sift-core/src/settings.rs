//! User settings.
//!
//! Layered, lowest priority first: built-in defaults, the TOML file at
//! `$XDG_CONFIG_HOME/sift/config.toml` (or the platform equivalent), then
//! `SIFT_*` environment variables (`SIFT_SOURCE`, `SIFT_CLEAR_ON_CLOSE`,
//! `SIFT_OVERLAY__OPEN_KEY`).

use std::path::PathBuf;

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use directories::ProjectDirs;
use eyre::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_SOURCE: &str = "search.json";
pub const DEFAULT_OPEN_KEY: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverlaySettings {
    /// Key that opens the overlay from the background view.
    pub open_key: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Index location: a file path or an `http(s)://` URL.
    pub source: String,
    /// Clear the query when the overlay closes instead of keeping it for the
    /// next open.
    pub clear_on_close: bool,
    pub overlay: OverlaySettings,
}

impl Settings {
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sift").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Defaults plus every configured source, ready for overrides.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Self::layered(Self::config_file(), Self::environment())
    }

    /// The `SIFT_*` environment layer. Nested keys use `__`, so
    /// `SIFT_OVERLAY__OPEN_KEY` sets `overlay.open_key`.
    pub fn environment() -> Environment {
        Environment::with_prefix("SIFT")
            .prefix_separator("_")
            .separator("__")
    }

    fn layered(file: Option<PathBuf>, env: Environment) -> Result<ConfigBuilder<DefaultState>> {
        let mut builder = Config::builder()
            .set_default("source", DEFAULT_SOURCE)?
            .set_default("clear_on_close", false)?
            .set_default("overlay.open_key", DEFAULT_OPEN_KEY.to_string())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        Ok(builder.add_source(env))
    }

    pub fn new() -> Result<Self> {
        Self::builder()?
            .build()
            .wrap_err("could not load settings")?
            .try_deserialize()
            .wrap_err("could not deserialize settings")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            clear_on_close: false,
            overlay: OverlaySettings {
                open_key: DEFAULT_OPEN_KEY,
            },
        }
    }
}
