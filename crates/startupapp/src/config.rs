//! # Configuration
//!
//! Settings are loaded with [`confique`] from, in priority order:
//! 1. **Environment variables**: `USER_STARTUP_BACKEND`, `USER_STARTUP_ARTIFACT_DIR`.
//! 2. **Config file**: `config.toml` in the config directory (next to `registry.json`).
//! 3. **Compiled defaults**.
//!
//! The config directory itself is not a setting: it is resolved before any file can
//! be read (see [`crate::init`]).
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `auto` | `auto`, `xdg`, `systemd`, `launchd` or `startup-folder` |
//! | `artifact_dir` | per backend | Where OS artifacts are written |

use crate::error::{Result, StartupError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "config.toml";

/// Which platform adapter to use. `Auto` picks the host default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendChoice {
    Auto,
    Xdg,
    Systemd,
    Launchd,
    StartupFolder,
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BackendChoice::Auto => "auto",
            BackendChoice::Xdg => "xdg",
            BackendChoice::Systemd => "systemd",
            BackendChoice::Launchd => "launchd",
            BackendChoice::StartupFolder => "startup-folder",
        };
        f.write_str(s)
    }
}

impl FromStr for BackendChoice {
    type Err = StartupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(BackendChoice::Auto),
            "xdg" => Ok(BackendChoice::Xdg),
            "systemd" => Ok(BackendChoice::Systemd),
            "launchd" => Ok(BackendChoice::Launchd),
            "startup-folder" => Ok(BackendChoice::StartupFolder),
            other => Err(StartupError::Config(format!(
                "unknown backend `{}` (expected auto, xdg, systemd, launchd or startup-folder)",
                other
            ))),
        }
    }
}

fn parse_backend(value: &str) -> Result<BackendChoice> {
    value.parse()
}

/// Configuration for user-startup, stored in `config.toml`.
#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Platform adapter ("auto", "xdg", "systemd", "launchd", "startup-folder")
    #[config(env = "USER_STARTUP_BACKEND", parse_env = parse_backend, default = "auto")]
    pub backend: BackendChoice,

    /// Directory for OS artifacts. When absent, the backend's standard location.
    #[config(env = "USER_STARTUP_ARTIFACT_DIR")]
    pub artifact_dir: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            artifact_dir: None,
        }
    }
}

impl StartupConfig {
    /// Loads env overrides, then `config.toml` from `config_dir`, then defaults.
    /// A missing file is fine; a malformed one is an error.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config = StartupConfig::builder()
            .env()
            .file(config_dir.join(CONFIG_FILE))
            .load()?;
        Ok(config)
    }
}
