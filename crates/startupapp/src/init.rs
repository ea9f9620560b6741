//! # Context Initialization
//!
//! Builds everything an invocation needs, once, and hands it to the caller. The
//! library never reads ambient state after this point: the config directory, the
//! config values and the platform adapter are all injected into [`StartupApi`].
//!
//! ## Config Directory Resolution
//!
//! 1. An explicit path (the CLI's `--config-dir`).
//! 2. `USER_STARTUP_HOME`, primarily for tests and portable setups.
//! 3. The OS config directory via the `directories` crate
//!    (`~/.config/user-startup` on Linux,
//!    `~/Library/Application Support/io.user-startup.user-startup` on macOS,
//!    `%APPDATA%\user-startup\user-startup\config` on Windows).

use crate::api::StartupApi;
use crate::config::StartupConfig;
use crate::error::{Result, StartupError};
use crate::platform::Platform;
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "USER_STARTUP_HOME";

pub struct StartupContext {
    pub api: StartupApi<FileStore, Platform>,
    pub config: StartupConfig,
    pub config_dir: PathBuf,
}

/// Resolves the config directory without touching the filesystem.
pub fn resolve_config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("io", "user-startup", "user-startup")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| StartupError::Config("could not determine config directory".to_string()))
}

/// Loads configuration, selects the platform adapter and opens the registry.
pub fn initialize(config_dir: Option<PathBuf>) -> Result<StartupContext> {
    let config_dir = resolve_config_dir(config_dir)?;
    tracing::debug!(dir = %config_dir.display(), "using config directory");

    let config = StartupConfig::load(&config_dir)?;
    let platform = Platform::detect(config.backend, config.artifact_dir.clone())?;
    let store = FileStore::new(config_dir.clone());

    Ok(StartupContext {
        api: StartupApi::new(store, platform),
        config,
        config_dir,
    })
}
