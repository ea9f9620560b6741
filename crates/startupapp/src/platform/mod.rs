//! # Platform Adapters
//!
//! A platform adapter turns an [`Entry`] into whatever the host OS executes at login,
//! and takes it away again. Exactly one adapter is chosen per process, at startup,
//! by [`Platform::detect`]; nothing mixes variants at runtime.
//!
//! | Variant | Mechanism | Artifact |
//! |---------|-----------|----------|
//! | [`Platform::XdgAutostart`] | freedesktop login items | `~/.config/autostart/user-startup-<id>.desktop` |
//! | [`Platform::SystemdUser`] | systemd user manager | `~/.config/systemd/user/user-startup-<id>.service` |
//! | [`Platform::LaunchAgent`] | launchd | `~/Library/LaunchAgents/user-startup.<id>.plist` |
//! | [`Platform::StartupFolder`] | Windows Startup folder | `...\Startup\user-startup-<id>.cmd` |
//!
//! ## One Artifact per Entry
//!
//! Artifact names are a pure function of the entry id, so an adapter can always find
//! the artifact for an id without extra bookkeeping. The first line of every artifact
//! is a comment naming the tool and the command, so a stray file is recognizable when
//! someone browses the folder.
//!
//! ## The Launcher Seam
//!
//! The API layer is generic over [`Launcher`]. [`Platform`] is the production
//! implementation; [`memory::MemLauncher`] is a fake for tests that can be told to
//! fail installs, which is how rollback is exercised without touching the OS.

use crate::config::BackendChoice;
use crate::error::{Result, StartupError};
use crate::model::Entry;
use directories::BaseDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod launchd;
pub mod memory;
pub mod startup_folder;
pub mod systemd;
pub mod xdg;

pub use launchd::LaunchAgent;
pub use startup_folder::StartupFolder;
pub use systemd::SystemdUser;
pub use xdg::XdgAutostart;

/// Every artifact name starts with this, which is how owned artifacts are found.
pub const ARTIFACT_PREFIX: &str = "user-startup";

/// The OS-facing operations the API layer needs.
pub trait Launcher {
    /// Create (or overwrite) the OS artifact for an entry. Returns its path.
    fn install(&self, entry: &Entry) -> Result<PathBuf>;

    /// Remove the OS artifact for an id. `NotFound` if it is already gone.
    fn uninstall(&self, id: &str) -> Result<()>;

    /// Ids of all artifacts this tool owns in the artifact directory.
    fn list_artifacts(&self) -> Result<Vec<String>>;

    /// Where artifacts are written.
    fn artifact_dir(&self) -> PathBuf;

    /// Whether `stdout`/`stderr` redirection is honored by this mechanism.
    fn supports_redirection(&self) -> bool;

    /// Hand a directory to the OS file browser.
    fn reveal(&self, path: &Path) -> Result<()>;

    /// Short name for messages and logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub enum Platform {
    XdgAutostart(XdgAutostart),
    SystemdUser(SystemdUser),
    LaunchAgent(LaunchAgent),
    StartupFolder(StartupFolder),
}

impl Platform {
    /// Picks the adapter for this host, honoring an explicit backend choice and an
    /// artifact directory override.
    pub fn detect(choice: BackendChoice, artifact_dir: Option<PathBuf>) -> Result<Self> {
        let kind = match choice {
            BackendChoice::Auto => host_default()?,
            BackendChoice::Xdg => Kind::Xdg,
            BackendChoice::Systemd => Kind::Systemd,
            BackendChoice::Launchd => Kind::Launchd,
            BackendChoice::StartupFolder => Kind::StartupFolder,
        };

        let platform = match kind {
            Kind::Xdg => {
                let dir = resolve_dir(artifact_dir, |b| b.config_dir().join("autostart"))?;
                Platform::XdgAutostart(XdgAutostart::new(dir))
            }
            Kind::Systemd => {
                let dir = resolve_dir(artifact_dir, |b| {
                    b.config_dir().join("systemd").join("user")
                })?;
                Platform::SystemdUser(SystemdUser::new(dir, which::which("systemctl").ok()))
            }
            Kind::Launchd => {
                let dir = resolve_dir(artifact_dir, |b| {
                    b.home_dir().join("Library").join("LaunchAgents")
                })?;
                Platform::LaunchAgent(LaunchAgent::new(dir))
            }
            Kind::StartupFolder => {
                let dir = resolve_dir(artifact_dir, |b| {
                    b.config_dir()
                        .join("Microsoft")
                        .join("Windows")
                        .join("Start Menu")
                        .join("Programs")
                        .join("Startup")
                })?;
                Platform::StartupFolder(StartupFolder::new(dir))
            }
        };

        tracing::debug!(
            backend = platform.name(),
            dir = %platform.artifact_dir().display(),
            "platform adapter selected"
        );
        Ok(platform)
    }

    pub fn artifact_path(&self, id: &str) -> PathBuf {
        self.artifact_dir().join(self.file_name(id))
    }

    fn file_name(&self, id: &str) -> String {
        match self {
            Platform::XdgAutostart(_) => XdgAutostart::file_name(id),
            Platform::SystemdUser(_) => SystemdUser::file_name(id),
            Platform::LaunchAgent(_) => LaunchAgent::file_name(id),
            Platform::StartupFolder(_) => StartupFolder::file_name(id),
        }
    }

    fn id_from_file_name(&self, name: &str) -> Option<String> {
        match self {
            Platform::XdgAutostart(_) => XdgAutostart::id_from_file_name(name),
            Platform::SystemdUser(_) => SystemdUser::id_from_file_name(name),
            Platform::LaunchAgent(_) => LaunchAgent::id_from_file_name(name),
            Platform::StartupFolder(_) => StartupFolder::id_from_file_name(name),
        }
    }

    /// Renders the artifact text for an entry.
    pub fn render(&self, entry: &Entry) -> String {
        match self {
            Platform::XdgAutostart(p) => p.render(entry),
            Platform::SystemdUser(p) => p.render(entry),
            Platform::LaunchAgent(p) => p.render(entry),
            Platform::StartupFolder(p) => p.render(entry),
        }
    }
}

impl Launcher for Platform {
    fn install(&self, entry: &Entry) -> Result<PathBuf> {
        let path = self.artifact_path(&entry.id);
        let content = self.render(entry);
        tracing::debug!(path = %path.display(), "writing artifact:\n{}", content);
        // Kept so a failed enable can put an earlier, working unit back.
        let previous = match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StartupError::Io(e)),
        };
        write_atomic(&path, &content)?;

        if let Platform::SystemdUser(systemd) = self {
            if let Err(e) = systemd.enable(&path) {
                let restored = match &previous {
                    Some(text) => write_atomic(&path, text),
                    None => fs::remove_file(&path).map_err(StartupError::Io),
                };
                if let Err(restore_err) = restored {
                    tracing::error!(
                        path = %path.display(),
                        "could not restore unit: {}",
                        restore_err
                    );
                }
                return Err(e);
            }
        }

        tracing::info!(id = %entry.id, path = %path.display(), "installed startup artifact");
        Ok(path)
    }

    fn uninstall(&self, id: &str) -> Result<()> {
        let path = self.artifact_path(id);
        let exists = path.exists();

        // A hand-deleted unit can still be enabled through a wants/ symlink.
        if let Platform::SystemdUser(systemd) = self {
            if let Err(e) = systemd.disable(&path) {
                if exists {
                    tracing::warn!(id, "could not disable unit, removing it anyway: {}", e);
                } else {
                    tracing::debug!(id, "disable of missing unit failed: {}", e);
                }
            }
        }

        if !exists {
            return Err(StartupError::NotFound(id.to_string()));
        }

        fs::remove_file(&path).map_err(StartupError::Io)?;
        tracing::info!(id, path = %path.display(), "removed startup artifact");
        Ok(())
    }

    fn list_artifacts(&self) -> Result<Vec<String>> {
        let dir = self.artifact_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir).map_err(StartupError::Io)? {
            let path = entry.map_err(StartupError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(id) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| self.id_from_file_name(name))
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn artifact_dir(&self) -> PathBuf {
        match self {
            Platform::XdgAutostart(p) => p.dir.clone(),
            Platform::SystemdUser(p) => p.dir.clone(),
            Platform::LaunchAgent(p) => p.dir.clone(),
            Platform::StartupFolder(p) => p.dir.clone(),
        }
    }

    fn supports_redirection(&self) -> bool {
        !matches!(self, Platform::XdgAutostart(_))
    }

    fn reveal(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        tracing::debug!(path = %path.display(), "opening in file browser");
        open::that(path).map_err(|e| {
            StartupError::Adapter(format!(
                "no file browser available to open {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Platform::XdgAutostart(_) => "xdg-autostart",
            Platform::SystemdUser(_) => "systemd-user",
            Platform::LaunchAgent(_) => "launch-agent",
            Platform::StartupFolder(_) => "startup-folder",
        }
    }
}

/// A concrete adapter choice, after `auto` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Xdg,
    Systemd,
    Launchd,
    StartupFolder,
}

fn host_default() -> Result<Kind> {
    if cfg!(target_os = "macos") {
        Ok(Kind::Launchd)
    } else if cfg!(windows) {
        Ok(Kind::StartupFolder)
    } else if cfg!(unix) {
        Ok(Kind::Xdg)
    } else {
        Err(StartupError::Adapter(format!(
            "unsupported platform `{}`; set `backend` in config.toml",
            std::env::consts::OS
        )))
    }
}

fn resolve_dir(
    override_dir: Option<PathBuf>,
    default: impl FnOnce(&BaseDirs) -> PathBuf,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    BaseDirs::new()
        .map(|b| default(&b))
        .ok_or_else(|| StartupError::Adapter("could not determine home directory".to_string()))
}

/// Writes through a temp file in the same directory, then renames into place.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| StartupError::Adapter(format!("{} has no parent", path.display())))?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(StartupError::Io)?;
    }

    let tmp_path = dir.join(format!(".{}-{}.tmp", ARTIFACT_PREFIX, Uuid::new_v4()));
    let write = || -> std::io::Result<()> {
        let mut handle = fs::File::create(&tmp_path)?;
        handle.write_all(content.as_bytes())?;
        handle.sync_all()?;
        fs::rename(&tmp_path, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StartupError::Io(e)
    })
}

/// Strips `prefix` and `suffix` from a file name, yielding a non-empty id.
pub(crate) fn strip_affixes(name: &str, prefix: &str, suffix: &str) -> Option<String> {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
