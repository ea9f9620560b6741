use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StartupError};
use crate::model::Entry;
use crate::platform::Launcher;
use crate::store::RegistryStore;
use std::path::PathBuf;

/// What the user asked to register.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub command: String,
    /// Explicit name; the id becomes its slug instead of being derived.
    pub name: Option<String>,
    pub stdout: Option<PathBuf>,
    pub stderr: Option<PathBuf>,
}

impl AddRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    pub fn with_stderr(mut self, path: impl Into<PathBuf>) -> Self {
        self.stderr = Some(path.into());
        self
    }
}

pub fn run<S: RegistryStore, L: Launcher>(
    store: &mut S,
    launcher: &L,
    request: AddRequest,
) -> Result<CmdResult> {
    let command = request.command.trim();
    if command.is_empty() {
        return Err(StartupError::Api("Command cannot be empty".to_string()));
    }

    let entry = match request.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Entry::named(name, command),
        Some(_) => return Err(StartupError::Api("Name cannot be empty".to_string())),
        None => Entry::new(command),
    }
    .with_stdout(request.stdout)
    .with_stderr(request.stderr);

    let mut result = CmdResult::default();
    if entry.redirects_output() && !launcher.supports_redirection() {
        result.add_message(CmdMessage::warning(format!(
            "--stdout/--stderr are not supported by {}; append `> /path/to/out.log 2> /path/to/err.log` to the command instead.",
            launcher.name()
        )));
    }

    store.put(entry.clone())?;

    let path = match launcher.install(&entry) {
        Ok(path) => path,
        Err(install_err) => {
            tracing::warn!(id = %entry.id, "install failed, rolling back registry: {}", install_err);
            if let Err(rollback_err) = store.remove(&entry.id) {
                tracing::error!(id = %entry.id, "registry rollback failed: {}", rollback_err);
                return Err(StartupError::Adapter(format!(
                    "{}; the registry still lists `{}` (rollback failed: {}), run `user-startup doctor`",
                    install_err, entry.id, rollback_err
                )));
            }
            return Err(install_err);
        }
    };

    result.add_message(CmdMessage::success(format!(
        "Added `{}` as {}",
        entry.command, entry.id
    )));
    result.add_message(CmdMessage::info(format!("Wrote {}", path.display())));
    result.affected_entries.push(entry);
    result.paths.push(path);
    Ok(result)
}
