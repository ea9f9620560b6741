use super::Launcher;
use crate::error::{Result, StartupError};
use crate::model::Entry;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory launcher for testing.
///
/// Records installed entries instead of touching the OS. Install failures and
/// opener failures can be simulated to exercise rollback and error paths.
#[derive(Default)]
pub struct MemLauncher {
    artifacts: RefCell<BTreeMap<String, Entry>>,
    simulate_install_error: Cell<bool>,
    simulate_no_opener: Cell<bool>,
    redirection: Cell<bool>,
    revealed: RefCell<Vec<PathBuf>>,
}

impl MemLauncher {
    pub fn new() -> Self {
        let launcher = Self::default();
        launcher.redirection.set(true);
        launcher
    }

    /// A launcher that, like XDG autostart, cannot redirect output.
    pub fn without_redirection() -> Self {
        Self::default()
    }

    pub fn set_simulate_install_error(&self, simulate: bool) {
        self.simulate_install_error.set(simulate);
    }

    pub fn set_simulate_no_opener(&self, simulate: bool) {
        self.simulate_no_opener.set(simulate);
    }

    pub fn installed(&self, id: &str) -> Option<Entry> {
        self.artifacts.borrow().get(id).cloned()
    }

    /// Plants an artifact without a registry entry, or drops one, to simulate
    /// tampering with the OS side.
    pub fn plant(&self, entry: Entry) {
        self.artifacts.borrow_mut().insert(entry.id.clone(), entry);
    }

    pub fn drop_artifact(&self, id: &str) {
        self.artifacts.borrow_mut().remove(id);
    }

    pub fn revealed(&self) -> Vec<PathBuf> {
        self.revealed.borrow().clone()
    }
}

impl Launcher for MemLauncher {
    fn install(&self, entry: &Entry) -> Result<PathBuf> {
        if self.simulate_install_error.get() {
            return Err(StartupError::Adapter("Simulated install error".to_string()));
        }
        self.artifacts
            .borrow_mut()
            .insert(entry.id.clone(), entry.clone());
        Ok(self.artifact_dir().join(&entry.id))
    }

    fn uninstall(&self, id: &str) -> Result<()> {
        self.artifacts
            .borrow_mut()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StartupError::NotFound(id.to_string()))
    }

    fn list_artifacts(&self) -> Result<Vec<String>> {
        Ok(self.artifacts.borrow().keys().cloned().collect())
    }

    fn artifact_dir(&self) -> PathBuf {
        PathBuf::from("memory://artifacts")
    }

    fn supports_redirection(&self) -> bool {
        self.redirection.get()
    }

    fn reveal(&self, path: &Path) -> Result<()> {
        if self.simulate_no_opener.get() {
            return Err(StartupError::Adapter(
                "no file browser available".to_string(),
            ));
        }
        self.revealed.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
