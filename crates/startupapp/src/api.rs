//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for all user-startup operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Owns** the registry store and the platform adapter for the invocation
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does not contain business logic, print anything, or pick exit codes.
//!
//! ## Generic Over Store and Launcher
//!
//! `StartupApi<S: RegistryStore, L: Launcher>`:
//! - Production: `StartupApi<FileStore, Platform>`
//! - Testing: `StartupApi<InMemoryStore, MemLauncher>`

use crate::commands;
use crate::platform::Launcher;
use crate::store::RegistryStore;

pub use crate::commands::add::AddRequest;
pub use crate::commands::doctor::DoctorReport;
pub use crate::commands::open::OpenTarget;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::error::{Result, StartupError};

/// The main API facade for user-startup operations.
pub struct StartupApi<S: RegistryStore, L: Launcher> {
    store: S,
    launcher: L,
}

impl<S: RegistryStore, L: Launcher> StartupApi<S, L> {
    pub fn new(store: S, launcher: L) -> Self {
        Self { store, launcher }
    }

    /// Registers a command and installs its OS artifact.
    pub fn add(&mut self, request: AddRequest) -> Result<CmdResult> {
        commands::add::run(&mut self.store, &self.launcher, request)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn remove(&mut self, id: &str) -> Result<CmdResult> {
        commands::remove::run(&mut self.store, &self.launcher, id)
    }

    pub fn open(&self, target: OpenTarget) -> Result<CmdResult> {
        commands::open::run(&self.store, &self.launcher, target)
    }

    /// Reconciles OS artifacts with the registry. `force` reinstalls every entry.
    pub fn doctor(&self, force: bool) -> Result<CmdResult> {
        commands::doctor::run(&self.store, &self.launcher, force)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::derive_id;
    use crate::platform::memory::MemLauncher;
    use crate::store::memory::InMemoryStore;

    fn api() -> StartupApi<InMemoryStore, MemLauncher> {
        StartupApi::new(InMemoryStore::new(), MemLauncher::new())
    }

    #[test]
    fn add_dispatches_to_store_and_launcher() {
        let mut api = api();
        api.add(AddRequest::new("echo hi")).unwrap();

        let id = derive_id("echo hi");
        assert!(api.store().get(&id).is_ok());
        assert!(api.launcher().installed(&id).is_some());
    }

    #[test]
    fn list_returns_listed_entries() {
        let mut api = api();
        api.add(AddRequest::new("echo a")).unwrap();
        api.add(AddRequest::new("echo b")).unwrap();

        let result = api.list().unwrap();
        assert_eq!(result.listed_entries.len(), 2);
        assert!(result.affected_entries.is_empty());
    }

    #[test]
    fn remove_returns_affected_entry() {
        let mut api = api();
        api.add(AddRequest::new("echo hi").named("greeter")).unwrap();

        let result = api.remove("greeter").unwrap();
        assert_eq!(result.affected_entries[0].id, "greeter");
    }

    #[test]
    fn open_returns_path() {
        let api = api();
        let result = api.open(OpenTarget::Artifacts).unwrap();
        assert_eq!(result.paths, vec![api.launcher().artifact_dir()]);
    }

    #[test]
    fn doctor_dispatches() {
        let api = api();
        let result = api.doctor(false).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }
}
