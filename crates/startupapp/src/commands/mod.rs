//! # Command Layer
//!
//! This module contains the **core business logic** of user-startup. Each command lives
//! in its own submodule and is a plain function over a [`RegistryStore`] and a
//! [`Launcher`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: No stdout, stderr or formatting
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Keeping Registry and OS in Step
//!
//! Registry entries and OS artifacts correspond 1:1 whenever no command is running.
//! `add` writes the registry first and rolls it back if the install fails; `remove`
//! treats a missing artifact as a warning so a hand-deleted file never blocks the
//! registry cleanup; `doctor` repairs whatever drifted anyway.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and `MemLauncher`, so every branch (including
//! failed installs) runs without touching the filesystem.
//!
//! [`RegistryStore`]: crate::store::RegistryStore
//! [`Launcher`]: crate::platform::Launcher

use crate::model::Entry;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod doctor;
pub mod list;
pub mod open;
pub mod remove;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<Entry>,
    pub listed_entries: Vec<Entry>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<Entry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
