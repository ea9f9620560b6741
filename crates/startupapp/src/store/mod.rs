//! # Registry Store
//!
//! The registry is the single source of truth for what should run at login. OS
//! artifacts (plists, units, `.desktop` files, startup scripts) are derived from it
//! and can always be regenerated; the registry itself cannot.
//!
//! ## Two Layers
//!
//! - [`backend::RegistryBackend`]: raw I/O. Load and atomically save the ordered
//!   entry list. [`fs_backend::FsBackend`] writes `registry.json`,
//!   [`mem_backend::MemBackend`] keeps everything in memory for tests.
//! - [`entry_store::EntryStore`]: the logic on top of any backend. Enforces id
//!   uniqueness, preserves insertion order, answers lookups. It implements
//!   [`RegistryStore`], which is what the API layer is generic over.
//!
//! ## Storage Layout
//!
//! ```text
//! <config dir>/
//! ├── registry.json   # {"version": 1, "entries": [...]}, insertion order
//! └── config.toml     # optional settings (see config.rs)
//! ```
//!
//! Every mutation rewrites `registry.json` through a temp file and a rename, so an
//! interrupted process leaves either the old or the new registry, never half of one.
//! There is no locking: two invocations racing on the same registry may lose one
//! write. Invocations are interactive and rare, so this is accepted.

use crate::error::Result;
use crate::model::Entry;
use std::path::PathBuf;

pub mod backend;
pub mod entry_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Abstract interface for the registry of startup entries.
pub trait RegistryStore {
    /// Append an entry. Fails with `DuplicateId` if the id is taken.
    fn put(&mut self, entry: Entry) -> Result<()>;

    /// All entries in insertion order.
    fn list(&self) -> Result<Vec<Entry>>;

    /// A single entry by id.
    fn get(&self, id: &str) -> Result<Entry>;

    /// Delete an entry, returning it. Fails with `NotFound` if absent.
    fn remove(&mut self, id: &str) -> Result<Entry>;

    /// Directory where the registry lives, for user inspection.
    fn location(&self) -> PathBuf;
}
