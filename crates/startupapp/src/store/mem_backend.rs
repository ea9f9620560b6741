use super::backend::RegistryBackend;
use crate::error::{Result, StartupError};
use crate::model::Entry;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory registry backend for testing.
///
/// Uses `RefCell` for interior mutability since every invocation is
/// single-threaded, which lets `RegistryBackend` take `&self` throughout.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<Vec<Entry>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves, for asserting that reads never write.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl RegistryBackend for MemBackend {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.borrow().clone())
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StartupError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        *self.entries.borrow_mut() = entries.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://registry")
    }
}
