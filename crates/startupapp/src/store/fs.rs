use super::entry_store::EntryStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production registry: `registry.json` under the config directory.
pub type FileStore = EntryStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        EntryStore::with_backend(FsBackend::new(root))
    }

    pub fn registry_path(&self) -> PathBuf {
        self.backend.registry_path()
    }
}
