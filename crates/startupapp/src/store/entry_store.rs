use super::backend::RegistryBackend;
use super::RegistryStore;
use crate::error::{Result, StartupError};
use crate::model::Entry;
use std::collections::HashSet;
use std::path::PathBuf;

pub struct EntryStore<B: RegistryBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: RegistryBackend> EntryStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads entries and rejects a registry that breaks id uniqueness.
    /// Only a hand-edited file can get there, so it is treated as corruption.
    fn load_checked(&self) -> Result<Vec<Entry>> {
        let entries = self.backend.load_entries()?;
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(StartupError::StoreCorrupt {
                    path: self.backend.location(),
                    reason: format!("id `{}` appears more than once", entry.id),
                });
            }
        }
        Ok(entries)
    }
}

impl<B: RegistryBackend> RegistryStore for EntryStore<B> {
    fn put(&mut self, entry: Entry) -> Result<()> {
        let mut entries = self.load_checked()?;
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(StartupError::DuplicateId(entry.id));
        }
        entries.push(entry);
        self.backend.save_entries(&entries)
    }

    fn list(&self) -> Result<Vec<Entry>> {
        self.load_checked()
    }

    fn get(&self, id: &str) -> Result<Entry> {
        self.load_checked()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| StartupError::NotFound(id.to_string()))
    }

    fn remove(&mut self, id: &str) -> Result<Entry> {
        let mut entries = self.load_checked()?;
        let pos = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StartupError::NotFound(id.to_string()))?;
        let removed = entries.remove(pos);
        self.backend.save_entries(&entries)?;
        Ok(removed)
    }

    fn location(&self) -> PathBuf {
        self.backend.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn put_then_list_preserves_insertion_order() {
        let mut store = InMemoryStore::new();
        store.put(Entry::named("b", "second")).unwrap();
        store.put(Entry::named("a", "first")).unwrap();
        store.put(Entry::named("c", "third")).unwrap();

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn put_rejects_duplicate_id() {
        let mut store = InMemoryStore::new();
        store.put(Entry::named("sync", "syncthing")).unwrap();

        let err = store.put(Entry::named("sync", "rsync -a")).unwrap_err();
        assert!(matches!(err, StartupError::DuplicateId(ref id) if id == "sync"));

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command, "syncthing");
    }

    #[test]
    fn remove_unknown_id_is_not_found_and_does_not_write() {
        let mut store = InMemoryStore::new();
        store.put(Entry::new("echo hi")).unwrap();
        let saves = store.backend().save_count();

        let err = store.remove("nonexistent").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn remove_returns_the_entry() {
        let mut store = InMemoryStore::new();
        let entry = Entry::new("echo hi");
        let id = entry.id.clone();
        store.put(entry).unwrap();

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.command, "echo hi");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = InMemoryStore::new();
        store.put(Entry::named("one", "echo 1")).unwrap();
        store.put(Entry::named("two", "echo 2")).unwrap();

        assert_eq!(store.get("two").unwrap().command, "echo 2");
        assert!(store.get("three").unwrap_err().is_not_found());
    }

    #[test]
    fn duplicate_ids_in_backend_are_corruption() {
        let store = InMemoryStore::new();
        store
            .backend()
            .save_entries(&[Entry::named("x", "a"), Entry::named("x", "b")])
            .unwrap();

        let err = store.list().unwrap_err();
        assert!(matches!(err, StartupError::StoreCorrupt { .. }));
    }

    #[test]
    fn failed_save_leaves_registry_unchanged() {
        let mut store = InMemoryStore::new();
        store.put(Entry::named("keep", "echo keep")).unwrap();

        store.backend().set_simulate_write_error(true);
        assert!(store.put(Entry::named("new", "echo new")).is_err());
        store.backend().set_simulate_write_error(false);

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["keep"]);
    }
}
