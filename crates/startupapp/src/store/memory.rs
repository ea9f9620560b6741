use super::entry_store::EntryStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = EntryStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        EntryStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Entry;
    use crate::store::RegistryStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entries(mut self, count: usize) -> Self {
            for i in 0..count {
                let entry = Entry::new(format!("echo entry-{}", i + 1));
                self.store.put(entry).unwrap();
            }
            self
        }

        pub fn with_named(mut self, name: &str, command: &str) -> Self {
            self.store.put(Entry::named(name, command)).unwrap();
            self
        }
    }
}
