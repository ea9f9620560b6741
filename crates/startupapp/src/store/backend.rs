use crate::error::Result;
use crate::model::Entry;
use std::path::PathBuf;

/// Abstract interface for raw registry I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while EntryStore handles the "what" (id uniqueness, ordering, lookups).
pub trait RegistryBackend {
    /// Load every entry in insertion order.
    /// A registry that was never written is empty, not an error.
    fn load_entries(&self) -> Result<Vec<Entry>>;

    /// Replace the persisted entries.
    /// MUST be atomic (e.g. write to tmp then rename) so an interrupted write
    /// never leaves a truncated registry behind.
    fn save_entries(&self, entries: &[Entry]) -> Result<()>;

    /// Directory holding the registry. Never touches the registry contents.
    fn location(&self) -> PathBuf;
}
