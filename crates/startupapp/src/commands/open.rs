use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::platform::Launcher;
use crate::store::RegistryStore;

/// Which folder `open` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenTarget {
    /// Where `registry.json` lives.
    #[default]
    Registry,
    /// Where the platform adapter writes OS artifacts.
    Artifacts,
}

/// Opens a folder in the OS file browser. Purely informational: neither the
/// registry nor any artifact is read or written.
pub fn run<S: RegistryStore, L: Launcher>(
    store: &S,
    launcher: &L,
    target: OpenTarget,
) -> Result<CmdResult> {
    let path = match target {
        OpenTarget::Registry => store.location(),
        OpenTarget::Artifacts => launcher.artifact_dir(),
    };

    launcher.reveal(&path)?;

    let mut result = CmdResult::default().with_paths(vec![path.clone()]);
    result.add_message(CmdMessage::info(format!("Opened {}", path.display())));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::error::StartupError;
    use crate::platform::memory::MemLauncher;
    use crate::store::fs::FileStore;
    use crate::store::fs_backend::REGISTRY_FILE;
    use crate::store::memory::fixtures::StoreFixture;
    use std::path::PathBuf;

    #[test]
    fn opens_registry_location() {
        let fixture = StoreFixture::new();
        let launcher = MemLauncher::new();

        let result = run(&fixture.store, &launcher, OpenTarget::Registry).unwrap();
        assert_eq!(result.paths, vec![PathBuf::from("memory://registry")]);
        assert_eq!(launcher.revealed(), vec![PathBuf::from("memory://registry")]);
    }

    #[test]
    fn opens_artifact_dir() {
        let fixture = StoreFixture::new();
        let launcher = MemLauncher::new();

        run(&fixture.store, &launcher, OpenTarget::Artifacts).unwrap();
        assert_eq!(launcher.revealed(), vec![launcher.artifact_dir()]);
    }

    #[test]
    fn open_never_mutates() {
        let fixture = StoreFixture::new().with_entries(2);
        let launcher = MemLauncher::new();
        let before = list::run(&fixture.store).unwrap().listed_entries;
        let saves = fixture.store.backend().save_count();

        for _ in 0..3 {
            run(&fixture.store, &launcher, OpenTarget::Registry).unwrap();
        }

        assert_eq!(list::run(&fixture.store).unwrap().listed_entries, before);
        assert_eq!(fixture.store.backend().save_count(), saves);
    }

    #[test]
    fn missing_opener_is_adapter_error() {
        let fixture = StoreFixture::new();
        let launcher = MemLauncher::new();
        launcher.set_simulate_no_opener(true);

        let err = run(&fixture.store, &launcher, OpenTarget::Registry).unwrap_err();
        assert!(matches!(err, StartupError::Adapter(_)));
    }

    #[test]
    fn open_works_with_corrupt_registry() {
        let tmp = tempfile::TempDir::new().unwrap();
        let registry = tmp.path().join(REGISTRY_FILE);
        std::fs::write(&registry, "not json at all").unwrap();
        let store = FileStore::new(tmp.path().to_path_buf());
        let launcher = MemLauncher::new();

        let result = run(&store, &launcher, OpenTarget::Registry).unwrap();
        assert_eq!(result.paths, vec![tmp.path().to_path_buf()]);
        assert_eq!(
            std::fs::read_to_string(&registry).unwrap(),
            "not json at all"
        );
    }
}
