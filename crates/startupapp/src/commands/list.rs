use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RegistryStore;

pub fn run<S: RegistryStore>(store: &S) -> Result<CmdResult> {
    let entries = store.list()?;
    Ok(CmdResult::default().with_listed_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_registry_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(run(&store).unwrap().listed_entries.is_empty());
    }

    #[test]
    fn lists_in_insertion_order() {
        let fixture = StoreFixture::new()
            .with_named("zeta", "echo z")
            .with_named("alpha", "echo a");

        let listed = run(&fixture.store).unwrap().listed_entries;
        let ids: Vec<_> = listed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn listing_never_writes() {
        let fixture = StoreFixture::new().with_entries(3);
        let saves = fixture.store.backend().save_count();

        run(&fixture.store).unwrap();
        run(&fixture.store).unwrap();
        assert_eq!(fixture.store.backend().save_count(), saves);
    }
}
