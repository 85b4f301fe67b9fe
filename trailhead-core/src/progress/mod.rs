//! Progress persistence and aggregation.
//!
//! Progress is written through on every mutation (lesson completion, each
//! position-sample tick) and read once at startup. Loading fails soft: a
//! missing or corrupt snapshot never blocks use of the catalogue.

mod aggregate;
mod snapshot;
mod store;

pub use aggregate::{module_progress, overall_percent};
pub use snapshot::{LessonProgress, ProgressSnapshot};
pub use store::{JsonFileProgressStore, MemoryProgressStore, PersistenceError, ProgressStore};

use crate::catalog::Catalog;
use crate::config::PersistenceConfig;

/// Serializes the catalogue's progress and writes it to the durable store.
///
/// # Errors
/// - `PersistenceError` - The underlying store rejected the write
pub fn save(
    store: &mut dyn ProgressStore,
    catalog: &Catalog,
    config: &PersistenceConfig,
) -> Result<(), PersistenceError> {
    let json = ProgressSnapshot::capture(catalog).to_json(config.pretty_json);
    store.write(&json)
}

/// Reads the saved snapshot, returning `None` when nothing usable is stored.
///
/// Unreadable stores and unparseable payloads are logged and treated as
/// "no saved progress"; they must never block startup.
pub fn load(store: &dyn ProgressStore) -> Option<ProgressSnapshot> {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("progress store unreadable, starting fresh: {e}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!("saved progress is corrupt, starting fresh: {e}");
            None
        }
    }
}

/// Loads and applies any saved progress onto a freshly built catalogue.
/// Convenience for the startup path.
pub fn restore(store: &dyn ProgressStore, catalog: &mut Catalog) {
    if let Some(snapshot) = load(store) {
        tracing::debug!(lessons = snapshot.lessons.len(), "restoring saved progress");
        snapshot.apply(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::catalog_of;

    #[test]
    fn test_save_then_restore_round_trip() {
        let config = PersistenceConfig::default();
        let mut store = MemoryProgressStore::new();

        let mut catalog = catalog_of(2, 3);
        catalog.mark_complete(&"1-2".into()).unwrap();
        catalog.record_position(&"2-3".into(), 95.0).unwrap();
        save(&mut store, &catalog, &config).unwrap();

        let mut fresh = catalog_of(2, 3);
        restore(&store, &mut fresh);

        assert_eq!(fresh, catalog);
    }

    #[test]
    fn test_load_of_empty_store_is_none() {
        let store = MemoryProgressStore::new();
        assert!(load(&store).is_none());
    }

    #[test]
    fn test_corrupt_payload_fails_soft() {
        let store = MemoryProgressStore::with_value("not json at all {{{");
        assert!(load(&store).is_none());

        // Restore with a corrupt store leaves the catalogue untouched
        let mut catalog = catalog_of(1, 2);
        let before = catalog.clone();
        restore(&store, &mut catalog);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_save_surfaces_store_failure() {
        let config = PersistenceConfig::default();
        let mut store = MemoryProgressStore::new_with_write_failure();
        let catalog = catalog_of(1, 1);

        assert!(save(&mut store, &catalog, &config).is_err());
    }
}
