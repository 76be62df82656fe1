//! JSON snapshot persistence for [`MemoryStore`].
//!
//! The CLI keeps the whole library state in one JSON file: load on start,
//! save after a successful operation. Entities are stored as flat vectors
//! so the file stays diffable and independent of map iteration order.

use crate::MemoryStore;
use biblio_core::{BiblioError, BiblioResult, Client, Loan, Material, Reservation, Sanction};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a [`MemoryStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub sanctions: Vec<Sanction>,
    /// `[loan, reservation, sanction]` id counters.
    #[serde(default)]
    pub counters: [u64; 3],
}

impl Snapshot {
    pub fn from_store(store: &MemoryStore) -> Self {
        let (clients, materials, loans, reservations, sanctions, counters) = store.parts();
        let mut snap = Self {
            clients: clients.values().cloned().collect(),
            materials: materials.values().cloned().collect(),
            loans: loans.values().cloned().collect(),
            reservations: reservations.values().cloned().collect(),
            sanctions: sanctions.values().cloned().collect(),
            counters,
        };
        snap.clients.sort_by_key(|c| c.id);
        snap.materials.sort_by_key(|m| m.id);
        snap.loans.sort_by_key(|l| l.id);
        snap.reservations.sort_by_key(|r| r.id);
        snap.sanctions.sort_by_key(|s| s.id);
        snap
    }

    pub fn into_store(self) -> MemoryStore {
        MemoryStore::from_parts(
            self.clients.into_iter().map(|c| (c.id, c)).collect(),
            self.materials.into_iter().map(|m| (m.id, m)).collect(),
            self.loans.into_iter().map(|l| (l.id, l)).collect(),
            self.reservations.into_iter().map(|r| (r.id, r)).collect(),
            self.sanctions.into_iter().map(|s| (s.id, s)).collect(),
            self.counters,
        )
    }
}

/// Loads a store from `path`. A missing file yields an empty store, so the
/// first run needs no setup step.
pub fn load(path: &Path) -> BiblioResult<MemoryStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot file, starting empty");
        return Ok(MemoryStore::new());
    }
    let data = std::fs::read_to_string(path)
        .map_err(|e| BiblioError::Store(format!("read {}: {e}", path.display())))?;
    let snap: Snapshot = serde_json::from_str(&data)
        .map_err(|e| BiblioError::Store(format!("parse {}: {e}", path.display())))?;
    tracing::debug!(
        path = %path.display(),
        clients = snap.clients.len(),
        materials = snap.materials.len(),
        "snapshot loaded"
    );
    Ok(snap.into_store())
}

/// Writes `store` to `path` as pretty-printed JSON.
pub fn save(store: &MemoryStore, path: &Path) -> BiblioResult<()> {
    let snap = Snapshot::from_store(store);
    let data = serde_json::to_string_pretty(&snap)
        .map_err(|e| BiblioError::Store(format!("serialize snapshot: {e}")))?;
    std::fs::write(path, data)
        .map_err(|e| BiblioError::Store(format!("write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityStore;
    use biblio_core::{ClientCategory, ClientId, Material, MaterialId};

    #[test]
    fn round_trips_through_a_file() {
        let mut store = MemoryStore::new();
        store
            .insert_client(biblio_core::Client::new(
                ClientId(1),
                "Ana",
                ClientCategory::Student,
            ))
            .unwrap();
        store
            .insert_material(Material::new(MaterialId(2), "Ficciones", "Borges", "stories"))
            .unwrap();
        let _ = store.allocate_sanction_id();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biblio.json");
        save(&store, &path).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.clients(), store.clients());
        assert_eq!(reloaded.materials(), store.materials());

        // Counters survive, so ids keep advancing instead of colliding.
        let mut reloaded = reloaded;
        assert_eq!(reloaded.allocate_sanction_id().0, 2);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("absent.json")).unwrap();
        assert!(store.clients().is_empty());
    }

    #[test]
    fn malformed_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            BiblioError::Store(_)
        ));
    }
}
