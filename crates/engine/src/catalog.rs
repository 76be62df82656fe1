//! Catalog maintenance: registering and removing clients and materials.

use biblio_core::{BiblioError, BiblioResult, Client, ClientId, Material, MaterialId, MaterialState};
use biblio_store::EntityStore;

/// Registers a new client. Ids are caller-supplied; duplicates are
/// rejected.
pub fn register_client<S: EntityStore>(store: &mut S, client: Client) -> BiblioResult<()> {
    if store.client(client.id).is_some() {
        return Err(BiblioError::ClientAlreadyExists(client.id));
    }
    let id = client.id;
    store.insert_client(client)?;
    tracing::info!(client = %id, "client registered");
    Ok(())
}

/// Removes a client with no active loans or reservations. Sanctions on
/// record do not block removal.
pub fn remove_client<S: EntityStore>(store: &mut S, client_id: ClientId) -> BiblioResult<()> {
    store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;

    if !store.loans_for_client(client_id).is_empty()
        || !store.reservations_for_client(client_id).is_empty()
    {
        return Err(BiblioError::ClientHasActiveRecords(client_id));
    }

    store.delete_client(client_id)?;
    tracing::info!(client = %client_id, "client removed");
    Ok(())
}

/// Registers a new material. Whatever the caller built, it enters the
/// catalog as `Available`.
pub fn register_material<S: EntityStore>(store: &mut S, mut material: Material) -> BiblioResult<()> {
    if store.material(material.id).is_some() {
        return Err(BiblioError::MaterialAlreadyExists(material.id));
    }
    material.state = MaterialState::Available;
    let id = material.id;
    store.insert_material(material)?;
    tracing::info!(material = %id, "material registered");
    Ok(())
}

/// Removes a material that is neither loaned nor reserved.
pub fn remove_material<S: EntityStore>(store: &mut S, material_id: MaterialId) -> BiblioResult<()> {
    let material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;

    if material.state != MaterialState::Available {
        return Err(BiblioError::MaterialInCirculation {
            id: material_id,
            state: material.state,
        });
    }

    store.delete_material(material_id)?;
    tracing::info!(material = %material_id, "material removed");
    Ok(())
}

/// Clients currently blocked from transacting.
pub fn vetoed_clients<S: EntityStore>(store: &S) -> Vec<Client> {
    store.clients().into_iter().filter(|c| c.vetoed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circulation, reservation, sanction};
    use biblio_core::ClientCategory;
    use biblio_store::MemoryStore;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        register_client(
            &mut store,
            Client::new(ClientId(1), "Ana", ClientCategory::Student),
        )
        .unwrap();
        register_material(
            &mut store,
            Material::new(MaterialId(10), "Ficciones", "Borges", "stories"),
        )
        .unwrap();
        store
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut store = seeded();
        let err = register_client(
            &mut store,
            Client::new(ClientId(1), "Other", ClientCategory::Staff),
        )
        .unwrap_err();
        assert!(matches!(err, BiblioError::ClientAlreadyExists(_)));

        let err = register_material(
            &mut store,
            Material::new(MaterialId(10), "Dup", "Dup", "dup"),
        )
        .unwrap_err();
        assert!(matches!(err, BiblioError::MaterialAlreadyExists(_)));
    }

    #[test]
    fn client_with_active_loan_cannot_be_removed() {
        let mut store = seeded();
        circulation::create_loan(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err = remove_client(&mut store, ClientId(1)).unwrap_err();
        assert!(matches!(err, BiblioError::ClientHasActiveRecords(_)));

        circulation::return_material(&mut store, ClientId(1), MaterialId(10), day(2)).unwrap();
        remove_client(&mut store, ClientId(1)).unwrap();
        assert!(store.client(ClientId(1)).is_none());
    }

    #[test]
    fn client_with_reservation_cannot_be_removed() {
        let mut store = seeded();
        reservation::create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err = remove_client(&mut store, ClientId(1)).unwrap_err();
        assert!(matches!(err, BiblioError::ClientHasActiveRecords(_)));
    }

    #[test]
    fn circulating_material_cannot_be_removed() {
        let mut store = seeded();
        circulation::create_loan(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err = remove_material(&mut store, MaterialId(10)).unwrap_err();
        assert!(matches!(
            err,
            BiblioError::MaterialInCirculation {
                state: MaterialState::Loaned,
                ..
            }
        ));
    }

    #[test]
    fn reserved_material_cannot_be_removed() {
        let mut store = seeded();
        reservation::create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err = remove_material(&mut store, MaterialId(10)).unwrap_err();
        assert!(matches!(
            err,
            BiblioError::MaterialInCirculation {
                state: MaterialState::Reserved,
                ..
            }
        ));

        reservation::cancel_reservation(&mut store, ClientId(1), MaterialId(10)).unwrap();
        remove_material(&mut store, MaterialId(10)).unwrap();
        assert!(store.material(MaterialId(10)).is_none());
    }

    #[test]
    fn registration_resets_material_state() {
        let mut store = MemoryStore::new();
        let mut material = Material::new(MaterialId(1), "T", "A", "c");
        material.state = MaterialState::Loaned;
        register_material(&mut store, material).unwrap();
        assert_eq!(
            store.material(MaterialId(1)).unwrap().state,
            MaterialState::Available
        );
    }

    #[test]
    fn vetoed_listing_tracks_sanctions() {
        let mut store = seeded();
        assert!(vetoed_clients(&store).is_empty());
        sanction::issue_sanction(&mut store, ClientId(1), "late return", day(1), 1000).unwrap();
        let vetoed = vetoed_clients(&store);
        assert_eq!(vetoed.len(), 1);
        assert_eq!(vetoed[0].id, ClientId(1));
    }
}
