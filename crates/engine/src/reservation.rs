//! Reservation lifecycle: creation and cancellation.
//!
//! Conversion of a reservation into a loan lives in
//! [`circulation::create_loan`](crate::circulation::create_loan).

use crate::eligibility;
use biblio_core::{
    BiblioError, BiblioResult, ClientId, MaterialId, MaterialState, Reservation,
};
use biblio_store::EntityStore;
use chrono::NaiveDate;

/// Reserves an available material for `client_id`.
pub fn create_reservation<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    material_id: MaterialId,
    today: NaiveDate,
) -> BiblioResult<Reservation> {
    let client = store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;
    if !eligibility::can_transact(&client) {
        tracing::debug!(client = %client_id, "reservation rejected: client vetoed");
        return Err(BiblioError::ClientVetoed(client_id));
    }

    let mut material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;
    if !eligibility::is_available(&material) {
        return Err(BiblioError::MaterialNotAvailable {
            id: material_id,
            state: material.state,
        });
    }

    if let Some(existing) = store.active_reservation_for(material_id) {
        return Err(BiblioError::AlreadyReserved {
            material: material_id,
            reservation: existing.id,
        });
    }

    let reservation = Reservation {
        id: store.allocate_reservation_id(),
        client: client_id,
        material: material_id,
        reserved_on: today,
    };
    store.insert_reservation(reservation.clone())?;

    material.state = MaterialState::Reserved;
    store.update_material(material)?;

    tracing::info!(
        reservation = %reservation.id,
        client = %client_id,
        material = %material_id,
        "reservation created"
    );
    Ok(reservation)
}

/// Cancels the reservation of `material_id` held by `client_id`, making
/// the material available again.
pub fn cancel_reservation<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    material_id: MaterialId,
) -> BiblioResult<()> {
    store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;
    let mut material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;

    let reservation = match store.active_reservation_for(material_id) {
        Some(r) if material.state == MaterialState::Reserved => r,
        _ => return Err(BiblioError::ReservationNotFound(material_id)),
    };
    if reservation.client != client_id {
        return Err(BiblioError::NotReservationOwner(material_id));
    }

    store.delete_reservation(reservation.id)?;
    material.state = MaterialState::Available;
    store.update_material(material)?;

    tracing::info!(
        reservation = %reservation.id,
        client = %client_id,
        material = %material_id,
        "reservation cancelled"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_core::{Client, ClientCategory, Material};
    use biblio_store::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .insert_client(Client::new(ClientId(1), "Ana", ClientCategory::Student))
            .unwrap();
        store
            .insert_client(Client::new(ClientId(2), "Luis", ClientCategory::Staff))
            .unwrap();
        store
            .insert_material(Material::new(MaterialId(10), "Rayuela", "Cortazar", "novel"))
            .unwrap();
        store
    }

    #[test]
    fn reservation_marks_material_reserved() {
        let mut store = seeded();
        let r = create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        assert_eq!(r.reserved_on, day(1));
        assert_eq!(
            store.material(MaterialId(10)).unwrap().state,
            MaterialState::Reserved
        );
    }

    #[test]
    fn reserved_material_cannot_be_reserved_again() {
        let mut store = seeded();
        create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err =
            create_reservation(&mut store, ClientId(2), MaterialId(10), day(2)).unwrap_err();
        // The state check fires first: a reserved material is simply not
        // available for a second reservation.
        assert!(matches!(
            err,
            BiblioError::MaterialNotAvailable {
                state: MaterialState::Reserved,
                ..
            }
        ));
    }

    #[test]
    fn vetoed_client_cannot_reserve() {
        let mut store = seeded();
        let mut client = store.client(ClientId(1)).unwrap();
        client.vetoed = true;
        store.update_client(client).unwrap();
        let err =
            create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap_err();
        assert!(matches!(err, BiblioError::ClientVetoed(_)));
    }

    #[test]
    fn cancel_restores_available_state() {
        let mut store = seeded();
        let before = store.material(MaterialId(10)).unwrap();
        create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        cancel_reservation(&mut store, ClientId(1), MaterialId(10)).unwrap();

        assert_eq!(store.material(MaterialId(10)).unwrap(), before);
        assert!(store.active_reservation_for(MaterialId(10)).is_none());
    }

    #[test]
    fn only_the_owner_can_cancel() {
        let mut store = seeded();
        create_reservation(&mut store, ClientId(1), MaterialId(10), day(1)).unwrap();
        let err = cancel_reservation(&mut store, ClientId(2), MaterialId(10)).unwrap_err();
        assert!(matches!(err, BiblioError::NotReservationOwner(_)));
        // Still reserved by client 1.
        assert_eq!(
            store
                .active_reservation_for(MaterialId(10))
                .unwrap()
                .client,
            ClientId(1)
        );
    }

    #[test]
    fn cancel_without_reservation_is_not_found() {
        let mut store = seeded();
        let err = cancel_reservation(&mut store, ClientId(1), MaterialId(10)).unwrap_err();
        assert!(matches!(err, BiblioError::ReservationNotFound(_)));
    }
}
