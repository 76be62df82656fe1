//! In-memory [`EntityStore`] backed by hash maps.

use crate::EntityStore;
use biblio_core::{
    BiblioError, BiblioResult, Client, ClientId, Loan, LoanId, Material, MaterialId, Reservation,
    ReservationId, Sanction, SanctionId,
};
use std::collections::HashMap;

/// Hash-map entity store with monotonic id counters for circulation
/// records. The reference implementation; everything the engine needs
/// and nothing more.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    clients: HashMap<ClientId, Client>,
    materials: HashMap<MaterialId, Material>,
    loans: HashMap<LoanId, Loan>,
    reservations: HashMap<ReservationId, Reservation>,
    sanctions: HashMap<SanctionId, Sanction>,

    next_loan_id: u64,
    next_reservation_id: u64,
    next_sanction_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn parts(
        &self,
    ) -> (
        &HashMap<ClientId, Client>,
        &HashMap<MaterialId, Material>,
        &HashMap<LoanId, Loan>,
        &HashMap<ReservationId, Reservation>,
        &HashMap<SanctionId, Sanction>,
        [u64; 3],
    ) {
        (
            &self.clients,
            &self.materials,
            &self.loans,
            &self.reservations,
            &self.sanctions,
            [
                self.next_loan_id,
                self.next_reservation_id,
                self.next_sanction_id,
            ],
        )
    }

    pub(crate) fn from_parts(
        clients: HashMap<ClientId, Client>,
        materials: HashMap<MaterialId, Material>,
        loans: HashMap<LoanId, Loan>,
        reservations: HashMap<ReservationId, Reservation>,
        sanctions: HashMap<SanctionId, Sanction>,
        counters: [u64; 3],
    ) -> Self {
        Self {
            clients,
            materials,
            loans,
            reservations,
            sanctions,
            next_loan_id: counters[0],
            next_reservation_id: counters[1],
            next_sanction_id: counters[2],
        }
    }
}

fn insert_new<K, V>(map: &mut HashMap<K, V>, key: K, value: V, what: &str) -> BiblioResult<()>
where
    K: std::hash::Hash + Eq + std::fmt::Debug + Copy,
{
    if map.contains_key(&key) {
        return Err(BiblioError::Store(format!(
            "duplicate {what} key {key:?}"
        )));
    }
    map.insert(key, value);
    Ok(())
}

fn update_existing<K, V>(map: &mut HashMap<K, V>, key: K, value: V, what: &str) -> BiblioResult<()>
where
    K: std::hash::Hash + Eq + std::fmt::Debug + Copy,
{
    match map.get_mut(&key) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(BiblioError::Store(format!(
            "update of missing {what} key {key:?}"
        ))),
    }
}

fn delete_existing<K, V>(map: &mut HashMap<K, V>, key: K, what: &str) -> BiblioResult<()>
where
    K: std::hash::Hash + Eq + std::fmt::Debug + Copy,
{
    match map.remove(&key) {
        Some(_) => Ok(()),
        None => Err(BiblioError::Store(format!(
            "delete of missing {what} key {key:?}"
        ))),
    }
}

impl EntityStore for MemoryStore {
    fn client(&self, id: ClientId) -> Option<Client> {
        self.clients.get(&id).cloned()
    }

    fn material(&self, id: MaterialId) -> Option<Material> {
        self.materials.get(&id).cloned()
    }

    fn sanction(&self, id: SanctionId) -> Option<Sanction> {
        self.sanctions.get(&id).cloned()
    }

    fn active_loan(&self, client: ClientId, material: MaterialId) -> Option<Loan> {
        self.loans
            .values()
            .find(|l| l.client == client && l.material == material)
            .cloned()
    }

    fn active_reservation_for(&self, material: MaterialId) -> Option<Reservation> {
        self.reservations
            .values()
            .find(|r| r.material == material)
            .cloned()
    }

    fn sanctions_for(&self, client: ClientId) -> Vec<Sanction> {
        let mut out: Vec<Sanction> = self
            .sanctions
            .values()
            .filter(|s| s.client == client)
            .cloned()
            .collect();
        out.sort_by_key(|s| s.id);
        out
    }

    fn loans_for_client(&self, client: ClientId) -> Vec<Loan> {
        let mut out: Vec<Loan> = self
            .loans
            .values()
            .filter(|l| l.client == client)
            .cloned()
            .collect();
        out.sort_by_key(|l| l.id);
        out
    }

    fn reservations_for_client(&self, client: ClientId) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self
            .reservations
            .values()
            .filter(|r| r.client == client)
            .cloned()
            .collect();
        out.sort_by_key(|r| r.id);
        out
    }

    fn clients(&self) -> Vec<Client> {
        let mut out: Vec<Client> = self.clients.values().cloned().collect();
        out.sort_by_key(|c| c.id);
        out
    }

    fn materials(&self) -> Vec<Material> {
        let mut out: Vec<Material> = self.materials.values().cloned().collect();
        out.sort_by_key(|m| m.id);
        out
    }

    fn loans(&self) -> Vec<Loan> {
        let mut out: Vec<Loan> = self.loans.values().cloned().collect();
        out.sort_by_key(|l| l.id);
        out
    }

    fn reservations(&self) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self.reservations.values().cloned().collect();
        out.sort_by_key(|r| r.id);
        out
    }

    fn sanctions(&self) -> Vec<Sanction> {
        let mut out: Vec<Sanction> = self.sanctions.values().cloned().collect();
        out.sort_by_key(|s| s.id);
        out
    }

    fn allocate_loan_id(&mut self) -> LoanId {
        self.next_loan_id += 1;
        LoanId(self.next_loan_id)
    }

    fn allocate_reservation_id(&mut self) -> ReservationId {
        self.next_reservation_id += 1;
        ReservationId(self.next_reservation_id)
    }

    fn allocate_sanction_id(&mut self) -> SanctionId {
        self.next_sanction_id += 1;
        SanctionId(self.next_sanction_id)
    }

    fn insert_client(&mut self, client: Client) -> BiblioResult<()> {
        insert_new(&mut self.clients, client.id, client, "client")
    }

    fn update_client(&mut self, client: Client) -> BiblioResult<()> {
        update_existing(&mut self.clients, client.id, client, "client")
    }

    fn delete_client(&mut self, id: ClientId) -> BiblioResult<()> {
        delete_existing(&mut self.clients, id, "client")
    }

    fn insert_material(&mut self, material: Material) -> BiblioResult<()> {
        insert_new(&mut self.materials, material.id, material, "material")
    }

    fn update_material(&mut self, material: Material) -> BiblioResult<()> {
        update_existing(&mut self.materials, material.id, material, "material")
    }

    fn delete_material(&mut self, id: MaterialId) -> BiblioResult<()> {
        delete_existing(&mut self.materials, id, "material")
    }

    fn insert_loan(&mut self, loan: Loan) -> BiblioResult<()> {
        insert_new(&mut self.loans, loan.id, loan, "loan")
    }

    fn update_loan(&mut self, loan: Loan) -> BiblioResult<()> {
        update_existing(&mut self.loans, loan.id, loan, "loan")
    }

    fn delete_loan(&mut self, id: LoanId) -> BiblioResult<()> {
        delete_existing(&mut self.loans, id, "loan")
    }

    fn insert_reservation(&mut self, reservation: Reservation) -> BiblioResult<()> {
        insert_new(
            &mut self.reservations,
            reservation.id,
            reservation,
            "reservation",
        )
    }

    fn delete_reservation(&mut self, id: ReservationId) -> BiblioResult<()> {
        delete_existing(&mut self.reservations, id, "reservation")
    }

    fn insert_sanction(&mut self, sanction: Sanction) -> BiblioResult<()> {
        insert_new(&mut self.sanctions, sanction.id, sanction, "sanction")
    }

    fn delete_sanction(&mut self, id: SanctionId) -> BiblioResult<()> {
        delete_existing(&mut self.sanctions, id, "sanction")
    }
}
