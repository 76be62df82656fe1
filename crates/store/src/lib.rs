//! Entity store abstraction for the biblio circulation engine.

pub mod memory;
pub mod snapshot;

use biblio_core::{
    BiblioResult, Client, ClientId, Loan, LoanId, Material, MaterialId, Reservation,
    ReservationId, Sanction, SanctionId,
};

pub use memory::MemoryStore;
pub use snapshot::Snapshot;

/// Abstraction over durable entity records.
///
/// The engine resolves entities through the lookup methods, allocates ids
/// for circulation records, and writes through the mutation methods. The
/// whole trait is synchronous and all mutations take `&mut self`: the
/// engine executes one operation at a time against exclusive state.
///
/// Lookups return owned copies; the store keeps the canonical records and
/// nothing outside it caches entity state across operations.
pub trait EntityStore {
    // -- lookups --------------------------------------------------------

    fn client(&self, id: ClientId) -> Option<Client>;
    fn material(&self, id: MaterialId) -> Option<Material>;
    fn sanction(&self, id: SanctionId) -> Option<Sanction>;

    /// The active loan of `material` by `client`, if any.
    fn active_loan(&self, client: ClientId, material: MaterialId) -> Option<Loan>;

    /// The active reservation for `material`, by any client.
    fn active_reservation_for(&self, material: MaterialId) -> Option<Reservation>;

    fn sanctions_for(&self, client: ClientId) -> Vec<Sanction>;
    fn loans_for_client(&self, client: ClientId) -> Vec<Loan>;
    fn reservations_for_client(&self, client: ClientId) -> Vec<Reservation>;

    // -- listings -------------------------------------------------------

    fn clients(&self) -> Vec<Client>;
    fn materials(&self) -> Vec<Material>;
    fn loans(&self) -> Vec<Loan>;
    fn reservations(&self) -> Vec<Reservation>;
    fn sanctions(&self) -> Vec<Sanction>;

    // -- id allocation --------------------------------------------------

    fn allocate_loan_id(&mut self) -> LoanId;
    fn allocate_reservation_id(&mut self) -> ReservationId;
    fn allocate_sanction_id(&mut self) -> SanctionId;

    // -- mutations ------------------------------------------------------
    //
    // Key collisions and missing-row updates here are engine bugs, not
    // caller errors; implementations report them as `BiblioError::Store`.

    fn insert_client(&mut self, client: Client) -> BiblioResult<()>;
    fn update_client(&mut self, client: Client) -> BiblioResult<()>;
    fn delete_client(&mut self, id: ClientId) -> BiblioResult<()>;

    fn insert_material(&mut self, material: Material) -> BiblioResult<()>;
    fn update_material(&mut self, material: Material) -> BiblioResult<()>;
    fn delete_material(&mut self, id: MaterialId) -> BiblioResult<()>;

    fn insert_loan(&mut self, loan: Loan) -> BiblioResult<()>;
    fn update_loan(&mut self, loan: Loan) -> BiblioResult<()>;
    fn delete_loan(&mut self, id: LoanId) -> BiblioResult<()>;

    fn insert_reservation(&mut self, reservation: Reservation) -> BiblioResult<()>;
    fn delete_reservation(&mut self, id: ReservationId) -> BiblioResult<()>;

    fn insert_sanction(&mut self, sanction: Sanction) -> BiblioResult<()>;
    fn delete_sanction(&mut self, id: SanctionId) -> BiblioResult<()>;
}
