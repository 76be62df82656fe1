//! Domain models, shared types, and error definitions.
//!
//! Foundation crate -- no I/O dependencies.

pub mod error;
pub mod types;

pub use error::{BiblioError, BiblioResult, ErrorKind};
pub use types::{
    Client, ClientCategory, ClientId, Loan, LoanId, Material, MaterialId, MaterialState,
    Reservation, ReservationId, ReturnOutcome, Sanction, SanctionId,
};
