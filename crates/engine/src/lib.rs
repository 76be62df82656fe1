//! Circulation engine: loan, reservation, and sanction rules over an
//! [`EntityStore`](biblio_store::EntityStore).
//!
//! Every operation resolves current entity state from the store, validates
//! all preconditions, and only then writes. A failed operation leaves the
//! store untouched.

pub mod catalog;
pub mod circulation;
pub mod eligibility;
pub mod reservation;
pub mod sanction;

pub use circulation::{create_loan, renew_loan, return_material, LOAN_PERIOD_DAYS};
pub use reservation::{cancel_reservation, create_reservation};
pub use sanction::{issue_sanction, lift_sanction, DAILY_FINE};
