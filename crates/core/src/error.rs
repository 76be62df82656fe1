//! Centralized error types for the biblio workspace.

use crate::types::{ClientId, MaterialId, MaterialState, ReservationId, SanctionId};
use thiserror::Error;

/// Coarse classification of an error, for callers that branch on the
/// failure category rather than the exact condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// The operation collides with another client's records.
    Conflict,
    /// The client is vetoed.
    Forbidden,
    /// An entity is not in the state the operation requires.
    InvalidState,
    /// Persistence-layer failure.
    Internal,
}

/// Top-level error enum. One variant per rejectable condition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BiblioError {
    #[error("client {0} not found")]
    ClientNotFound(ClientId),

    #[error("material {0} not found")]
    MaterialNotFound(MaterialId),

    #[error("no active loan of material {material} by client {client}")]
    LoanNotFound {
        client: ClientId,
        material: MaterialId,
    },

    #[error("no active reservation for material {0}")]
    ReservationNotFound(MaterialId),

    #[error("sanction {0} not found")]
    SanctionNotFound(SanctionId),

    #[error("client {0} is vetoed")]
    ClientVetoed(ClientId),

    #[error("material {id} is not available (state: {state})")]
    MaterialNotAvailable { id: MaterialId, state: MaterialState },

    #[error("material {0} is reserved by another client")]
    MaterialReservedByOther(MaterialId),

    #[error("material {material} is already reserved (reservation {reservation})")]
    AlreadyReserved {
        material: MaterialId,
        reservation: ReservationId,
    },

    #[error("reservation for material {0} belongs to a different client")]
    NotReservationOwner(MaterialId),

    #[error("client {0} already exists")]
    ClientAlreadyExists(ClientId),

    #[error("material {0} already exists")]
    MaterialAlreadyExists(MaterialId),

    #[error("client {0} has active loans or reservations")]
    ClientHasActiveRecords(ClientId),

    #[error("material {id} is in circulation (state: {state})")]
    MaterialInCirculation { id: MaterialId, state: MaterialState },

    #[error("store error: {0}")]
    Store(String),
}

pub type BiblioResult<T> = Result<T, BiblioError>;

impl BiblioError {
    /// Maps the variant onto the coarse [`ErrorKind`] taxonomy.
    pub fn kind(&self) -> ErrorKind {
        use BiblioError::*;
        match self {
            ClientNotFound(_)
            | MaterialNotFound(_)
            | LoanNotFound { .. }
            | ReservationNotFound(_)
            | SanctionNotFound(_) => ErrorKind::NotFound,

            MaterialReservedByOther(_)
            | AlreadyReserved { .. }
            | NotReservationOwner(_)
            | ClientAlreadyExists(_)
            | MaterialAlreadyExists(_)
            | ClientHasActiveRecords(_) => ErrorKind::Conflict,

            ClientVetoed(_) => ErrorKind::Forbidden,

            MaterialNotAvailable { .. } | MaterialInCirculation { .. } => ErrorKind::InvalidState,

            Store(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MaterialState;

    #[test]
    fn display_includes_ids() {
        let err = BiblioError::ClientNotFound(ClientId(3));
        assert_eq!(err.to_string(), "client 3 not found");

        let err = BiblioError::MaterialNotAvailable {
            id: MaterialId(9),
            state: MaterialState::Loaned,
        };
        assert_eq!(err.to_string(), "material 9 is not available (state: loaned)");
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            BiblioError::ClientVetoed(ClientId(1)).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            BiblioError::MaterialReservedByOther(MaterialId(1)).kind(),
            ErrorKind::Conflict
        );
        assert!(BiblioError::LoanNotFound {
            client: ClientId(1),
            material: MaterialId(2),
        }
        .is_not_found());
        assert!(BiblioError::ClientAlreadyExists(ClientId(1)).is_conflict());
    }
}
