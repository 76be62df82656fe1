//! Domain types for the biblio circulation system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Caller-supplied key of a registered client.
    ClientId
);
id_type!(
    /// Caller-supplied key of a registered material.
    MaterialId
);
id_type!(
    /// Store-allocated key of a loan. Monotonic, starts at 1.
    LoanId
);
id_type!(
    /// Store-allocated key of a reservation. Monotonic, starts at 1.
    ReservationId
);
id_type!(
    /// Store-allocated key of a sanction. Monotonic, starts at 1.
    SanctionId
);

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Informational client category. Carries no behavior; all clients are
/// subject to the same circulation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientCategory {
    Student,
    Professor,
    Staff,
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClientCategory::Student => "student",
            ClientCategory::Professor => "professor",
            ClientCategory::Staff => "staff",
        };
        f.write_str(s)
    }
}

/// A library client. `vetoed` is mutated only by the sanction policy:
/// it is raised whenever a sanction is issued and cleared when the
/// client's last sanction is lifted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub category: ClientCategory,
    /// Faculty, degree, or work area, depending on the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_detail: Option<String>,
    #[serde(default)]
    pub vetoed: bool,
}

impl Client {
    pub fn new(id: ClientId, name: impl Into<String>, category: ClientCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            category_detail: None,
            vetoed: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.category_detail = Some(detail.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// Circulation state of a material.
///
/// Cached summary of the active loan/reservation records: `Loaned` iff an
/// active loan references the material, `Reserved` iff an active
/// reservation does. `Loaned` and `Reserved` are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialState {
    Available,
    Loaned,
    Reserved,
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialState::Available => "available",
            MaterialState::Loaned => "loaned",
            MaterialState::Reserved => "reserved",
        };
        f.write_str(s)
    }
}

/// A bibliographic material. Title/author/category are descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub state: MaterialState,
}

impl Material {
    /// Materials enter the catalog as `Available`.
    pub fn new(
        id: MaterialId,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into(),
            state: MaterialState::Available,
        }
    }
}

// ---------------------------------------------------------------------------
// Circulation records
// ---------------------------------------------------------------------------

/// An active loan. At most one exists per material; the referenced
/// material is `Loaned` for as long as the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub client: ClientId,
    pub material: MaterialId,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// An active reservation. At most one exists per material; it is deleted
/// on cancellation or when the reserving client converts it into a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub client: ClientId,
    pub material: MaterialId,
    pub reserved_on: NaiveDate,
}

/// A monetary penalty. Any sanction on record keeps the client vetoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanction {
    pub id: SanctionId,
    pub client: ClientId,
    pub reason: String,
    pub issued_on: NaiveDate,
    /// Whole currency units.
    pub amount: i64,
}

// ---------------------------------------------------------------------------
// Operation results
// ---------------------------------------------------------------------------

/// Outcome of returning a material. `sanction` is populated iff `late`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnOutcome {
    pub late: bool,
    pub days_late: i64,
    pub sanction: Option<Sanction>,
}

impl ReturnOutcome {
    pub fn on_time() -> Self {
        Self {
            late: false,
            days_late: 0,
            sanction: None,
        }
    }

    pub fn late(days_late: i64, sanction: Sanction) -> Self {
        Self {
            late: true,
            days_late,
            sanction: Some(sanction),
        }
    }
}
