//! Pure eligibility predicates. No store access, no side effects.

use biblio_core::{Client, Material, MaterialState};

/// Whether `client` may open new loans or reservations.
pub fn can_transact(client: &Client) -> bool {
    !client.vetoed
}

/// Whether `material` can be loaned or reserved right now.
pub fn is_available(material: &Material) -> bool {
    material.state == MaterialState::Available
}
