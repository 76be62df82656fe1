//! Sanction policy: issuing penalties and lifting them.
//!
//! A client's veto flag mirrors sanction existence: issuing any sanction
//! raises it, lifting the last one clears it.

use biblio_core::{BiblioError, BiblioResult, ClientId, Sanction, SanctionId};
use biblio_store::EntityStore;
use chrono::NaiveDate;

/// Fine per day late, in whole currency units.
pub const DAILY_FINE: i64 = 1000;

/// Fine for an overdue return. Even a same-day-after-deadline return
/// counts as one full day.
pub fn late_fine(days_late: i64) -> i64 {
    days_late.max(1) * DAILY_FINE
}

/// Records a sanction against `client_id` and vetoes the client.
///
/// Shared by the automatic late-return path and manual administrator
/// sanctions; both unconditionally veto.
pub fn issue_sanction<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    reason: &str,
    date: NaiveDate,
    amount: i64,
) -> BiblioResult<Sanction> {
    let mut client = store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;

    let sanction = Sanction {
        id: store.allocate_sanction_id(),
        client: client_id,
        reason: reason.to_string(),
        issued_on: date,
        amount,
    };
    store.insert_sanction(sanction.clone())?;

    client.vetoed = true;
    store.update_client(client)?;

    tracing::info!(
        sanction = %sanction.id,
        client = %client_id,
        amount,
        reason,
        "sanction issued"
    );
    Ok(sanction)
}

/// Removes a sanction. The client's veto is cleared only when no other
/// sanctions remain on record.
pub fn lift_sanction<S: EntityStore>(store: &mut S, sanction_id: SanctionId) -> BiblioResult<()> {
    let sanction = store
        .sanction(sanction_id)
        .ok_or(BiblioError::SanctionNotFound(sanction_id))?;

    store.delete_sanction(sanction_id)?;

    if let Some(mut client) = store.client(sanction.client) {
        let remaining = store.sanctions_for(sanction.client).len();
        if remaining == 0 && client.vetoed {
            client.vetoed = false;
            store.update_client(client)?;
            tracing::info!(client = %sanction.client, "veto cleared");
        } else {
            tracing::debug!(
                client = %sanction.client,
                remaining,
                "sanction lifted, client still vetoed"
            );
        }
    }

    tracing::info!(sanction = %sanction_id, "sanction lifted");
    Ok(())
}
