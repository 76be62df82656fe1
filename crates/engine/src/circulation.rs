//! Loan lifecycle: creation, renewal, and return.

use crate::{eligibility, sanction};
use biblio_core::{
    BiblioError, BiblioResult, ClientId, Loan, Material, MaterialId, MaterialState, ReturnOutcome,
};
use biblio_store::EntityStore;
use chrono::{Duration, NaiveDate};

/// Standard loan period, applied on creation and per renewal.
pub const LOAN_PERIOD_DAYS: i64 = 7;

/// Reason recorded on sanctions issued for overdue returns.
pub const LATE_RETURN_REASON: &str = "late return";

/// Loans `material_id` to `client_id` with a due date
/// [`LOAN_PERIOD_DAYS`] from `today`.
///
/// A reservation of the material by the same client converts into the
/// loan; one held by anyone else rejects it.
pub fn create_loan<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    material_id: MaterialId,
    today: NaiveDate,
) -> BiblioResult<Loan> {
    let client = store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;
    if !eligibility::can_transact(&client) {
        tracing::debug!(client = %client_id, "loan rejected: client vetoed");
        return Err(BiblioError::ClientVetoed(client_id));
    }

    let mut material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;

    let own_reservation = match store.active_reservation_for(material_id) {
        Some(r) if r.client != client_id => {
            tracing::debug!(material = %material_id, "loan rejected: reserved by another client");
            return Err(BiblioError::MaterialReservedByOther(material_id));
        }
        other => other,
    };

    match material.state {
        MaterialState::Available => {}
        // The client's own reservation is about to convert into this loan.
        MaterialState::Reserved if own_reservation.is_some() => {}
        state => {
            return Err(BiblioError::MaterialNotAvailable {
                id: material_id,
                state,
            })
        }
    }

    // All preconditions hold; mutate.
    if let Some(reservation) = own_reservation {
        store.delete_reservation(reservation.id)?;
        tracing::info!(
            reservation = %reservation.id,
            client = %client_id,
            "reservation converted into loan"
        );
    }

    let loan = Loan {
        id: store.allocate_loan_id(),
        client: client_id,
        material: material_id,
        loan_date: today,
        due_date: today + Duration::days(LOAN_PERIOD_DAYS),
    };
    store.insert_loan(loan.clone())?;

    material.state = MaterialState::Loaned;
    store.update_material(material)?;

    tracing::info!(
        loan = %loan.id,
        client = %client_id,
        material = %material_id,
        due = %loan.due_date,
        "loan created"
    );
    Ok(loan)
}

/// Extends the active loan of `material_id` by `client_id` for another
/// [`LOAN_PERIOD_DAYS`].
///
/// The extension compounds from the prior due date, never from `today`,
/// so renewing late does not buy extra time.
pub fn renew_loan<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    material_id: MaterialId,
    _today: NaiveDate,
) -> BiblioResult<Loan> {
    let client = store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;
    if !eligibility::can_transact(&client) {
        tracing::debug!(client = %client_id, "renewal rejected: client vetoed");
        return Err(BiblioError::ClientVetoed(client_id));
    }

    let mut material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;

    if let Some(reservation) = store.active_reservation_for(material_id) {
        if reservation.client != client_id {
            tracing::debug!(material = %material_id, "renewal rejected: reserved by another client");
            return Err(BiblioError::MaterialReservedByOther(material_id));
        }
    }

    let mut loan = store
        .active_loan(client_id, material_id)
        .ok_or(BiblioError::LoanNotFound {
            client: client_id,
            material: material_id,
        })?;

    loan.due_date += Duration::days(LOAN_PERIOD_DAYS);
    store.update_loan(loan.clone())?;

    // Idempotent re-affirmation of the loaned state.
    material.state = MaterialState::Loaned;
    store.update_material(material)?;

    tracing::info!(
        loan = %loan.id,
        client = %client_id,
        material = %material_id,
        due = %loan.due_date,
        "loan renewed"
    );
    Ok(loan)
}

/// Returns `material_id` on behalf of `client_id`, closing the loan.
///
/// Runs without a veto check: a vetoed client can always return. An
/// overdue return issues a sanction of
/// [`DAILY_FINE`](crate::sanction::DAILY_FINE) per day late and vetoes
/// the client.
pub fn return_material<S: EntityStore>(
    store: &mut S,
    client_id: ClientId,
    material_id: MaterialId,
    today: NaiveDate,
) -> BiblioResult<ReturnOutcome> {
    store
        .client(client_id)
        .ok_or(BiblioError::ClientNotFound(client_id))?;
    let mut material = store
        .material(material_id)
        .ok_or(BiblioError::MaterialNotFound(material_id))?;

    let loan = store
        .active_loan(client_id, material_id)
        .ok_or(BiblioError::LoanNotFound {
            client: client_id,
            material: material_id,
        })?;

    let outcome = if today > loan.due_date {
        let days_late = (today - loan.due_date).num_days();
        let issued = sanction::issue_sanction(
            store,
            client_id,
            LATE_RETURN_REASON,
            today,
            sanction::late_fine(days_late),
        )?;
        tracing::info!(
            loan = %loan.id,
            client = %client_id,
            days_late,
            sanction = %issued.id,
            "late return"
        );
        ReturnOutcome::late(days_late, issued)
    } else {
        ReturnOutcome::on_time()
    };

    material.state = MaterialState::Available;
    store.update_material(material)?;
    store.delete_loan(loan.id)?;

    tracing::info!(
        loan = %loan.id,
        client = %client_id,
        material = %material_id,
        late = outcome.late,
        "material returned"
    );
    Ok(outcome)
}

/// Sanity helper used by tests and debug assertions: a material's cached
/// state must agree with the active records referencing it.
pub fn state_consistent<S: EntityStore>(store: &S, material: &Material) -> bool {
    let loaned = store
        .loans()
        .iter()
        .any(|l| l.material == material.id);
    let reserved = store.active_reservation_for(material.id).is_some();
    match material.state {
        MaterialState::Available => !loaned && !reserved,
        MaterialState::Loaned => loaned && !reserved,
        MaterialState::Reserved => reserved && !loaned,
    }
}
