//! HTTP handlers for listing and creating transactions.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use time::OffsetDateTime;

use crate::{AppState, Error};

use super::{
    db::{create_transaction, get_all_transactions},
    models::NewTransaction,
};

/// `GET /api/transactions`: list every transaction as JSON.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not fetch transactions: {error}"))?;

    Ok((StatusCode::OK, Json(transactions)))
}

/// `POST /api/transactions`: validate the request body and persist a new
/// transaction, returning the created record with its id and timestamps.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<impl IntoResponse, Error> {
    let today = OffsetDateTime::now_utc().date();
    let validated = new_transaction.validate(today)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(validated, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
