//! Fintrack is a web app for tracking personal income and spending.
//!
//! This library provides a JSON REST API over a SQLite store for
//! transactions and categories, plus a server-rendered dashboard page that
//! presents the same data as charts and tables.

#![warn(missing_docs)]

use std::{env, env::VarError, net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod routing;
mod state;
mod transaction;

pub use db::initialize as initialize_db;
pub use routing::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// Get a port number from the environment variable `env_key` if set, otherwise return `default_port`.
///
/// # Panics
/// This function may panic if the environment variable `env_key` is not valid unicode,
/// or if its value cannot be parsed as an integer.
pub fn parse_port_or_default(env_key: &str, default_port: u16) -> u16 {
    let port_string = match env::var(env_key) {
        Ok(string) => string,
        Err(VarError::NotPresent) => {
            tracing::debug!(
                "The environment variable '{}' was not set, using the default port {}.",
                env_key,
                default_port
            );
            return default_port;
        }
        Err(e) => {
            tracing::error!(
                "An error occurred retrieving the environment variable '{}': {}",
                env_key,
                e
            );
            panic!();
        }
    };

    match port_string.parse() {
        Ok(port_number) => port_number,
        Err(e) => {
            tracing::error!(
                "An error occurred parsing the port number '{}' from the environment variable '{}': {}",
                port_string,
                env_key,
                e
            );
            panic!();
        }
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request body failed field-level validation.
    ///
    /// Holds the names of the failing fields so the client can see exactly
    /// what to fix, rather than receiving a generic server error.
    #[error("validation failed for fields: {0:?}")]
    Validation(Vec<String>),

    /// A category with the same name already exists in the database.
    ///
    /// Uniqueness is enforced by a UNIQUE constraint on `category.name`.
    #[error("a category with that name already exists")]
    DuplicateCategoryName,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("category.name") =>
            {
                Error::DuplicateCategoryName
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation failed",
                    "fields": fields,
                }),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "the requested resource could not be found" }),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
