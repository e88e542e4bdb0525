//! The category domain: model, database queries, the startup seed, and the
//! list endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{AppState, Error, transaction::TransactionKind};

/// The fixed set of categories inserted when the database holds none.
///
/// These mirror the defaults the original deployment shipped with.
pub const DEFAULT_CATEGORIES: [(&str, TransactionKind); 9] = [
    ("Food", TransactionKind::Expense),
    ("Income", TransactionKind::Income),
    ("Housing", TransactionKind::Expense),
    ("Dining", TransactionKind::Expense),
    ("Transport", TransactionKind::Expense),
    ("Utilities", TransactionKind::Expense),
    ("Entertainment", TransactionKind::Expense),
    ("Shopping", TransactionKind::Expense),
    ("Health", TransactionKind::Expense),
];

/// A label that transactions can reference by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category in the database.
    pub id: i64,
    /// The unique display name of the category.
    pub name: String,
    /// Whether transactions in this category are income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the record was inserted.
    pub created_at: OffsetDateTime,
    /// When the record was last written.
    pub updated_at: OffsetDateTime,
}

/// Insert a new category into the database.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if a category with `name` already
/// exists, or [Error::SqlError] for any other SQL error.
pub fn create_category(
    name: &str,
    kind: TransactionKind,
    connection: &Connection,
) -> Result<Category, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(
            "INSERT INTO category (name, kind, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, kind, created_at, updated_at",
        )?
        .query_row((name, kind, now, now), map_row)
        .map_err(|error| error.into())
}

/// Retrieve every category in the database in insertion order.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, kind, created_at, updated_at FROM category")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Insert the default categories that are not already present.
///
/// Runs once at startup, outside request handling, so concurrent first
/// reads of the categories endpoint cannot race to insert duplicates.
/// Idempotent: `INSERT OR IGNORE` leaves existing rows untouched.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn seed_default_categories(connection: &Connection) -> Result<(), Error> {
    let now = OffsetDateTime::now_utc();
    let mut statement = connection.prepare(
        "INSERT OR IGNORE INTO category (name, kind, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (name, kind) in DEFAULT_CATEGORIES {
        statement.execute((name, kind, now, now))?;
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// `GET /api/categories`: list every category as JSON.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("could not fetch categories: {error}"))?;

    Ok((StatusCode::OK, Json(categories)))
}

#[cfg(test)]
mod category_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{Error, db::initialize, transaction::TransactionKind};

    use super::{
        DEFAULT_CATEGORIES, create_category, get_all_categories, seed_default_categories,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();

        let category = create_category("Subscriptions", TransactionKind::Expense, &connection)
            .unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, "Subscriptions");
        assert_eq!(category.kind, TransactionKind::Expense);
    }

    #[test]
    fn create_category_with_duplicate_name_fails() {
        let connection = get_test_connection();
        create_category("Food", TransactionKind::Expense, &connection).unwrap();

        let result = create_category("Food", TransactionKind::Expense, &connection);

        assert_eq!(result, Err(Error::DuplicateCategoryName));
    }

    #[test]
    fn seed_inserts_the_nine_defaults() {
        let connection = get_test_connection();

        seed_default_categories(&connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());

        let names_and_kinds: HashSet<_> = categories
            .iter()
            .map(|category| (category.name.as_str(), category.kind))
            .collect();
        assert_eq!(names_and_kinds, HashSet::from(DEFAULT_CATEGORIES));
    }

    #[test]
    fn seed_is_idempotent() {
        let connection = get_test_connection();

        seed_default_categories(&connection).unwrap();
        seed_default_categories(&connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn seed_keeps_previously_created_categories() {
        let connection = get_test_connection();
        let existing = create_category("Pets", TransactionKind::Expense, &connection).unwrap();

        seed_default_categories(&connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len() + 1);
        assert!(categories.contains(&existing));
    }
}
