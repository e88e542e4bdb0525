//! Database queries for creating and listing transactions.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::Error;

use super::models::{Transaction, ValidatedTransaction};

/// Insert a new transaction into the database.
///
/// The row id and the `created_at`/`updated_at` timestamps are assigned by
/// the store on insert.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn create_transaction(
    transaction: ValidatedTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(
            "INSERT INTO \"transaction\" (description, amount, kind, category, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, description, amount, kind, category, date, created_at, updated_at",
        )?
        .query_row(
            (
                transaction.description,
                transaction.amount,
                transaction.kind,
                transaction.category,
                transaction.date,
                now,
                now,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve every transaction in the database, unfiltered and unpaginated,
/// in store-native (insertion) order.
///
/// # Errors
/// Returns [Error::SqlError] if there is an unexpected SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, kind, category, date, created_at, updated_at
             FROM \"transaction\"",
        )?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        kind: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod transaction_db_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::models::{TransactionKind, ValidatedTransaction},
    };

    use super::{create_transaction, get_all_transactions};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn coffee() -> ValidatedTransaction {
        ValidatedTransaction {
            description: "Coffee".to_string(),
            amount: 4.5,
            kind: TransactionKind::Expense,
            category: "Dining".to_string(),
            date: date!(2024 - 03 - 05),
        }
    }

    #[test]
    fn create_transaction_assigns_id_and_timestamps() {
        let connection = get_test_connection();

        let transaction = create_transaction(coffee(), &connection).unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.description, "Coffee");
        assert_eq!(transaction.amount, 4.5);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, "Dining");
        assert_eq!(transaction.date, date!(2024 - 03 - 05));
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn get_all_transactions_returns_created_rows_in_insertion_order() {
        let connection = get_test_connection();
        let first = create_transaction(coffee(), &connection).unwrap();
        let second = create_transaction(
            ValidatedTransaction {
                description: "Salary".to_string(),
                amount: 2500.0,
                kind: TransactionKind::Income,
                category: "Income".to_string(),
                date: date!(2024 - 03 - 01),
            },
            &connection,
        )
        .unwrap();

        let transactions = get_all_transactions(&connection).unwrap();

        assert_eq!(transactions, vec![first, second]);
    }

    #[test]
    fn get_all_transactions_returns_empty_vec_for_empty_store() {
        let connection = get_test_connection();

        let transactions = get_all_transactions(&connection).unwrap();

        assert!(transactions.is_empty());
    }
}
