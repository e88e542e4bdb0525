//! The transaction domain: models, database queries and HTTP endpoints.

mod db;
mod endpoints;
mod models;

pub use db::get_all_transactions;
pub use endpoints::{create_transaction_endpoint, get_transactions_endpoint};
pub use models::{Transaction, TransactionKind};
