//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, category::seed_default_categories, db::initialize};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and seeding the default categories. Both steps are
    /// idempotent, so reusing an existing database file is fine.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or seeded.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;
        seed_default_categories(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use crate::category::{DEFAULT_CATEGORIES, get_all_categories};

    use super::AppState;

    #[test]
    fn new_seeds_default_categories() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();

        let connection = state.db_connection.lock().unwrap();
        let categories = get_all_categories(&connection).unwrap();

        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
    }
}
