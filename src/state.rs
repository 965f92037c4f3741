//! Shared application state.
//!
//! Wrapped in `Arc` at startup and cloned into the API context. The
//! ledger connection is not held here: SQLite connections are cheap and
//! not `Sync`, so every request opens its own against `config.db_path()`
//! and the unique slot index arbitrates concurrent writers.

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::{self, DatabaseError};

pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Open a ledger connection. The most common operation in handlers.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.config.db_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config(data_dir: PathBuf) -> AppConfig {
        AppConfig {
            port: 0,
            data_dir,
            allowed_origins: vec!["*".into()],
            hospital_name: "Test Hospital".into(),
        }
    }

    #[test]
    fn open_db_creates_and_migrates_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(test_config(dir.path().to_path_buf()));

        let conn = state.open_db().unwrap();
        assert_eq!(db::count_appointments(&conn).unwrap(), 0);
    }

    #[test]
    fn open_db_fails_for_missing_directory() {
        let state = AppState::new(test_config(PathBuf::from("/nonexistent/opd-data")));
        assert!(state.open_db().is_err());
    }
}
