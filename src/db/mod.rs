//! Booking ledger — SQLite-backed durable store of appointments.

pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    /// The (date, department, slot) key is already occupied. Raised by the
    /// unique slot index, so the conflict check and the write are one
    /// atomic operation.
    #[error("Slot already booked: {slot} on {date} ({department})")]
    SlotTaken {
        date: String,
        department: String,
        slot: String,
    },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}
