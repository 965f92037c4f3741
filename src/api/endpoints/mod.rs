//! API endpoint handlers.
//!
//! Handlers stay thin: they open a ledger connection, call into the
//! booking core, and map domain errors onto HTTP responses.

pub mod appointments;
pub mod health;
pub mod opd;
