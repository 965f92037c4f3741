//! Repository layer — entity-scoped ledger operations.

mod appointment;

pub use appointment::*;
