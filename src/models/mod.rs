//! Domain models shared by the booking core, the ledger, and the API.

mod appointment;

pub use appointment::*;
