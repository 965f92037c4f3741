//! HTTP surface for the booking backend.
//!
//! Routes are nested under `/api/`:
//! - `GET  /api/appointments/available-slots` — free slots for a key
//! - `POST /api/appointments/book-appointment` — commit a booking
//! - `GET  /api/opd/generate-ticket/:ticket_id` — printable PDF ticket
//! - `GET  /api/health` — liveness check
//!
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
