use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One confirmed booking.
///
/// Created exactly once by the booking flow, never updated or deleted.
/// The ledger enforces two invariants: at most one appointment per
/// (date, department, slot), and a globally unique `ticket_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    pub department: String,
    /// Calendar date as submitted by the client — stored verbatim as the
    /// stable ledger key, never reformatted.
    pub date: String,
    /// Time-of-day label from the slot catalog.
    pub slot: String,
    pub ticket_id: String,
    /// Rendered QR artifact (SVG) embedding the ticket id.
    pub qr_svg: String,
    pub booked_at: NaiveDateTime,
}
