//! Booking core — availability resolution and conflict-free commit.
//!
//! `available_slots` subtracts the booked slots for a (date, department)
//! pair from the catalog. `book_appointment` validates a request, assigns
//! a ticket identifier, renders the QR artifact, and commits the
//! appointment; the ledger's unique slot index makes the commit atomic
//! with respect to the conflict check, so for any key exactly one of any
//! set of concurrent bookings succeeds and the rest observe
//! [`BookingError::SlotConflict`].

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::Appointment;
use crate::slots;
use crate::ticket::{self, RenderError};

/// Incoming booking request body. All fields are required; they are kept
/// optional here so that absence maps to a request-level error instead of
/// a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
}

#[derive(Debug, Error)]
pub enum BookingError {
    /// Missing or blank fields in the request.
    #[error("{0}")]
    InvalidRequest(&'static str),
    /// A present field failed semantic validation.
    #[error("Invalid {0}.")]
    InvalidField(&'static str),
    /// The (date, department, slot) key is already occupied.
    #[error("This slot is already booked. Please choose another one.")]
    SlotConflict,
    #[error(transparent)]
    Storage(#[from] DatabaseError),
    #[error(transparent)]
    Rendering(#[from] RenderError),
}

/// Validated booking fields, trimmed and typed.
#[derive(Debug)]
struct ValidatedBooking {
    name: String,
    age: u32,
    phone: String,
    address: String,
    department: String,
    date: String,
    slot: String,
}

fn validate(request: &BookingRequest) -> Result<ValidatedBooking, BookingError> {
    fn required(field: &Option<String>) -> Result<&str, BookingError> {
        match field.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(BookingError::InvalidRequest("All fields are required.")),
        }
    }

    let name = required(&request.name)?;
    let phone = required(&request.phone)?;
    let address = required(&request.address)?;
    let department = required(&request.department)?;
    let date = required(&request.date)?;
    let slot = required(&request.slot)?;

    let age = request
        .age
        .ok_or(BookingError::InvalidRequest("All fields are required."))?;
    let age = u32::try_from(age)
        .ok()
        .filter(|a| *a >= 1)
        .ok_or(BookingError::InvalidField("age"))?;

    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(BookingError::InvalidField("phone"));
    }

    if !slots::slot_exists(slot) {
        return Err(BookingError::InvalidField("slot"));
    }

    Ok(ValidatedBooking {
        name: name.to_string(),
        age,
        phone: phone.to_string(),
        address: address.to_string(),
        department: department.to_string(),
        date: date.to_string(),
        slot: slot.to_string(),
    })
}

/// Free slots for a (date, department) pair, in catalog order.
///
/// Read-only and idempotent; the result is a subset of the catalog and
/// disjoint from every booked slot for that key.
pub fn available_slots(
    conn: &Connection,
    date: &str,
    department: &str,
) -> Result<Vec<&'static str>, BookingError> {
    let date = date.trim();
    let department = department.trim();
    if date.is_empty() || department.is_empty() {
        return Err(BookingError::InvalidRequest(
            "Date and department are required.",
        ));
    }

    let booked = db::booked_slots(conn, date, department)?;
    Ok(slots::all_slots()
        .iter()
        .filter(|slot| !booked.contains(slot.as_str()))
        .map(|slot| slot.as_str())
        .collect())
}

/// Validate and commit a new appointment.
///
/// The early occupancy lookup gives a friendly fast-path rejection; the
/// INSERT against the unique slot index is the authoritative check, so a
/// race between two requests for the same key resolves to exactly one
/// success with no partial state.
pub fn book_appointment(
    conn: &Connection,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> Result<Appointment, BookingError> {
    let fields = validate(request)?;

    if db::find_appointment_by_slot(conn, &fields.date, &fields.department, &fields.slot)?
        .is_some()
    {
        return Err(BookingError::SlotConflict);
    }

    let ticket_id = ticket::new_ticket_id(now);
    let qr_svg = ticket::render_qr_svg(&ticket_id)?;

    let appointment = Appointment {
        id: Uuid::new_v4(),
        name: fields.name,
        age: fields.age,
        phone: fields.phone,
        address: fields.address,
        department: fields.department,
        date: fields.date,
        slot: fields.slot,
        ticket_id,
        qr_svg,
        booked_at: now,
    };

    match db::insert_appointment(conn, &appointment) {
        Ok(()) => {
            tracing::info!(
                ticket_id = %appointment.ticket_id,
                date = %appointment.date,
                department = %appointment.department,
                slot = %appointment.slot,
                "appointment booked"
            );
            Ok(appointment)
        }
        Err(DatabaseError::SlotTaken { .. }) => Err(BookingError::SlotConflict),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::{open_database, open_memory_database};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn request(slot: &str) -> BookingRequest {
        BookingRequest {
            name: Some("Asha Verma".into()),
            age: Some(34),
            phone: Some("9876543210".into()),
            address: Some("12 Lakeview Road".into()),
            department: Some("Cardiology".into()),
            date: Some("2024-05-01".into()),
            slot: Some(slot.into()),
        }
    }

    #[test]
    fn booking_succeeds_and_persists() {
        let conn = open_memory_database().unwrap();
        let appt = book_appointment(&conn, &request("10:00 AM"), now()).unwrap();

        assert!(appt.ticket_id.starts_with("KC01052024093000"));
        assert!(appt.qr_svg.contains("<svg"));

        let stored = db::find_appointment_by_ticket(&conn, &appt.ticket_id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, appt.id);
        assert_eq!(stored.slot, "10:00 AM");
    }

    #[test]
    fn rebooking_same_key_is_a_conflict_and_leaves_ledger_unchanged() {
        let conn = open_memory_database().unwrap();
        let first = book_appointment(&conn, &request("10:00 AM"), now()).unwrap();

        let err = book_appointment(&conn, &request("10:00 AM"), now()).unwrap_err();
        assert!(matches!(err, BookingError::SlotConflict));

        assert_eq!(db::count_appointments(&conn).unwrap(), 1);
        let stored = db::find_appointment_by_ticket(&conn, &first.ticket_id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Asha Verma");
    }

    #[test]
    fn availability_excludes_booked_slot_only() {
        let conn = open_memory_database().unwrap();
        book_appointment(&conn, &request("10:00 AM"), now()).unwrap();

        let available = available_slots(&conn, "2024-05-01", "Cardiology").unwrap();
        assert_eq!(available.len(), 95);
        assert!(!available.contains(&"10:00 AM"));
        assert!(available.contains(&"10:05 AM"));
        // Catalog order preserved
        assert_eq!(available[0], "10:05 AM");
    }

    #[test]
    fn availability_is_subset_of_catalog_and_disjoint_from_booked() {
        let conn = open_memory_database().unwrap();
        book_appointment(&conn, &request("10:00 AM"), now()).unwrap();
        book_appointment(&conn, &request("2:30 PM"), now()).unwrap();

        let available = available_slots(&conn, "2024-05-01", "Cardiology").unwrap();
        let booked = db::booked_slots(&conn, "2024-05-01", "Cardiology").unwrap();
        assert!(available.iter().all(|s| crate::slots::slot_exists(s)));
        assert!(available.iter().all(|s| !booked.contains(*s)));
    }

    #[test]
    fn availability_untouched_for_other_departments() {
        let conn = open_memory_database().unwrap();
        book_appointment(&conn, &request("10:00 AM"), now()).unwrap();

        let available = available_slots(&conn, "2024-05-01", "Orthopedics").unwrap();
        assert_eq!(available.len(), 96);
    }

    #[test]
    fn availability_requires_date_and_department() {
        let conn = open_memory_database().unwrap();
        for (date, department) in [("", "Cardiology"), ("2024-05-01", ""), ("  ", "  ")] {
            let err = available_slots(&conn, date, department).unwrap_err();
            assert!(matches!(err, BookingError::InvalidRequest(_)));
        }
    }

    #[test]
    fn age_boundaries() {
        let conn = open_memory_database().unwrap();

        for bad_age in [0, -1] {
            let mut req = request("10:00 AM");
            req.age = Some(bad_age);
            let err = book_appointment(&conn, &req, now()).unwrap_err();
            assert!(matches!(err, BookingError::InvalidField("age")), "age {bad_age}");
        }

        let mut req = request("10:00 AM");
        req.age = Some(1);
        assert!(book_appointment(&conn, &req, now()).is_ok());
    }

    #[test]
    fn phone_must_be_digits_only() {
        let conn = open_memory_database().unwrap();

        let mut req = request("10:00 AM");
        req.phone = Some("abc123".into());
        assert!(matches!(
            book_appointment(&conn, &req, now()).unwrap_err(),
            BookingError::InvalidField("phone")
        ));

        // Blank phone is a missing field, not a malformed one
        let mut req = request("10:00 AM");
        req.phone = Some("".into());
        assert!(matches!(
            book_appointment(&conn, &req, now()).unwrap_err(),
            BookingError::InvalidRequest(_)
        ));

        let mut req = request("10:00 AM");
        req.phone = Some("9876543210".into());
        assert!(book_appointment(&conn, &req, now()).is_ok());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let conn = open_memory_database().unwrap();

        let mut req = request("10:00 AM");
        req.name = None;
        assert!(matches!(
            book_appointment(&conn, &req, now()).unwrap_err(),
            BookingError::InvalidRequest(_)
        ));

        let mut req = request("10:00 AM");
        req.age = None;
        assert!(matches!(
            book_appointment(&conn, &req, now()).unwrap_err(),
            BookingError::InvalidRequest(_)
        ));
        assert_eq!(db::count_appointments(&conn).unwrap(), 0);
    }

    #[test]
    fn non_catalog_slot_is_rejected() {
        let conn = open_memory_database().unwrap();
        let err = book_appointment(&conn, &request("10:03 AM"), now()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidField("slot")));
    }

    #[test]
    fn ticket_id_round_trips_to_its_appointment() {
        let conn = open_memory_database().unwrap();
        let appt = book_appointment(&conn, &request("3:15 PM"), now()).unwrap();

        let found = db::find_appointment_by_ticket(&conn, &appt.ticket_id)
            .unwrap()
            .unwrap();
        assert_eq!(found.id, appt.id);
        assert_eq!(found.phone, appt.phone);
    }

    #[test]
    fn concurrent_bookings_for_one_key_yield_exactly_one_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opd.db");
        // Create the schema before spawning writers
        drop(open_database(&path).unwrap());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let path = path.clone();
            handles.push(std::thread::spawn(move || {
                let conn = open_database(&path).unwrap();
                book_appointment(&conn, &request("10:00 AM"), now())
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(BookingError::SlotConflict)))
            .count();

        assert_eq!(successes, 1, "exactly one booking must win");
        assert_eq!(conflicts, 7, "all losers must observe a conflict");

        let conn = open_database(&path).unwrap();
        assert_eq!(db::count_appointments(&conn).unwrap(), 1);
    }
}
