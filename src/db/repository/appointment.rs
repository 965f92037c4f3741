use std::collections::HashSet;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Appointment;

const APPOINTMENT_COLUMNS: &str =
    "id, name, age, phone, address, department, date, slot, ticket_id, qr_svg, booked_at";

fn map_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        name: row.get(1)?,
        age: row.get(2)?,
        phone: row.get(3)?,
        address: row.get(4)?,
        department: row.get(5)?,
        date: row.get(6)?,
        slot: row.get(7)?,
        ticket_id: row.get(8)?,
        qr_svg: row.get(9)?,
        booked_at: row.get(10)?,
    })
}

/// Insert a confirmed appointment.
///
/// A violation of the unique (date, department, slot) index surfaces as
/// [`DatabaseError::SlotTaken`]; this INSERT is the authoritative conflict
/// check, so a lost race never produces a double booking.
pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    let result = conn.execute(
        "INSERT INTO appointments
             (id, name, age, phone, address, department, date, slot, ticket_id, qr_svg, booked_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            appt.id.to_string(),
            appt.name,
            appt.age,
            appt.phone,
            appt.address,
            appt.department,
            appt.date,
            appt.slot,
            appt.ticket_id,
            appt.qr_svg,
            appt.booked_at,
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, Some(msg)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains("appointments.slot") =>
        {
            Err(DatabaseError::SlotTaken {
                date: appt.date.clone(),
                department: appt.department.clone(),
                slot: appt.slot.clone(),
            })
        }
        Err(rusqlite::Error::SqliteFailure(e, Some(msg)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DatabaseError::ConstraintViolation(msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// Slot values already booked for a (date, department) pair.
pub fn booked_slots(
    conn: &Connection,
    date: &str,
    department: &str,
) -> Result<HashSet<String>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT slot FROM appointments WHERE date = ?1 AND department = ?2",
    )?;
    let rows = stmt.query_map(params![date, department], |row| row.get::<_, String>(0))?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Look up the appointment occupying a (date, department, slot) key.
pub fn find_appointment_by_slot(
    conn: &Connection,
    date: &str,
    department: &str,
    slot: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments
         WHERE date = ?1 AND department = ?2 AND slot = ?3"
    ))?;

    match stmt.query_row(params![date, department, slot], map_appointment) {
        Ok(appt) => Ok(Some(appt)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look up an appointment by its ticket identifier.
pub fn find_appointment_by_ticket(
    conn: &Connection,
    ticket_id: &str,
) -> Result<Option<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE ticket_id = ?1"
    ))?;

    match stmt.query_row(params![ticket_id], map_appointment) {
        Ok(appt) => Ok(Some(appt)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Total number of confirmed appointments in the ledger.
pub fn count_appointments(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
    Ok(count)
}
