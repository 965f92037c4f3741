//! Appointment endpoints.
//!
//! Two endpoints:
//! - `GET /api/appointments/available-slots` — free slots for a (date, department) pair
//! - `POST /api/appointments/book-appointment` — validate and commit a booking

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::booking::{self, BookingRequest};

#[derive(Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: Option<String>,
    pub department: Option<String>,
}

#[derive(Serialize)]
pub struct AvailableSlotsResponse {
    #[serde(rename = "availableSlots")]
    pub available_slots: Vec<&'static str>,
}

/// `GET /api/appointments/available-slots?date&department` — free slots.
pub async fn available_slots(
    State(ctx): State<ApiContext>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let available = booking::available_slots(
        &conn,
        query.date.as_deref().unwrap_or(""),
        query.department.as_deref().unwrap_or(""),
    )?;

    Ok(Json(AvailableSlotsResponse {
        available_slots: available,
    }))
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub message: &'static str,
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    pub qr_svg: String,
}

/// `POST /api/appointments/book-appointment` — commit a booking.
pub async fn book(
    State(ctx): State<ApiContext>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let conn = ctx.state.open_db()?;
    let appointment = booking::book_appointment(&conn, &request, Local::now().naive_local())?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Appointment booked successfully!",
            ticket_id: appointment.ticket_id,
            qr_svg: appointment.qr_svg,
        }),
    ))
}
