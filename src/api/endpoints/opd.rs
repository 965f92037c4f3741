//! OPD ticket retrieval endpoint.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Local;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::ticket;

/// `GET /api/opd/generate-ticket/:ticket_id` — printable PDF ticket.
pub async fn generate_ticket(
    State(ctx): State<ApiContext>,
    Path(ticket_id): Path<String>,
) -> Result<Response, ApiError> {
    let ticket_id = ticket_id.trim();
    if ticket_id.is_empty() {
        return Err(ApiError::InvalidRequest("Invalid ticket ID".into()));
    }

    let conn = ctx.state.open_db()?;
    let appointment = db::find_appointment_by_ticket(&conn, ticket_id)?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".into()))?;

    let pdf = ticket::render_ticket_pdf(
        &appointment,
        &ctx.state.config.hospital_name,
        Local::now().naive_local(),
    )?;

    tracing::info!(ticket_id = %appointment.ticket_id, bytes = pdf.len(), "ticket PDF generated");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=OPD_Ticket_{}.pdf", appointment.ticket_id),
        ),
    ];

    Ok((headers, pdf).into_response())
}
