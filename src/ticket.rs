//! Ticket artifacts — identifier generation, QR payload, printable PDF.
//!
//! A ticket identifier is `KC` + ddmmyyyyHHMMSS derived from the booking
//! timestamp, plus a 4-character random suffix. The wall clock alone is
//! not a uniqueness source (two bookings can commit within one second);
//! the suffix makes a collision negligible and the ledger's unique
//! constraint on ticket_id remains as the final backstop.
//!
//! PDF generation via `printpdf`, QR rendering via `qrcode`. The QR is
//! embedded in the PDF as vector rectangles, one per dark module.

use chrono::NaiveDateTime;
use printpdf::path::PaintMode;
use printpdf::*;
use qrcode::QrCode;
use rand::{distributions::Alphanumeric, Rng};
use std::io::BufWriter;
use thiserror::Error;

use crate::models::Appointment;

/// Human-readable ticket id prefix.
pub const TICKET_PREFIX: &str = "KC";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Qr(String),
    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

// ─── Ticket identifier ────────────────────────────────────────────────────────

/// Generate a ticket identifier for a booking committed at `now`.
///
/// Format: `KC` + day month year hour minute second (two-digit fields,
/// four-digit year, 24-hour clock) + 4 random alphanumeric characters.
pub fn new_ticket_id(now: NaiveDateTime) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| (rng.sample(Alphanumeric) as char).to_ascii_uppercase())
        .collect();
    format!("{TICKET_PREFIX}{}{suffix}", now.format("%d%m%Y%H%M%S"))
}

// ─── QR artifact ──────────────────────────────────────────────────────────────

/// Render the scannable QR payload for a ticket id as an SVG string.
pub fn render_qr_svg(payload: &str) -> Result<String, RenderError> {
    use qrcode::render::svg;

    let code = QrCode::new(payload.as_bytes()).map_err(|e| RenderError::Qr(e.to_string()))?;

    let svg_string = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .max_dimensions(300, 300)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build();

    Ok(svg_string)
}

// ─── PDF generation ───────────────────────────────────────────────────────────

/// QR block geometry on the ticket page, in millimeters.
const QR_SIZE: f32 = 40.0;
const QR_X: f32 = 148.0;
const QR_Y: f32 = 222.0;

/// Printed visit guidelines, shared by every ticket.
const GUIDELINES: [&str; 4] = [
    "Please arrive 15 minutes before your scheduled slot with a valid ID and your medical records.",
    "Follow all hospital safety protocols while on the premises.",
    "For assistance, contact the reception desk.",
    "This ticket is valid only for the printed date and time slot.",
];

/// Generates the printable OPD ticket for an appointment. Returns PDF bytes.
pub fn render_ticket_pdf(
    appointment: &Appointment,
    hospital_name: &str,
    generated_at: NaiveDateTime,
) -> Result<Vec<u8>, RenderError> {
    let title = format!("OPD Ticket - {}", appointment.ticket_id);
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;
    let oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| RenderError::Pdf(format!("font error: {e}")))?;

    let mut y = Mm(280.0);

    // Header
    layer.use_text(format!("{hospital_name} OPD Ticket"), 20.0, Mm(20.0), y, &bold);
    y -= Mm(7.0);
    layer.use_text(
        "Outpatient Department Appointment",
        11.0,
        Mm(20.0),
        y,
        &oblique,
    );
    y -= Mm(14.0);

    // Patient information
    layer.use_text("PATIENT INFORMATION:", 12.0, Mm(20.0), y, &bold);
    y -= Mm(8.0);
    let age = appointment.age.to_string();
    let details: [(&str, &str); 8] = [
        ("Patient Name", &appointment.name),
        ("Age", &age),
        ("Phone Number", &appointment.phone),
        ("Address", &appointment.address),
        ("Department", &appointment.department),
        ("Date", &appointment.date),
        ("Time Slot", &appointment.slot),
        ("Ticket ID", &appointment.ticket_id),
    ];
    for (label, value) in details {
        layer.use_text(format!("{label}:"), 10.0, Mm(25.0), y, &bold);
        for line in wrap_text(value, 60) {
            layer.use_text(&line, 10.0, Mm(62.0), y, &font);
            y -= Mm(6.0);
        }
    }

    // QR block, right of the patient information
    draw_qr_modules(&layer, &appointment.ticket_id)?;
    layer.use_text("Scan to Verify", 10.0, Mm(QR_X + 8.0), Mm(QR_Y - 6.0), &oblique);

    // Visit guidelines
    y -= Mm(10.0);
    layer.use_text("VISIT GUIDELINES:", 12.0, Mm(20.0), y, &bold);
    y -= Mm(7.0);
    for (i, text) in GUIDELINES.iter().enumerate() {
        for line in wrap_text(&format!("{}. {text}", i + 1), 90) {
            layer.use_text(&line, 9.0, Mm(25.0), y, &font);
            y -= Mm(5.0);
        }
        y -= Mm(1.5);
    }

    // Footer
    layer.use_text(hospital_name, 12.0, Mm(20.0), Mm(30.0), &bold);
    layer.use_text(
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        9.0,
        Mm(20.0),
        Mm(24.0),
        &oblique,
    );
    layer.use_text(
        "Ticket valid till slot ends",
        9.0,
        Mm(20.0),
        Mm(19.0),
        &font,
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::Pdf(format!("buffer error: {e}")))
}

/// Draw the ticket id QR into the fixed QR block, one filled rectangle per
/// dark module. Rows come out of the encoder top-down while PDF y grows
/// bottom-up, so rows are flipped.
fn draw_qr_modules(layer: &PdfLayerReference, payload: &str) -> Result<(), RenderError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| RenderError::Qr(e.to_string()))?;
    let modules = code.width();
    let module_size = QR_SIZE / modules as f32;

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let col = (i % modules) as f32;
        let row = (i / modules) as f32;
        let x = QR_X + col * module_size;
        let y = QR_Y + QR_SIZE - (row + 1.0) * module_size;
        layer.add_rect(
            Rect::new(Mm(x), Mm(y), Mm(x + module_size), Mm(y + module_size))
                .with_mode(PaintMode::Fill),
        );
    }
    Ok(())
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ─── Tests ────────────────────────────────────────────────────────────────────
