use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ManualMarkReq {
    pub event_id: i64,
    pub student_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct QrCheckInReq {
    /// The scanned QR content: a JSON string carrying
    /// `{event_id, secret, college_id}`.
    pub qr_data: String,
}

/// The decoded QR payload. Mirrors what `GET /events/{id}/qr` serves.
#[derive(Debug, Deserialize)]
pub struct QrData {
    pub event_id: i64,
    pub secret: String,
    pub college_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AttendanceRow {
    pub student_id: i64,
    pub student_name: Option<String>,
    pub student_number: Option<String>,
    pub taken_at: String,
    /// Admin who recorded the mark; `null` for QR self-check-in.
    pub marked_by: Option<i64>,
}
