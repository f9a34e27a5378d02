use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct EventPopularityRow {
    pub event_id: i64,
    pub title: String,
    pub registration_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ParticipationRow {
    pub student_id: i64,
    pub student_name: String,
    pub student_number: Option<String>,
    pub attendance_count: u64,
}

#[derive(Debug, Serialize)]
pub struct AttendancePercentageRow {
    pub event_id: i64,
    pub title: String,
    pub registered: u64,
    pub attended: u64,
    /// 0.0 when `registered` is zero — the undefined ratio is special-cased
    /// rather than serialized as NaN.
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct AverageFeedbackRow {
    pub event_id: i64,
    pub title: String,
    pub feedback_count: u64,
    pub average_rating: f64,
}

/// Shared query knobs. `from`/`to` bound attendance timestamps
/// (RFC 3339); `category` filters via the event; `limit` caps top-N
/// reports (default 10).
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}
