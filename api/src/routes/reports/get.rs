use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use db::models::{attendance, event, feedback, registration, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use util::state::AppState;

use super::common::{
    AttendancePercentageRow, AverageFeedbackRow, EventPopularityRow, ParticipationRow, ReportQuery,
};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

const DEFAULT_TOP_N: usize = 10;

type ReportResult<T> = (StatusCode, Json<ApiResponse<Vec<T>>>);

fn db_error<T: serde::Serialize>(e: impl std::fmt::Display) -> ReportResult<T> {
    tracing::error!(error = %e, "Report query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Database error")),
    )
}

async fn college_events(
    db: &sea_orm::DatabaseConnection,
    college_id: i64,
    category: Option<&str>,
) -> Result<Vec<event::Model>, sea_orm::DbErr> {
    let mut query = event::Entity::find().filter(event::Column::CollegeId.eq(college_id));
    if let Some(category) = category {
        query = query.filter(event::Column::Category.eq(category));
    }
    query.all(db).await
}

/// GET /api/reports/event-popularity
///
/// Non-cancelled registration counts per event, most popular first.
pub async fn event_popularity(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<EventPopularityRow> {
    let db = app_state.db();

    let events = match college_events(db, user.college_id, query.category.as_deref()).await {
        Ok(events) => events,
        Err(e) => return db_error(e),
    };

    let registrations = match registration::Entity::find()
        .filter(registration::Column::CollegeId.eq(user.college_id))
        .filter(registration::Column::Status.ne(registration::Status::Cancelled))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };

    let mut counts: HashMap<i64, u64> = HashMap::new();
    for r in &registrations {
        *counts.entry(r.event_id).or_default() += 1;
    }

    let mut rows: Vec<EventPopularityRow> = events
        .into_iter()
        .map(|e| EventPopularityRow {
            registration_count: counts.get(&e.id).copied().unwrap_or(0),
            event_id: e.id,
            title: e.title,
        })
        .collect();
    rows.sort_by(|a, b| b.registration_count.cmp(&a.registration_count));

    (
        StatusCode::OK,
        Json(ApiResponse::success(rows, "Report generated")),
    )
}

enum ReportError {
    BadTimestamp,
    Db(sea_orm::DbErr),
}

impl From<sea_orm::DbErr> for ReportError {
    fn from(e: sea_orm::DbErr) -> Self {
        ReportError::Db(e)
    }
}

fn parse_bound(raw: &Option<String>) -> Result<Option<DateTime<Utc>>, ReportError> {
    match raw {
        None => Ok(None),
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|_| ReportError::BadTimestamp),
    }
}

/// Attendance counts per student, filtered by time window and event
/// category, joined with student identity. Shared by the participation and
/// top-student reports.
async fn participation_rows(
    db: &sea_orm::DatabaseConnection,
    college_id: i64,
    query: &ReportQuery,
) -> Result<Vec<ParticipationRow>, ReportError> {
    let from = parse_bound(&query.from)?;
    let to = parse_bound(&query.to)?;

    let mut attendance_query =
        attendance::Entity::find().filter(attendance::Column::CollegeId.eq(college_id));
    if let Some(from) = from {
        attendance_query = attendance_query.filter(attendance::Column::TakenAt.gte(from));
    }
    if let Some(to) = to {
        attendance_query = attendance_query.filter(attendance::Column::TakenAt.lte(to));
    }

    let records = attendance_query.all(db).await?;

    // Optional category filter goes through the events table.
    let event_filter: Option<std::collections::HashSet<i64>> = match &query.category {
        Some(category) => {
            let events = college_events(db, college_id, Some(category)).await?;
            Some(events.into_iter().map(|e| e.id).collect())
        }
        None => None,
    };

    let mut counts: HashMap<i64, u64> = HashMap::new();
    for record in &records {
        if let Some(allowed) = &event_filter {
            if !allowed.contains(&record.event_id) {
                continue;
            }
        }
        *counts.entry(record.student_id).or_default() += 1;
    }

    let students = user::Entity::find()
        .filter(user::Column::CollegeId.eq(college_id))
        .filter(user::Column::Role.eq(user::Role::Student))
        .all(db)
        .await?;

    let mut rows: Vec<ParticipationRow> = students
        .into_iter()
        .filter_map(|s| {
            counts.get(&s.id).map(|&attendance_count| ParticipationRow {
                student_id: s.id,
                student_name: format!("{} {}", s.first_name, s.last_name),
                student_number: s.student_number,
                attendance_count,
            })
        })
        .collect();
    // Descending by count; ties keep storage order (stable sort).
    rows.sort_by(|a, b| b.attendance_count.cmp(&a.attendance_count));
    Ok(rows)
}

/// GET /api/reports/student-participation
///
/// Attendance counts per student, optionally bounded by `from`/`to`
/// timestamps and an event `category`.
pub async fn student_participation(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<ParticipationRow> {
    match participation_rows(app_state.db(), user.college_id, &query).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Report generated")),
        ),
        Err(ReportError::BadTimestamp) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("from/to must be RFC 3339 timestamps")),
        ),
        Err(ReportError::Db(e)) => db_error(e),
    }
}

/// GET /api/reports/leaderboard
///
/// Top-N students by attendance count, descending. `limit` defaults to 10.
pub async fn leaderboard(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<ParticipationRow> {
    top_students(State(app_state), Extension(user), Query(query)).await
}

/// GET /api/reports/top-students
///
/// Same ranking as the leaderboard with the shared filters applied.
pub async fn top_students(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<ParticipationRow> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_N);
    match participation_rows(app_state.db(), user.college_id, &query).await {
        Ok(mut rows) => {
            rows.truncate(limit);
            (
                StatusCode::OK,
                Json(ApiResponse::success(rows, "Report generated")),
            )
        }
        Err(ReportError::BadTimestamp) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("from/to must be RFC 3339 timestamps")),
        ),
        Err(ReportError::Db(e)) => db_error(e),
    }
}

/// GET /api/reports/attendance-percentage
///
/// Attended/registered ratio per event. Events with zero confirmed
/// registrations report 0 instead of a division by zero.
pub async fn attendance_percentage(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<AttendancePercentageRow> {
    let db = app_state.db();

    let events = match college_events(db, user.college_id, query.category.as_deref()).await {
        Ok(events) => events,
        Err(e) => return db_error(e),
    };

    let registrations = match registration::Entity::find()
        .filter(registration::Column::CollegeId.eq(user.college_id))
        .filter(registration::Column::Status.eq(registration::Status::Registered))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };

    let records = match attendance::Entity::find()
        .filter(attendance::Column::CollegeId.eq(user.college_id))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };

    let mut registered: HashMap<i64, u64> = HashMap::new();
    for r in &registrations {
        *registered.entry(r.event_id).or_default() += 1;
    }
    let mut attended: HashMap<i64, u64> = HashMap::new();
    for a in &records {
        *attended.entry(a.event_id).or_default() += 1;
    }

    let rows: Vec<AttendancePercentageRow> = events
        .into_iter()
        .map(|e| {
            let registered = registered.get(&e.id).copied().unwrap_or(0);
            let attended = attended.get(&e.id).copied().unwrap_or(0);
            let percentage = if registered == 0 {
                0.0
            } else {
                (attended as f64 / registered as f64) * 100.0
            };
            AttendancePercentageRow {
                event_id: e.id,
                title: e.title,
                registered,
                attended,
                percentage: (percentage * 10.0).round() / 10.0,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(rows, "Report generated")),
    )
}

/// GET /api/reports/average-feedback
///
/// Average feedback rating per event.
pub async fn average_feedback(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> ReportResult<AverageFeedbackRow> {
    let db = app_state.db();

    let events = match college_events(db, user.college_id, query.category.as_deref()).await {
        Ok(events) => events,
        Err(e) => return db_error(e),
    };

    let rows = match feedback::Entity::find()
        .filter(feedback::Column::CollegeId.eq(user.college_id))
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return db_error(e),
    };

    let mut sums: HashMap<i64, (u64, i64)> = HashMap::new();
    for f in &rows {
        let entry = sums.entry(f.event_id).or_default();
        entry.0 += 1;
        entry.1 += f.rating as i64;
    }

    let report: Vec<AverageFeedbackRow> = events
        .into_iter()
        .map(|e| {
            let (count, sum) = sums.get(&e.id).copied().unwrap_or((0, 0));
            let average = if count == 0 {
                0.0
            } else {
                sum as f64 / count as f64
            };
            AverageFeedbackRow {
                event_id: e.id,
                title: e.title,
                feedback_count: count,
                average_rating: (average * 100.0).round() / 100.0,
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(report, "Report generated")),
    )
}
