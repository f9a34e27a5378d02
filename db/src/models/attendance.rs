use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use thiserror::Error;

use super::{event, registration};

/// Fact that a student was present at an event. Written once via the manual
/// or QR path, never mutated. The composite primary key enforces one row per
/// (event, student).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    pub college_id: i64,
    /// Admin who recorded the manual mark; `None` for QR self-check-in.
    pub marked_by: Option<i64>,
    pub taken_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Error)]
pub enum CheckInError {
    /// Wrong event, wrong secret, or wrong tenant. Deliberately one variant:
    /// a caller must not learn which field of the proof failed.
    #[error("invalid check-in proof")]
    InvalidProof,
    #[error("attendance already recorded")]
    AlreadyCheckedIn,
    /// Manual path only: the student holds no confirmed registration.
    #[error("student is not registered for this event")]
    NotRegistered,
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl Model {
    pub async fn exists(db: &DbConn, event_id: i64, student_id: i64) -> Result<bool, DbErr> {
        Ok(Entity::find_by_id((event_id, student_id))
            .one(db)
            .await?
            .is_some())
    }

    /// Admin-initiated mark. Requires a confirmed (status=registered)
    /// registration for the pair; waitlisted or cancelled rows do not count.
    pub async fn mark_manual(
        db: &DbConn,
        event: &event::Model,
        student_id: i64,
        admin_id: i64,
    ) -> Result<Model, CheckInError> {
        let registration = registration::Model::find_active(db, event.id, student_id).await?;
        match registration {
            Some(r) if r.status == registration::Status::Registered => {}
            _ => return Err(CheckInError::NotRegistered),
        }

        if Self::exists(db, event.id, student_id).await? {
            return Err(CheckInError::AlreadyCheckedIn);
        }

        insert(db, event, student_id, Some(admin_id)).await
    }

    /// Student-initiated QR check-in.
    ///
    /// The presented proof must match the stored event on all three fields —
    /// event id, secret, and tenant — and the event must live in the
    /// caller's own college. Every mismatch fails with the same
    /// `InvalidProof`.
    pub async fn check_in_qr(
        db: &DbConn,
        caller_college_id: i64,
        student_id: i64,
        claimed_event_id: i64,
        claimed_secret: &str,
        claimed_college_id: i64,
    ) -> Result<Model, CheckInError> {
        let event = event::Model::find_in_college(db, claimed_event_id, caller_college_id).await?;

        let Some(event) = event else {
            return Err(CheckInError::InvalidProof);
        };
        if claimed_college_id != event.college_id || claimed_secret != event.qr_secret {
            return Err(CheckInError::InvalidProof);
        }

        if Self::exists(db, event.id, student_id).await? {
            return Err(CheckInError::AlreadyCheckedIn);
        }

        insert(db, &event, student_id, None).await
    }

    pub async fn for_event(db: &DbConn, event_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .all(db)
            .await
    }
}

async fn insert(
    db: &DbConn,
    event: &event::Model,
    student_id: i64,
    marked_by: Option<i64>,
) -> Result<Model, CheckInError> {
    let record = ActiveModel {
        event_id: Set(event.id),
        student_id: Set(student_id),
        college_id: Set(event.college_id),
        marked_by: Set(marked_by),
        taken_at: Set(Utc::now()),
    };
    Ok(record.insert(db).await?)
}
