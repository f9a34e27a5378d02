use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{
    DatabaseTransaction, PaginatorTrait, QueryOrder, TransactionTrait,
    sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use super::event;

/// A student's claim on an event slot: confirmed, queued, or given up.
///
/// At most one non-cancelled row exists per (event, student). Waitlisted rows
/// carry a dense 1-based `waitlist_position` in arrival order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub college_id: i64,
    pub status: Status,
    pub waitlist_position: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "registration_status_type"
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "registered")]
    Registered,

    #[sea_orm(string_value = "waitlisted")]
    Waitlisted,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,
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
pub enum AdmissionError {
    #[error("event is not open for registration")]
    EventClosed,
    #[error("student already has an active registration for this event")]
    Duplicate,
    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum CancelError {
    #[error("registration not found")]
    NotFound,
    #[error("registration is already cancelled")]
    AlreadyCancelled,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Result of a cancellation: the cancelled row, and the registration promoted
/// off the waitlist head if a confirmed slot was freed.
#[derive(Debug)]
pub struct CancelOutcome {
    pub cancelled: Model,
    pub promoted: Option<Model>,
}

impl Model {
    /// Admits a student to an event: confirmed while capacity remains, else
    /// appended to the waitlist with the next dense position.
    ///
    /// The count-then-insert sequence runs inside one transaction so two
    /// concurrent admissions cannot both observe a free slot or compute the
    /// same waitlist position.
    pub async fn admit(
        db: &DbConn,
        event: &event::Model,
        student_id: i64,
    ) -> Result<Model, AdmissionError> {
        if event.status != event::Status::Active {
            return Err(AdmissionError::EventClosed);
        }

        let txn = db.begin().await?;

        let existing = Entity::find()
            .filter(Column::EventId.eq(event.id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.ne(Status::Cancelled))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AdmissionError::Duplicate);
        }

        let registered = Entity::find()
            .filter(Column::EventId.eq(event.id))
            .filter(Column::Status.eq(Status::Registered))
            .count(&txn)
            .await?;

        let (status, position) = if registered < event.capacity.max(0) as u64 {
            (Status::Registered, None)
        } else {
            (Status::Waitlisted, Some(next_position(&txn, event.id).await?))
        };

        let now = Utc::now();
        let registration = ActiveModel {
            event_id: Set(event.id),
            student_id: Set(student_id),
            college_id: Set(event.college_id),
            status: Set(status),
            waitlist_position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = registration.insert(&txn).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Cancels a student's registration.
    ///
    /// Re-packs waitlist positions so they stay dense, and promotes the
    /// waitlist head into the freed slot when a confirmed registration is
    /// cancelled.
    pub async fn cancel(
        db: &DbConn,
        registration_id: i64,
        student_id: i64,
    ) -> Result<CancelOutcome, CancelError> {
        let txn = db.begin().await?;

        let Some(registration) = Entity::find()
            .filter(Column::Id.eq(registration_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await?
        else {
            return Err(CancelError::NotFound);
        };

        if registration.status == Status::Cancelled {
            return Err(CancelError::AlreadyCancelled);
        }

        let event_id = registration.event_id;
        let was = registration.status.clone();
        let freed_position = registration.waitlist_position;

        let mut active: ActiveModel = registration.into();
        active.status = Set(Status::Cancelled);
        active.waitlist_position = Set(None);
        active.updated_at = Set(Utc::now());
        let cancelled = active.update(&txn).await?;

        let promoted = match was {
            Status::Registered => {
                let head = Entity::find()
                    .filter(Column::EventId.eq(event_id))
                    .filter(Column::Status.eq(Status::Waitlisted))
                    .order_by_asc(Column::WaitlistPosition)
                    .one(&txn)
                    .await?;

                if let Some(head) = head {
                    let head_position = head.waitlist_position.unwrap_or(1);
                    let mut promoted: ActiveModel = head.into();
                    promoted.status = Set(Status::Registered);
                    promoted.waitlist_position = Set(None);
                    promoted.updated_at = Set(Utc::now());
                    let promoted = promoted.update(&txn).await?;
                    shift_positions_after(&txn, event_id, head_position).await?;
                    Some(promoted)
                } else {
                    None
                }
            }
            Status::Waitlisted => {
                if let Some(p) = freed_position {
                    shift_positions_after(&txn, event_id, p).await?;
                }
                None
            }
            Status::Cancelled => None,
        };

        txn.commit().await?;
        Ok(CancelOutcome { cancelled, promoted })
    }

    /// The student's current non-cancelled registration for an event, if any.
    pub async fn find_active(
        db: &DbConn,
        event_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.ne(Status::Cancelled))
            .one(db)
            .await
    }

    /// All of a student's registrations with their events, newest first.
    pub async fn list_for_student(
        db: &DbConn,
        student_id: i64,
    ) -> Result<Vec<(Model, Option<event::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(event::Entity)
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}

async fn next_position(txn: &DatabaseTransaction, event_id: i64) -> Result<i32, DbErr> {
    let last = Entity::find()
        .filter(Column::EventId.eq(event_id))
        .filter(Column::Status.eq(Status::Waitlisted))
        .order_by_desc(Column::WaitlistPosition)
        .one(txn)
        .await?;

    Ok(last.and_then(|r| r.waitlist_position).unwrap_or(0) + 1)
}

async fn shift_positions_after(
    txn: &DatabaseTransaction,
    event_id: i64,
    position: i32,
) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(
            Column::WaitlistPosition,
            Expr::col(Column::WaitlistPosition).sub(1),
        )
        .filter(Column::EventId.eq(event_id))
        .filter(Column::Status.eq(Status::Waitlisted))
        .filter(Column::WaitlistPosition.gt(position))
        .exec(txn)
        .await?;
    Ok(())
}
