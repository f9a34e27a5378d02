use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub college_id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    /// Maximum number of confirmed (status=registered) registrants.
    pub capacity: i32,
    /// Per-event secret embedded in the check-in QR code.
    #[serde(skip_serializing)]
    pub qr_secret: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event lifecycle. Draft → Active → Completed is monotonic; Cancelled is
/// terminal and reachable from any non-terminal state.
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,

    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    /// Whether `self → next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: &Status) -> bool {
        match (self, next) {
            (Status::Draft, Status::Active) => true,
            (Status::Active, Status::Completed) => true,
            (from, Status::Cancelled) if !from.is_terminal() => true,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::college::Entity",
        from = "Column::CollegeId",
        to = "super::college::Column::Id"
    )]
    College,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::registration::Entity")]
    Registrations,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::college::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::College.def()
    }
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Optional filters for the tenant-scoped event listing.
#[derive(Debug, Default)]
pub struct EventFilter {
    pub status: Option<Status>,
    pub category: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

impl Model {
    /// Creates an event and mints its QR secret.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        college_id: i64,
        created_by: i64,
        title: &str,
        description: Option<&str>,
        category: Option<&str>,
        event_date: DateTime<Utc>,
        venue: &str,
        capacity: i32,
        status: Status,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let event = ActiveModel {
            college_id: Set(college_id),
            created_by: Set(created_by),
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            category: Set(category.map(str::to_owned)),
            event_date: Set(event_date),
            venue: Set(venue.to_owned()),
            capacity: Set(capacity),
            qr_secret: Set(generate_secret()),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        event.insert(db).await
    }

    /// Finds an event by id inside one tenant. Events of other colleges are
    /// indistinguishable from absent ones.
    pub async fn find_in_college(
        db: &DbConn,
        event_id: i64,
        college_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(event_id))
            .filter(Column::CollegeId.eq(college_id))
            .one(db)
            .await
    }

    /// Tenant-scoped listing with optional status/category filters.
    /// Returns the page plus the total matching count.
    pub async fn list(
        db: &DbConn,
        college_id: i64,
        filter: &EventFilter,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut query = Entity::find().filter(Column::CollegeId.eq(college_id));

        if let Some(status) = &filter.status {
            query = query.filter(Column::Status.eq(status.clone()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(Column::Category.eq(category.clone()));
        }

        let total = query.clone().count(db).await?;

        let events = query
            .order_by_asc(Column::EventDate)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await?;

        Ok((events, total))
    }

    /// Applies a lifecycle transition, rejecting illegal steps.
    pub async fn transition(db: &DbConn, event: Model, next: Status) -> Result<Model, DbErr> {
        if !event.status.can_transition_to(&next) {
            return Err(DbErr::Custom(format!(
                "Illegal status transition {} -> {}",
                event.status, next
            )));
        }
        let mut active: ActiveModel = event.into();
        active.status = Set(next);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
