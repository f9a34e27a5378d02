use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A student's private note on an event they registered for.
/// One per (event, student), upserted in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub college_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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

impl Model {
    pub async fn find_for_student(
        db: &DbConn,
        event_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    /// Create-if-absent, else update-in-place. The bool is `true` when a new
    /// row was created.
    pub async fn upsert(
        db: &DbConn,
        event_id: i64,
        student_id: i64,
        college_id: i64,
        content: &str,
    ) -> Result<(Model, bool), DbErr> {
        let now = Utc::now();

        if let Some(existing) = Self::find_for_student(db, event_id, student_id).await? {
            let mut active: ActiveModel = existing.into();
            active.content = Set(content.to_owned());
            active.updated_at = Set(now);
            return Ok((active.update(db).await?, false));
        }

        let note = ActiveModel {
            event_id: Set(event_id),
            student_id: Set(student_id),
            college_id: Set(college_id),
            content: Set(content.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok((note.insert(db).await?, true))
    }
}
