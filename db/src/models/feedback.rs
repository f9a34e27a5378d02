use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

/// One rating per (event, student), mutable by the owning student.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub college_id: i64,
    pub rating: i32,
    pub comments: Option<String>,
    pub anonymous: bool,
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

/// Explicit patch for the update endpoint: only set fields are applied.
#[derive(Debug, Default)]
pub struct FeedbackPatch {
    pub rating: Option<i32>,
    pub comments: Option<String>,
    pub anonymous: Option<bool>,
}

impl FeedbackPatch {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.comments.is_none() && self.anonymous.is_none()
    }
}

impl Model {
    pub async fn create(
        db: &DbConn,
        event_id: i64,
        student_id: i64,
        college_id: i64,
        rating: i32,
        comments: Option<&str>,
        anonymous: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let feedback = ActiveModel {
            event_id: Set(event_id),
            student_id: Set(student_id),
            college_id: Set(college_id),
            rating: Set(rating),
            comments: Set(comments.map(str::to_owned)),
            anonymous: Set(anonymous),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        feedback.insert(db).await
    }

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

    pub async fn for_event(db: &DbConn, event_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Applies only the fields present in the patch.
    pub async fn apply_patch(
        db: &DbConn,
        feedback: Model,
        patch: FeedbackPatch,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = feedback.into();
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(comments) = patch.comments {
            active.comments = Set(Some(comments));
        }
        if let Some(anonymous) = patch.anonymous {
            active.anonymous = Set(anonymous);
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
