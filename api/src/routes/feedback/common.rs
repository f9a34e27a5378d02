use db::models::feedback;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackReq {
    pub event_id: i64,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    pub comments: Option<String>,
    pub anonymous: Option<bool>,
}

/// Patch body for the update endpoint. Only present fields are applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFeedbackReq {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    pub comments: Option<String>,
    pub anonymous: Option<bool>,
}

#[derive(Debug, Serialize, Default)]
pub struct CreatedFeedbackResponse {
    pub feedback_id: i64,
}

#[derive(Debug, Serialize)]
pub struct FeedbackRow {
    /// `null` when the student asked to stay anonymous.
    pub student_id: Option<i64>,
    pub rating: i32,
    pub comments: Option<String>,
    pub anonymous: bool,
    pub created_at: String,
}

impl From<feedback::Model> for FeedbackRow {
    fn from(f: feedback::Model) -> Self {
        Self {
            student_id: if f.anonymous { None } else { Some(f.student_id) },
            rating: f.rating,
            comments: f.comments,
            anonymous: f.anonymous,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct FeedbackSummary {
    pub average_rating: f64,
    /// Counts of ratings 1 through 5, in order.
    pub distribution: [u64; 5],
}

#[derive(Debug, Serialize, Default)]
pub struct EventFeedbackResponse {
    pub feedback: Vec<FeedbackRow>,
    pub summary: FeedbackSummary,
}
