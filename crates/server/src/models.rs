use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: i32,
    pub rating: i32,
    pub review: String,
    pub ai_response: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_recommended_actions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct RatingDistribution {
    pub star_1: i64,
    pub star_2: i64,
    pub star_3: i64,
    pub star_4: i64,
    pub star_5: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total_feedbacks: i64,
    pub rating_distribution: RatingDistribution,
    pub average_rating: f64,
    pub recent_feedbacks: Vec<Feedback>,
}

// One-row aggregate over the whole feedbacks table.
#[derive(Debug, sqlx::FromRow)]
pub struct RatingTotals {
    pub total: i64,
    pub star_1: i64,
    pub star_2: i64,
    pub star_3: i64,
    pub star_4: i64,
    pub star_5: i64,
    pub average: Option<f64>,
}
