use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Serialize)]
pub struct FeedbackRequest {
    pub rating: i32,
    pub review: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingDistribution {
    pub star_1: i64,
    pub star_2: i64,
    pub star_3: i64,
    pub star_4: i64,
    pub star_5: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsResponse {
    pub total_feedbacks: i64,
    pub rating_distribution: RatingDistribution,
    pub average_rating: f64,
    pub recent_feedbacks: Vec<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_without_ai_fields_deserializes() {
        let payload = r#"{
            "id": 3,
            "rating": 4,
            "review": "Pretty good overall.",
            "ai_response": null,
            "ai_summary": null,
            "ai_recommended_actions": null,
            "created_at": "2026-08-01T10:30:00Z",
            "updated_at": "2026-08-01T10:30:00Z"
        }"#;

        let feedback: Feedback = serde_json::from_str(payload).unwrap();
        assert_eq!(feedback.rating, 4);
        assert!(feedback.ai_summary.is_none());
        assert!(feedback.ai_recommended_actions.is_none());
    }

    #[test]
    fn analytics_snapshot_deserializes() {
        let payload = r#"{
            "total_feedbacks": 2,
            "rating_distribution": {
                "star_1": 0, "star_2": 0, "star_3": 1, "star_4": 0, "star_5": 1
            },
            "average_rating": 4.0,
            "recent_feedbacks": [{
                "id": 1,
                "rating": 5,
                "review": "Loved it",
                "ai_response": "Thanks!",
                "ai_summary": "Very positive.",
                "ai_recommended_actions": "- Keep it up",
                "created_at": "2026-08-01T10:30:00Z",
                "updated_at": "2026-08-01T10:30:00Z"
            }]
        }"#;

        let analytics: AnalyticsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(analytics.total_feedbacks, 2);
        assert_eq!(analytics.rating_distribution.star_3, 1);
        assert_eq!(analytics.recent_feedbacks.len(), 1);
    }
}
