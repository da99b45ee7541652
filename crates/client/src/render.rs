use crate::models::{AnalyticsResponse, Feedback, RatingDistribution};
use chrono::{DateTime, Local, Utc};

pub fn format_average(average: f64) -> String {
    format!("{:.2}", average)
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

// Blank AI fields are treated the same as absent ones.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

pub fn render_histogram(distribution: &RatingDistribution) -> String {
    let counts = [
        distribution.star_1,
        distribution.star_2,
        distribution.star_3,
        distribution.star_4,
        distribution.star_5,
    ];

    let mut out = String::new();
    for (star, count) in counts.iter().enumerate() {
        out.push_str(&format!("  {}★  {}\n", star + 1, count));
    }
    out
}

pub fn render_feedback_block(feedback: &Feedback) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "[{}★] Review - {}\n",
        feedback.rating,
        format_timestamp(&feedback.created_at)
    ));
    out.push_str(&format!("{}\n", feedback.review));

    if let Some(summary) = non_empty(&feedback.ai_summary) {
        out.push_str(&format!("AI Summary: {}\n", summary));
    }

    if let Some(actions) = non_empty(&feedback.ai_recommended_actions) {
        out.push_str("AI Recommended Actions:\n");
        for line in actions.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    out.push_str(&format!(
        "Updated: {}\n",
        format_timestamp(&feedback.updated_at)
    ));
    out
}

pub fn render_analytics(analytics: &AnalyticsResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total Feedbacks: {}\n", analytics.total_feedbacks));
    out.push_str(&format!(
        "Average Rating: {} ★\n",
        format_average(analytics.average_rating)
    ));
    out.push('\n');
    out.push_str("Rating distribution:\n");
    out.push_str(&render_histogram(&analytics.rating_distribution));
    out.push('\n');
    out.push_str(&format!(
        "Recent Feedbacks (showing last {}):\n",
        analytics.recent_feedbacks.len()
    ));
    for feedback in &analytics.recent_feedbacks {
        out.push_str(&"─".repeat(60));
        out.push('\n');
        out.push_str(&render_feedback_block(feedback));
    }
    out
}

pub fn render_reviews(feedbacks: &[Feedback]) -> String {
    if feedbacks.is_empty() {
        return "No reviews found.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Showing {} reviews:\n", feedbacks.len()));
    for feedback in feedbacks {
        out.push_str(&"─".repeat(60));
        out.push('\n');
        out.push_str(&render_feedback_block(feedback));
    }
    out
}

// Placeholder rows shown while no snapshot is available.
pub fn render_skeleton() -> String {
    let mut out = String::new();
    out.push_str("Total Feedbacks: ░░░\n");
    out.push_str("Average Rating: ░░░░ ★\n");
    out.push('\n');
    out.push_str("Rating distribution:\n");
    for star in 1..=5 {
        out.push_str(&format!("  {}★  ░░\n", star));
    }
    out.push('\n');
    out.push_str("Recent Feedbacks:\n");
    for _ in 0..3 {
        out.push_str("  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░\n");
    }
    out
}
