mod ai_service;
mod models;

use ai_service::generate_ai_responses;
use models::*;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use tower_http::cors::CorsLayer;

// ===== App State =====

#[derive(Clone)]
struct AppState {
    db: PgPool,
}

// ===== Main =====

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // Setup database connection
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let state = AppState { db };

    // Build router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/feedbacks/", get(list_feedbacks).post(create_feedback))
        .route("/api/feedbacks/analytics/", get(get_analytics))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ===== Handlers =====

async fn root() -> &'static str {
    "Feedback Collection Backend - Use /health to check status"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    // Check DB connection
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => Json(serde_json::json!({
            "status": "ok",
            "database": "connected"
        })),
        Err(_) => Json(serde_json::json!({
            "status": "error",
            "database": "disconnected"
        })),
    }
}

async fn create_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    validate_feedback(&request).map_err(|message| AppError::BadRequest(message.to_string()))?;

    // Enrichment happens before the insert so the record is stored complete.
    let (ai_response, ai_summary, ai_recommended_actions) =
        generate_ai_responses(request.rating, &request.review)
            .await
            .map_err(AppError::AiService)?;

    let feedback: Feedback = sqlx::query_as(
        "INSERT INTO feedbacks (rating, review, ai_response, ai_summary, ai_recommended_actions)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(request.rating)
    .bind(&request.review)
    .bind(&ai_response)
    .bind(&ai_summary)
    .bind(&ai_recommended_actions)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

async fn list_feedbacks(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, AppError> {
    let feedbacks: Vec<Feedback> =
        sqlx::query_as("SELECT * FROM feedbacks ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(feedbacks))
}

async fn get_analytics(State(state): State<AppState>) -> Result<Json<AnalyticsResponse>, AppError> {
    let totals: RatingTotals = sqlx::query_as(
        r#"
        SELECT
            COUNT(*) as total,
            COUNT(CASE WHEN rating = 1 THEN 1 END) as star_1,
            COUNT(CASE WHEN rating = 2 THEN 1 END) as star_2,
            COUNT(CASE WHEN rating = 3 THEN 1 END) as star_3,
            COUNT(CASE WHEN rating = 4 THEN 1 END) as star_4,
            COUNT(CASE WHEN rating = 5 THEN 1 END) as star_5,
            AVG(rating::float8) as average
        FROM feedbacks
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    let recent_feedbacks: Vec<Feedback> =
        sqlx::query_as("SELECT * FROM feedbacks ORDER BY created_at DESC LIMIT 10")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(AnalyticsResponse {
        total_feedbacks: totals.total,
        rating_distribution: RatingDistribution {
            star_1: totals.star_1,
            star_2: totals.star_2,
            star_3: totals.star_3,
            star_4: totals.star_4,
            star_5: totals.star_5,
        },
        average_rating: round_to_two_decimals(totals.average.unwrap_or(0.0)),
        recent_feedbacks,
    }))
}

// ===== Validation =====

fn validate_feedback(request: &FeedbackRequest) -> Result<(), &'static str> {
    if !(1..=5).contains(&request.rating) {
        return Err("rating must be between 1 and 5");
    }
    if request.review.trim().is_empty() {
        return Err("review must not be empty");
    }
    Ok(())
}

fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ===== Error Handling =====

enum AppError {
    BadRequest(String),
    Database(sqlx::Error),
    AiService(anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::AiService(err) => {
                tracing::error!("AI service error: {:?}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate responses from the AI service".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
