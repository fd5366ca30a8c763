use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(stats))
}

/// `GET /stats`: approximate counts from the metadata job.
async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let counts = state.row_counts.row_counts().await;
    match (counts.game_count, counts.word_count) {
        (Some(game_count), Some(word_count)) => Ok(Json(StatsResponse {
            game_count,
            word_count,
        })),
        _ => Err(AppError::BadRequest("Metadata not available.".to_string())),
    }
}
