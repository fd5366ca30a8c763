use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::services::UserService;
use crate::state::AppState;

/// User routes: `/users/...`
pub fn router() -> Router<AppState> {
    Router::new().route("/{user_id}", get(get_public_profile))
}

/// `GET /users/{user_id}`
async fn get_public_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let profile = UserService::profile(&state.db, user_id).await?;
    Ok(Json(profile))
}
