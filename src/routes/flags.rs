use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::auth::middleware::OptionalAuth;
use crate::dto::{FlagRequest, FlagResponse};
use crate::error::AppError;
use crate::services::FlagService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(flag_content))
}

/// `POST /flags`: anonymous reports are accepted.
async fn flag_content(
    State(state): State<AppState>,
    OptionalAuth(caller): OptionalAuth,
    Json(req): Json<FlagRequest>,
) -> Result<impl IntoResponse, AppError> {
    FlagService::flag_content(
        &state.db,
        state.flag_notifier.as_ref(),
        req,
        caller.as_ref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(FlagResponse {
            message: "Flag received.".to_string(),
        }),
    ))
}
