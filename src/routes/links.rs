use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::auth::middleware::AuthUser;
use crate::dto::CreateLinkRequest;
use crate::error::AppError;
use crate::services::LinkService;
use crate::state::AppState;

/// Game/word link routes: `/links/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_link))
        .route("/mine", get(my_links))
        .route("/{game_id}/{word_id}", delete(delete_link))
}

/// `POST /links`
async fn create_link(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(req): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = LinkService::create_link(&state.db, req.game_id, req.word_id, &caller).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// `DELETE /links/{game_id}/{word_id}` (link creator or admin)
async fn delete_link(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path((game_id, word_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    LinkService::delete_link(&state.db, game_id, word_id, &caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /links/mine`
async fn my_links(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let links = LinkService::my_links(&state.db, &caller).await?;
    Ok(Json(links))
}
