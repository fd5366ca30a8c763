use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::middleware::AuthUser;
use crate::dto::SearchQuery;
use crate::error::AppError;
use crate::repository::{GameUpdate, NewGame};
use crate::services::{GameService, RandomService, SearchService};
use crate::state::AppState;

/// Game routes: `/games/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/search", get(search_games))
        .route("/random", get(random_game))
        .route(
            "/{game_id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/{game_id}/words/search", get(search_game_words))
}

/// `GET /games/search?startsWith=&name=&offset=&limit=`
async fn search_games(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let games = SearchService::search_games(&state.db, &query).await?;
    Ok(Json(games))
}

/// `GET /games/random`
async fn random_game(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let game = RandomService::random_game(&state.db, state.row_counts.as_ref()).await?;
    Ok(Json(game))
}

/// `POST /games`
async fn create_game(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(req): Json<NewGame>,
) -> Result<impl IntoResponse, AppError> {
    let game = GameService::create_game(&state.db, &caller, req).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// `GET /games/{game_id}`
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let game = SearchService::game_detail(&state.db, game_id).await?;
    Ok(Json(game))
}

/// `PUT /games/{game_id}`
async fn update_game(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(game_id): Path<i32>,
    Json(req): Json<GameUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let game = GameService::update_game(&state.db, &caller, game_id, req).await?;
    Ok(Json(game))
}

/// `DELETE /games/{game_id}` (admin only)
async fn delete_game(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    GameService::delete_game(&state.db, &caller, game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /games/{game_id}/words/search?startsWith=|word=&offset=&limit=`
async fn search_game_words(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let result = SearchService::search_game_words(&state.db, game_id, &query).await?;
    Ok(Json(result))
}
