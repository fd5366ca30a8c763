use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::middleware::AuthUser;
use crate::dto::{CreateWordRequest, SearchQuery, VoteRequest};
use crate::error::AppError;
use crate::repository::WordUpdate;
use crate::services::{RandomService, SearchService, VoteService, WordService};
use crate::state::AppState;

/// Word routes: `/words/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_word))
        .route("/search", get(search_words))
        .route("/random", get(random_words))
        .route("/mine", get(my_words))
        .route("/vote", post(vote))
        .route(
            "/{word_id}",
            get(get_word).put(update_word).delete(delete_word),
        )
}

/// `GET /words/search?startsWith=|word=&author=&game_id=&offset=&limit=`
async fn search_words(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let words = SearchService::search_words(&state.db, &query).await?;
    Ok(Json(words))
}

/// `GET /words/random`
async fn random_words(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let words = RandomService::random_words(&state.db, state.row_counts.as_ref()).await?;
    Ok(Json(words))
}

/// `GET /words/mine`
async fn my_words(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let words = WordService::my_words(&state.db, &caller).await?;
    Ok(Json(words))
}

/// `POST /words`
async fn create_word(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(req): Json<CreateWordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let word = WordService::create_word(&state.db, &caller, req).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// `POST /words/vote`
async fn vote(
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let counters = VoteService::apply_vote(&state.db, &req).await?;
    Ok(Json(counters))
}

/// `GET /words/{word_id}`
async fn get_word(
    State(state): State<AppState>,
    Path(word_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let word = SearchService::word_detail(&state.db, word_id).await?;
    Ok(Json(word))
}

/// `PUT /words/{word_id}` (author or admin)
async fn update_word(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(word_id): Path<i32>,
    Json(req): Json<WordUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let word = WordService::update_word(&state.db, &caller, word_id, req).await?;
    Ok(Json(word))
}

/// `DELETE /words/{word_id}` (author or admin)
async fn delete_word(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(word_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    WordService::delete_word(&state.db, &caller, word_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
