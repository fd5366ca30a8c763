mod flags;
mod games;
mod health;
mod links;
mod stats;
mod users;
mod words;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health`: liveness with database ping
/// - `/api/v1/...`: health, stats, games, words, links, flags, users
pub fn router() -> Router<AppState> {
    let api_v1 = Router::new()
        .merge(health::api_router())
        .nest("/stats", stats::router())
        .nest("/games", games::router())
        .nest("/words", words::router())
        .nest("/links", links::router())
        .nest("/flags", flags::router())
        .nest("/users", users::router());

    Router::new()
        .merge(health::root_router())
        .nest("/api/v1", api_v1)
}
