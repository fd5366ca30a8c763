#![allow(dead_code, clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use serde_json::Value;
use tower::ServiceExt;

use gamedict_api::auth::jwt::encode_access_token;
use gamedict_api::config::{Config, Environment};
use gamedict_api::entities::{game, user, word};
use gamedict_api::metadata::{RowCounts, StaticCounts};
use gamedict_api::repository::{
    GameRepository, LinkRepository, NewGame, NewUser, NewWord, UserRepository, WordRepository,
};
use gamedict_api::services::{FlagNotifier, FlagRecord};
use gamedict_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Fresh in-memory database with all migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    gamedict_api::db::connect_and_migrate("sqlite::memory:")
        .await
        .unwrap_or_default()
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        metadata_path: "metadata.json".into(),
        frontend_url: "http://localhost:3001".to_string(),
    }
}

/// Collects flags instead of delivering them.
#[derive(Default)]
pub struct RecordingNotifier {
    pub flags: Mutex<Vec<FlagRecord>>,
}

impl RecordingNotifier {
    pub fn recorded(&self) -> Vec<FlagRecord> {
        self.flags.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FlagNotifier for RecordingNotifier {
    async fn notify(&self, flag: &FlagRecord) -> anyhow::Result<()> {
        if let Ok(mut flags) = self.flags.lock() {
            flags.push(flag.clone());
        }
        Ok(())
    }
}

pub fn test_state(
    db: DatabaseConnection,
    counts: RowCounts,
    notifier: Arc<RecordingNotifier>,
) -> AppState {
    AppState {
        db,
        config: test_config(),
        row_counts: Arc::new(StaticCounts(counts)),
        flag_notifier: notifier,
    }
}

/// Router over `db` with no metadata counts.
pub fn test_app(db: &DatabaseConnection) -> Router {
    test_app_with(db, RowCounts::default(), Arc::default())
}

pub fn test_app_with(
    db: &DatabaseConnection,
    counts: RowCounts,
    notifier: Arc<RecordingNotifier>,
) -> Router {
    gamedict_api::routes::router().with_state(test_state(db.clone(), counts, notifier))
}

// ──────────────────────────────────────────────────────────────────────────────
// Seeding
// ──────────────────────────────────────────────────────────────────────────────

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> user::Model {
    UserRepository::create(
        db,
        NewUser {
            username: username.to_string(),
            password: "$argon2id$placeholder".to_string(),
        },
    )
    .await
    .unwrap_or_else(|e| panic!("seed user {username}: {e}"))
}

pub async fn seed_game(db: &DatabaseConnection, name: &str, developer: Option<&str>) -> game::Model {
    GameRepository::create(
        db,
        NewGame {
            game_name: name.to_string(),
            developer: developer.map(str::to_string),
            image_url: None,
            wiki_url: None,
        },
    )
    .await
    .unwrap_or_else(|e| panic!("seed game {name}: {e}"))
}

pub async fn seed_word(db: &DatabaseConnection, author: &user::Model, term: &str) -> word::Model {
    WordRepository::create(
        db,
        NewWord {
            word: term.to_string(),
            definition: format!("Definition of {term}"),
            example: format!("Example using {term}"),
            author_id: author.user_id,
            game_id: None,
        },
    )
    .await
    .unwrap_or_else(|e| panic!("seed word {term}: {e}"))
}

pub async fn seed_link(db: &DatabaseConnection, game_id: i32, word_id: i32, user_id: i32) {
    LinkRepository::create(db, game_id, word_id, user_id)
        .await
        .unwrap_or_else(|e| panic!("seed link {game_id}/{word_id}: {e}"));
}

pub async fn deactivate_word(db: &DatabaseConnection, word_id: i32) {
    WordRepository::soft_delete(db, word_id)
        .await
        .unwrap_or_else(|e| panic!("deactivate word {word_id}: {e}"));
}

pub async fn deactivate_game(db: &DatabaseConnection, game: game::Model) {
    let mut active = game.into_active_model();
    active.is_active = Set(false);
    active
        .update(db)
        .await
        .unwrap_or_else(|e| panic!("deactivate game: {e}"));
}

pub fn token_for(user: &user::Model, is_admin: bool) -> String {
    encode_access_token(user.user_id, &user.username, is_admin, TEST_SECRET, 900)
        .unwrap_or_default()
}

// ──────────────────────────────────────────────────────────────────────────────
// HTTP
// ──────────────────────────────────────────────────────────────────────────────

/// Send a request and return (status, parsed JSON body or `Null`).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap_or_default();

    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_with_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_with_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// The `error.code` of an error body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
