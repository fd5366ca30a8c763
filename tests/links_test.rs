mod common;

use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use gamedict_api::entities::{game_word, game_word_author};
use gamedict_api::repository::LinkRepository;

use common::{
    deactivate_word, delete_with_auth, get_with_auth, post_json, post_json_with_auth, seed_game,
    seed_link, seed_user, seed_word, setup_db, test_app, token_for,
};

#[tokio::test]
async fn create_link_records_attribution() {
    let db = setup_db().await;
    let user = seed_user(&db, "linker").await;
    let game = seed_game(&db, "Overwatch", Some("Blizzard")).await;
    let word = seed_word(&db, &user, "dive").await;
    let app = test_app(&db);

    let (status, body) = post_json_with_auth(
        &app,
        "/api/v1/links",
        &token_for(&user, false),
        &json!({ "game_id": game.game_id, "word_id": word.word_id }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["word"]["word"], "dive");

    let link = LinkRepository::find(&db, game.game_id, word.word_id)
        .await
        .ok()
        .flatten();
    assert!(link.is_some());
    let attribution = match &link {
        Some(link) => LinkRepository::find_attribution(&db, link).await.ok().flatten(),
        None => None,
    };
    assert_eq!(attribution.map(|a| a.user_id), Some(user.user_id));
}

#[tokio::test]
async fn create_link_requires_auth() {
    let db = setup_db().await;
    let app = test_app(&db);

    let (status, _) = post_json(&app, "/api/v1/links", &json!({ "game_id": 1, "word_id": 1 })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_link_is_a_conflict_and_leaves_one_row() {
    let db = setup_db().await;
    let user = seed_user(&db, "linker").await;
    let game = seed_game(&db, "Valorant", Some("Riot")).await;
    let word = seed_word(&db, &user, "lurk").await;
    let app = test_app(&db);
    let token = token_for(&user, false);
    let body = json!({ "game_id": game.game_id, "word_id": word.word_id });

    let (first, _) = post_json_with_auth(&app, "/api/v1/links", &token, &body).await;
    let (second, err) = post_json_with_auth(&app, "/api/v1/links", &token, &body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(common::error_code(&err), "CONFLICT");
    assert_eq!(game_word::Entity::find().count(&db).await.ok(), Some(1));
    assert_eq!(game_word_author::Entity::find().count(&db).await.ok(), Some(1));
}

#[tokio::test]
async fn unique_index_rejects_duplicate_insert() {
    let db = setup_db().await;
    let user = seed_user(&db, "linker").await;
    let game = seed_game(&db, "Apex Legends", Some("Respawn")).await;
    let word = seed_word(&db, &user, "third party").await;
    seed_link(&db, game.game_id, word.word_id, user.user_id).await;

    let again = LinkRepository::create(&db, game.game_id, word.word_id, user.user_id).await;
    assert!(matches!(again, Err(gamedict_api::error::AppError::Conflict(_))));
}

#[tokio::test]
async fn linking_inactive_word_is_not_found() {
    let db = setup_db().await;
    let user = seed_user(&db, "linker").await;
    let game = seed_game(&db, "Fortnite", Some("Epic")).await;
    let word = seed_word(&db, &user, "cranking").await;
    deactivate_word(&db, word.word_id).await;
    let app = test_app(&db);

    let (status, body) = post_json_with_auth(
        &app,
        "/api/v1/links",
        &token_for(&user, false),
        &json!({ "game_id": game.game_id, "word_id": word.word_id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        format!("Word with ID {} not found.", word.word_id)
    );
}

#[tokio::test]
async fn only_creator_or_admin_may_delete_link() {
    let db = setup_db().await;
    let owner = seed_user(&db, "owner").await;
    let stranger = seed_user(&db, "stranger").await;
    let admin = seed_user(&db, "admin").await;
    let game = seed_game(&db, "Dota 2", Some("Valve")).await;
    let first = seed_word(&db, &owner, "creep").await;
    let second = seed_word(&db, &owner, "deny").await;
    seed_link(&db, game.game_id, first.word_id, owner.user_id).await;
    seed_link(&db, game.game_id, second.word_id, owner.user_id).await;
    let app = test_app(&db);

    let first_uri = format!("/api/v1/links/{}/{}", game.game_id, first.word_id);
    let second_uri = format!("/api/v1/links/{}/{}", game.game_id, second.word_id);

    let (status, _) = delete_with_auth(&app, &first_uri, &token_for(&stranger, false)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete_with_auth(&app, &first_uri, &token_for(&owner, false)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = delete_with_auth(&app, &second_uri, &token_for(&admin, true)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(game_word::Entity::find().count(&db).await.ok(), Some(0));
    assert_eq!(game_word_author::Entity::find().count(&db).await.ok(), Some(0));

    let (status, _) = delete_with_auth(&app, &first_uri, &token_for(&owner, false)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn my_links_lists_only_active_endpoints() {
    let db = setup_db().await;
    let user = seed_user(&db, "linker").await;
    let other = seed_user(&db, "other").await;
    let game = seed_game(&db, "StarCraft II", Some("Blizzard")).await;
    let macro_word = seed_word(&db, &user, "macro").await;
    let micro = seed_word(&db, &user, "micro").await;
    let cheese = seed_word(&db, &other, "cheese").await;
    seed_link(&db, game.game_id, macro_word.word_id, user.user_id).await;
    seed_link(&db, game.game_id, micro.word_id, user.user_id).await;
    seed_link(&db, game.game_id, cheese.word_id, other.user_id).await;
    deactivate_word(&db, micro.word_id).await;
    let app = test_app(&db);

    let (status, body) = get_with_auth(&app, "/api/v1/links/mine", &token_for(&user, false)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body,
        json!([{
            "game_word_id": 1,
            "game_id": game.game_id,
            "game_name": "StarCraft II",
            "word_id": macro_word.word_id,
            "word": "macro",
        }])
    );
}
