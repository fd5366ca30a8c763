mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;

use gamedict_api::error::AppError;
use gamedict_api::metadata::{RowCounts, StaticCounts};
use gamedict_api::services::RandomService;

use common::{
    deactivate_game, deactivate_word, get, seed_game, seed_link, seed_user, seed_word, setup_db,
    test_app, test_app_with,
};

fn no_counts() -> StaticCounts {
    StaticCounts(RowCounts::default())
}

#[tokio::test]
async fn fewer_than_seven_active_words_returns_all_of_them() {
    let db = setup_db().await;
    let author = seed_user(&db, "author").await;
    let mut active = HashSet::new();
    for i in 0..10 {
        let word = seed_word(&db, &author, &format!("word{i}")).await;
        if i % 2 == 0 {
            deactivate_word(&db, word.word_id).await;
        } else {
            active.insert(word.word_id);
        }
    }

    let words = RandomService::random_words(&db, &no_counts())
        .await
        .unwrap_or_default();

    let drawn: HashSet<i32> = words.iter().map(|w| w.word_id).collect();
    assert_eq!(words.len(), 5);
    assert_eq!(drawn, active);
}

#[tokio::test]
async fn draws_seven_distinct_active_words() {
    let db = setup_db().await;
    let author = seed_user(&db, "author").await;
    for i in 0..40 {
        seed_word(&db, &author, &format!("word{i}")).await;
    }

    for _ in 0..5 {
        let words = RandomService::random_words(&db, &no_counts())
            .await
            .unwrap_or_default();
        let distinct: HashSet<i32> = words.iter().map(|w| w.word_id).collect();
        assert_eq!(words.len(), 7);
        assert_eq!(distinct.len(), 7);
        assert!(words.iter().all(|w| w.author_username.as_deref() == Some("author")));
    }
}

#[tokio::test]
async fn no_active_words_is_not_found() {
    let db = setup_db().await;
    let result = RandomService::random_words(&db, &no_counts()).await;
    assert!(matches!(result, Err(AppError::NotFound { entity: "Word", .. })));

    let author = seed_user(&db, "author").await;
    let word = seed_word(&db, &author, "gone").await;
    deactivate_word(&db, word.word_id).await;

    let app = test_app(&db);
    let (status, _) = get(&app, "/api/v1/words/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn approximate_count_bounds_the_window() {
    let db = setup_db().await;
    let author = seed_user(&db, "author").await;
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(seed_word(&db, &author, &format!("word{i}")).await.word_id);
    }

    // A stale count of 2 confines the draw to the first two rows.
    let counts = StaticCounts(RowCounts {
        word_count: Some(2),
        game_count: None,
    });
    let words = RandomService::random_words(&db, &counts)
        .await
        .unwrap_or_default();

    let drawn: HashSet<i32> = words.iter().map(|w| w.word_id).collect();
    let expected: HashSet<i32> = ids[..2].iter().copied().collect();
    assert_eq!(drawn, expected);
}

#[tokio::test]
async fn random_game_skips_inactive_rows() {
    let db = setup_db().await;
    let author = seed_user(&db, "author").await;
    for name in ["Old 1", "Old 2", "Old 3"] {
        let game = seed_game(&db, name, None).await;
        deactivate_game(&db, game).await;
    }
    let live = seed_game(&db, "Rocket League", Some("Psyonix")).await;
    let whiff = seed_word(&db, &author, "whiff").await;
    seed_link(&db, live.game_id, whiff.word_id, author.user_id).await;

    for _ in 0..5 {
        let game = RandomService::random_game(&db, &no_counts()).await.ok();
        assert_eq!(game.as_ref().map(|g| g.game.game_id), Some(live.game_id));
        assert_eq!(game.map(|g| g.words.len()), Some(1));
    }
}

#[tokio::test]
async fn random_game_with_only_inactive_rows_is_not_found() {
    let db = setup_db().await;
    let game = seed_game(&db, "Abandoned", None).await;
    deactivate_game(&db, game).await;

    let counts = RowCounts {
        word_count: None,
        game_count: Some(1),
    };
    let app = test_app_with(&db, counts, Arc::default());
    let (status, body) = get(&app, "/api/v1/games/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::error_code(&body), "NOT_FOUND");
}
