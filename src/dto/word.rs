use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::{user, word};

/// POST /api/v1/words
#[derive(Debug, Deserialize)]
pub struct CreateWordRequest {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub game_id: Option<i32>,
}

/// `{game_id, game_name}` pair shown under a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GamePreview {
    pub game_id: i32,
    pub game_name: String,
}

/// A word with its author's username and, for global search and single lookups, up to four
/// linked games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordResponse {
    pub word_id: i32,
    pub word: String,
    pub definition: String,
    pub example: String,
    pub author_id: i32,
    pub author_username: Option<String>,
    pub published: bool,
    pub upvotes: i32,
    pub downvotes: i32,
    pub submit_datetime: DateTime<FixedOffset>,
    pub game_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<GamePreview>>,
}

impl WordResponse {
    #[must_use]
    pub fn new(word: word::Model, author: Option<user::Model>) -> Self {
        Self {
            word_id: word.word_id,
            word: word.word,
            definition: word.definition,
            example: word.example,
            author_id: word.author_id,
            author_username: author.map(|a| a.username),
            published: word.published,
            upvotes: word.upvotes,
            downvotes: word.downvotes,
            submit_datetime: word.submit_datetime,
            game_id: word.game_id,
            games: None,
        }
    }

    #[must_use]
    pub fn with_games(mut self, games: Vec<GamePreview>) -> Self {
        self.games = Some(games);
        self
    }
}
