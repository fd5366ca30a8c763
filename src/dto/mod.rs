//! Request and response bodies for the JSON API.

pub mod flag;
pub mod game;
pub mod link;
pub mod vote;
pub mod word;

pub use flag::{FlagRequest, FlagResponse};
pub use game::{GameResponse, GameSummary, GameWordsResponse, WordPreview};
pub use link::{CreateLinkRequest, LinkResponse};
pub use vote::{VoteRequest, VoteResponse};
pub use word::{CreateWordRequest, GamePreview, WordResponse};

use serde::{Deserialize, Serialize};

/// Query string shared by the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "startsWith")]
    pub starts_with: Option<String>,
    pub name: Option<String>,
    pub word: Option<String>,
    pub author: Option<String>,
    pub game_id: Option<i32>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /api/v1/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsResponse {
    pub game_count: u64,
    pub word_count: u64,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: i32,
    pub username: String,
    pub words: Vec<WordResponse>,
}
