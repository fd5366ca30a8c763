use serde::Serialize;

use super::WordResponse;
use crate::entities::game;

/// `{word_id, word}` pair shown under a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordPreview {
    pub word_id: i32,
    pub word: String,
}

/// A game without its words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_id: i32,
    pub game_name: String,
    pub developer: Option<String>,
    pub image_url: Option<String>,
    pub wiki_url: Option<String>,
}

impl From<game::Model> for GameSummary {
    fn from(game: game::Model) -> Self {
        Self {
            game_id: game.game_id,
            game_name: game.game_name,
            developer: game.developer,
            image_url: game.image_url,
            wiki_url: game.wiki_url,
        }
    }
}

/// A game with up to four preview words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResponse {
    #[serde(flatten)]
    pub game: GameSummary,
    pub words: Vec<WordPreview>,
}

/// `GET /games/{game_id}/words/search` result.
#[derive(Debug, Clone, Serialize)]
pub struct GameWordsResponse {
    pub game: GameSummary,
    pub words: Vec<WordResponse>,
}
