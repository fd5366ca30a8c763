use serde::{Deserialize, Serialize};

use super::WordResponse;

/// POST /api/v1/links
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub game_id: i32,
    pub word_id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub game_word_id: i32,
    pub game_id: i32,
    pub word: WordResponse,
}
