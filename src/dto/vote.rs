use serde::{Deserialize, Serialize};

/// POST /api/v1/words/vote
///
/// Actions are kept as raw strings so an unknown value can be reported against its field.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub word_id: i32,
    pub upvote_action: Option<String>,
    pub downvote_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteResponse {
    pub word_id: i32,
    pub upvotes: i32,
    pub downvotes: i32,
}
