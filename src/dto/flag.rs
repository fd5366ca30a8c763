use serde::{Deserialize, Serialize};

/// POST /api/v1/flags
#[derive(Debug, Clone, Deserialize)]
pub struct FlagRequest {
    pub content_type: String,
    pub content_id: Option<i32>,
    pub description: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlagResponse {
    pub message: String,
}
