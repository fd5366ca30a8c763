//! Content flags raised by readers.
//!
//! A flag is assembled into a [`FlagRecord`] and handed to a [`FlagNotifier`]. Delivery (mail,
//! ticketing) lives outside this crate; the default notifier only logs.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::auth::Caller;
use crate::dto::FlagRequest;
use crate::error::AppError;
use crate::repository::{GameRepository, LinkRepository, WordRepository};

/// What a flag points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagContentType {
    Word,
    Game,
    Link,
    Other,
}

impl FlagContentType {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "word" => Ok(Self::Word),
            "game" => Ok(Self::Game),
            "link" => Ok(Self::Link),
            "other" => Ok(Self::Other),
            _ => Err(AppError::BadRequest(
                "content_type must be one of 'word', 'game', 'link' or 'other'.".to_string(),
            )),
        }
    }
}

/// A flag ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct FlagRecord {
    pub content_type: FlagContentType,
    pub content_id: Option<i32>,
    pub description: Option<String>,
    pub reason: String,
    /// Username of the reporter, or `None` when anonymous.
    pub reporting_user: Option<String>,
    /// Snapshot of the flagged row at the time of the report.
    pub content: Option<JsonValue>,
}

/// Delivers assembled flags to moderators.
#[async_trait]
pub trait FlagNotifier: Send + Sync {
    async fn notify(&self, flag: &FlagRecord) -> anyhow::Result<()>;
}

/// Emits each flag as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl FlagNotifier for LogNotifier {
    async fn notify(&self, flag: &FlagRecord) -> anyhow::Result<()> {
        let content = flag
            .content
            .as_ref()
            .map(JsonValue::to_string)
            .unwrap_or_default();
        tracing::warn!(
            content_type = ?flag.content_type,
            content_id = ?flag.content_id,
            reporting_user = flag.reporting_user.as_deref().unwrap_or("anonymous"),
            reason = %flag.reason,
            description = flag.description.as_deref().unwrap_or_default(),
            %content,
            "Content flagged"
        );
        Ok(())
    }
}

pub struct FlagService;

impl FlagService {
    /// Validate a flag, attach the flagged row and pass it to `notifier`.
    pub async fn flag_content<C: ConnectionTrait>(
        db: &C,
        notifier: &dyn FlagNotifier,
        request: FlagRequest,
        reporter: Option<&Caller>,
    ) -> Result<FlagRecord, AppError> {
        let content_type = FlagContentType::parse(&request.content_type)?;
        let reason = request
            .reason
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("reason is required".to_string()))?;
        let description = request.description.filter(|d| !d.trim().is_empty());

        let content = match content_type {
            FlagContentType::Word => {
                let id = require_id(request.content_id)?;
                let word = WordRepository::find_any(db, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Word", id))?;
                Some(to_json(&word)?)
            }
            FlagContentType::Game => {
                let id = require_id(request.content_id)?;
                let game = GameRepository::find_any(db, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Game", id))?;
                Some(to_json(&game)?)
            }
            FlagContentType::Link => {
                let id = require_id(request.content_id)?;
                let link = LinkRepository::find_by_id(db, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Link", id))?;
                Some(to_json(&link)?)
            }
            FlagContentType::Other => {
                if description.is_none() {
                    return Err(AppError::BadRequest(
                        "description is required when content_type is 'other'".to_string(),
                    ));
                }
                None
            }
        };

        let record = FlagRecord {
            content_type,
            content_id: request.content_id,
            description,
            reason,
            reporting_user: reporter.map(|c| c.username.clone()),
            content,
        };

        notifier.notify(&record).await?;
        Ok(record)
    }
}

fn require_id(content_id: Option<i32>) -> Result<i32, AppError> {
    content_id.ok_or_else(|| AppError::BadRequest("content_id is required".to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize flagged row: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_content_types() {
        assert_eq!(FlagContentType::parse("word").ok(), Some(FlagContentType::Word));
        assert_eq!(FlagContentType::parse("other").ok(), Some(FlagContentType::Other));
        assert!(FlagContentType::parse("Word").is_err());
    }
}
