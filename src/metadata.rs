//! Approximate row counts supplied by the metadata job.
//!
//! A scheduled job writes `{"word_count": N, "game_count": M}` to a JSON file. The random
//! discovery endpoints and `/stats` read it on every call; nothing here caches the values.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Approximate total row counts (active and inactive rows alike).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    pub word_count: Option<u64>,
    pub game_count: Option<u64>,
}

/// Source of approximate row counts.
#[async_trait]
pub trait RowCountSource: Send + Sync {
    /// Current counts. Missing or unreadable metadata yields `None` fields.
    async fn row_counts(&self) -> RowCounts;
}

/// Reads counts from the JSON file maintained by the metadata job.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    path: PathBuf,
}

impl MetadataFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RowCountSource for MetadataFile {
    async fn row_counts(&self) -> RowCounts {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "Metadata file unavailable: {e}");
                return RowCounts::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), "Malformed metadata file: {e}");
            RowCounts::default()
        })
    }
}

/// Fixed counts, for deployments without a metadata job.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCounts(pub RowCounts);

#[async_trait]
impl RowCountSource for StaticCounts {
    async fn row_counts(&self) -> RowCounts {
        self.0
    }
}
