use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::metadata::RowCountSource;
use crate::services::flag_service::FlagNotifier;

/// Shared application state available to all request handlers via Axum's `State` extractor.
///
/// Holds no mutable data of its own: the database is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub row_counts: Arc<dyn RowCountSource>,
    pub flag_notifier: Arc<dyn FlagNotifier>,
}
