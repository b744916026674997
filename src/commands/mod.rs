//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod inspect;
pub mod migrate;
pub mod serve;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Open the store for an administrative command, leaving the schema untouched
async fn open_admin_store(config: &Config) -> AppResult<Database> {
    Database::connect_without_migrations(config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))
}
