//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and the store handle.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{CourseService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Course and enrollment service
    pub course_service: Arc<dyn CourseService>,
    /// User and student service
    pub user_service: Arc<dyn UserService>,
    /// Store handle, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state with services backed by `database`.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());

        Self {
            course_service: container.courses(),
            user_service: container.users(),
            database,
        }
    }
}
