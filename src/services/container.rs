//! Service Container - Centralized service access.
//!
//! Handlers depend on the service traits; the container wires them to the
//! SeaORM-backed Unit of Work.

use std::sync::Arc;

use super::{CourseManager, CourseService, UserManager, UserService};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get course and enrollment service
    fn courses(&self) -> Arc<dyn CourseService>;

    /// Get user and student service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    course_service: Arc<dyn CourseService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create service container from database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            course_service: Arc::new(CourseManager::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
