//! Course repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::{Course, CourseChanges, NewCourse};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List all courses, newest first
    async fn list(&self) -> AppResult<Vec<Course>>;

    /// Find course by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>>;

    /// Find course by exact code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Course>>;

    /// Insert a new course
    async fn create(&self, input: NewCourse) -> AppResult<Course>;

    /// Apply a partial update; `None` when the course does not exist
    async fn update(&self, id: i32, changes: CourseChanges) -> AppResult<Option<Course>>;

    /// Delete course; `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_desc(course::Column::CreatedAt)
            .order_by_desc(course::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Course::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Course>> {
        let result = CourseEntity::find()
            .filter(course::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        Ok(result.map(Course::from))
    }

    async fn create(&self, input: NewCourse) -> AppResult<Course> {
        let credits = input.credits_or_default();
        let active_model = ActiveModel {
            name: Set(input.name),
            code: Set(input.code),
            description: Set(input.description),
            credits: Set(credits),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Course::from(model))
    }

    async fn update(&self, id: i32, changes: CourseChanges) -> AppResult<Option<Course>> {
        let Some(course) = CourseEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let original = course.clone();
        let mut active: ActiveModel = course.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(code) = changes.code {
            active.code = Set(code);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(credits) = changes.credits {
            active.credits = Set(credits);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }

        if !active.is_changed() {
            return Ok(Some(Course::from(original)));
        }

        let model = active.update(&self.db).await?;
        Ok(Some(Course::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = CourseEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
