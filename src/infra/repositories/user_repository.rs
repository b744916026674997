//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::student::Entity as StudentEntity;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges, UserWithProfile};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID together with its student profile
    async fn find_with_profile(&self, id: i32) -> AppResult<Option<UserWithProfile>>;

    /// List all users with their student profiles
    async fn list_with_profiles(&self) -> AppResult<Vec<UserWithProfile>>;

    /// Apply a partial update; `None` when the user does not exist
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>>;

    /// Delete user (profile cascades); `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Insert a user row on any connection (plain or transactional).
pub(crate) async fn insert_user<C: ConnectionTrait>(db: &C, input: &NewUser) -> AppResult<User> {
    let now = chrono::Utc::now();
    let active_model = ActiveModel {
        email: Set(input.email.clone()),
        password_hash: Set(input.password_hash.clone()),
        name: Set(input.name.clone()),
        phone: Set(input.phone.clone()),
        is_active: Set(true),
        is_student: Set(input.is_student),
        is_teacher: Set(input.is_teacher),
        is_admin: Set(input.is_admin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = active_model.insert(db).await?;
    Ok(User::from(model))
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_with_profile(&self, id: i32) -> AppResult<Option<UserWithProfile>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(StudentEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(user, student)| UserWithProfile {
            user: user.into(),
            student_profile: student.map(Into::into),
        }))
    }

    async fn list_with_profiles(&self) -> AppResult<Vec<UserWithProfile>> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .find_also_related(StudentEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(user, student)| UserWithProfile {
                user: user.into(),
                student_profile: student.map(Into::into),
            })
            .collect())
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>> {
        let Some(user) = UserEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = user.into();

        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_student) = changes.is_student {
            active.is_student = Set(is_student);
        }
        if let Some(is_teacher) = changes.is_teacher {
            active.is_teacher = Set(is_teacher);
        }
        if let Some(is_admin) = changes.is_admin {
            active.is_admin = Set(is_admin);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(User::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
