//! User service - Accounts and student profiles.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::MSG_USER_NOT_FOUND;
use crate::domain::{
    DeletedUser, DomainError, NewUser, StudentChanges, StudentWithUser, UserChanges,
    UserWithProfile,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users with their student profiles
    async fn list_users(&self) -> AppResult<Vec<UserWithProfile>>;

    /// User with its student profile; `None` when absent
    async fn get_user(&self, id: i32) -> AppResult<Option<UserWithProfile>>;

    /// Create a user, and its student profile in the same transaction
    async fn create_user(&self, input: NewUser) -> AppResult<UserWithProfile>;

    /// Partial update of a user
    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<UserWithProfile>;

    /// Delete a user together with its profile and enrollments
    async fn delete_user(&self, id: i32) -> AppResult<DeletedUser>;

    /// List all student profiles with their owning user
    async fn list_students(&self) -> AppResult<Vec<StudentWithUser>>;

    /// Partial update of a student profile
    async fn update_student(&self, id: i32, changes: StudentChanges)
        -> AppResult<StudentWithUser>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn user_not_found() -> AppError {
        AppError::NotFound(MSG_USER_NOT_FOUND.to_string())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> AppResult<()> {
        match self.uow.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::DuplicateEmail.into()),
            _ => Ok(()),
        }
    }

    async fn ensure_student_code_free(&self, code: &str, owner: Option<i32>) -> AppResult<()> {
        match self.uow.students().find_by_code(code).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(DomainError::DuplicateStudentCode.into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<UserWithProfile>> {
        self.uow.users().list_with_profiles().await
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<UserWithProfile>> {
        self.uow.users().find_with_profile(id).await
    }

    async fn create_user(&self, input: NewUser) -> AppResult<UserWithProfile> {
        self.ensure_email_free(&input.email, None).await?;
        if let Some(code) = input.student_profile_code() {
            self.ensure_student_code_free(code, None).await?;
        }

        let created = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let user = ctx
                        .users()
                        .create(&input)
                        .await
                        .map_err(|e| e.on_unique_violation(DomainError::DuplicateEmail))?;

                    let student_profile = match input.student_profile_code() {
                        Some(code) => Some(
                            ctx.students()
                                .create(user.id, code)
                                .await
                                .map_err(|e| {
                                    e.on_unique_violation(DomainError::DuplicateStudentCode)
                                })?,
                        ),
                        None => None,
                    };

                    Ok(UserWithProfile {
                        user,
                        student_profile,
                    })
                })
            })
            .await?;

        tracing::info!(
            user_id = created.user.id,
            with_profile = created.student_profile.is_some(),
            "User created"
        );
        Ok(created)
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<UserWithProfile> {
        if let Some(email) = changes.email.as_deref() {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let users = self.uow.users();
        users
            .update(id, changes)
            .await
            .map_err(|e| e.on_unique_violation(DomainError::DuplicateEmail))?
            .ok_or_else(Self::user_not_found)?;

        users
            .find_with_profile(id)
            .await?
            .ok_or_else(Self::user_not_found)
    }

    async fn delete_user(&self, id: i32) -> AppResult<DeletedUser> {
        if !self.uow.users().delete(id).await? {
            return Err(Self::user_not_found());
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(DeletedUser {
            deleted_user_id: id,
        })
    }

    async fn list_students(&self) -> AppResult<Vec<StudentWithUser>> {
        self.uow.students().list_with_users().await
    }

    async fn update_student(
        &self,
        id: i32,
        changes: StudentChanges,
    ) -> AppResult<StudentWithUser> {
        if let Some(code) = changes.student_code.as_deref() {
            self.ensure_student_code_free(code, Some(id)).await?;
        }

        let students = self.uow.students();
        students
            .update(id, changes)
            .await
            .map_err(|e| e.on_unique_violation(DomainError::DuplicateStudentCode))?
            .ok_or(DomainError::StudentNotFound)?;

        students
            .find_with_user(id)
            .await?
            .ok_or_else(|| DomainError::StudentNotFound.into())
    }
}
