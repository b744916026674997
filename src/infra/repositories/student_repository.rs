//! Student profile repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use super::entities::user::Entity as UserEntity;
use crate::config::DEFAULT_ACADEMIC_STATUS;
use crate::domain::{Student, StudentChanges, StudentWithUser};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find student profile by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Student>>;

    /// Find student profile by exact student code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Student>>;

    /// Find student profile by ID together with its user
    async fn find_with_user(&self, id: i32) -> AppResult<Option<StudentWithUser>>;

    /// List all student profiles with their users
    async fn list_with_users(&self) -> AppResult<Vec<StudentWithUser>>;

    /// Apply a partial update; `None` when the profile does not exist
    async fn update(&self, id: i32, changes: StudentChanges) -> AppResult<Option<Student>>;
}

/// Insert a student profile row on any connection (plain or transactional).
pub(crate) async fn insert_student<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    student_code: &str,
) -> AppResult<Student> {
    let active_model = ActiveModel {
        user_id: Set(user_id),
        student_code: Set(student_code.to_string()),
        academic_status: Set(DEFAULT_ACADEMIC_STATUS.to_string()),
        enrollment_date: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = active_model.insert(db).await?;
    Ok(Student::from(model))
}

/// Load students with their users, keyed by student ID.
pub(crate) async fn students_with_users<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> AppResult<HashMap<i32, StudentWithUser>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = StudentEntity::find()
        .filter(student::Column::Id.is_in(ids))
        .find_also_related(UserEntity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(student, user)| {
            user.map(|user| {
                (
                    student.id,
                    StudentWithUser {
                        student: student.into(),
                        user: user.into(),
                    },
                )
            })
        })
        .collect())
}

/// Concrete implementation of StudentRepository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Student::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::StudentCode.eq(code))
            .one(&self.db)
            .await?;

        Ok(result.map(Student::from))
    }

    async fn find_with_user(&self, id: i32) -> AppResult<Option<StudentWithUser>> {
        let mut found = students_with_users(&self.db, vec![id]).await?;
        Ok(found.remove(&id))
    }

    async fn list_with_users(&self) -> AppResult<Vec<StudentWithUser>> {
        let rows = StudentEntity::find()
            .order_by_asc(student::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(student, user)| {
                user.map(|user| StudentWithUser {
                    student: student.into(),
                    user: user.into(),
                })
            })
            .collect())
    }

    async fn update(&self, id: i32, changes: StudentChanges) -> AppResult<Option<Student>> {
        let Some(student) = StudentEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let original = student.clone();
        let mut active: ActiveModel = student.into();

        if let Some(student_code) = changes.student_code {
            active.student_code = Set(student_code);
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            active.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(nationality) = changes.nationality {
            active.nationality = Set(Some(nationality));
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address));
        }
        if let Some(academic_status) = changes.academic_status {
            active.academic_status = Set(academic_status);
        }

        if !active.is_changed() {
            return Ok(Some(Student::from(original)));
        }

        let model = active.update(&self.db).await?;
        Ok(Some(Student::from(model)))
    }
}
