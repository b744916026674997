//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and runs multi-row writes
//! (a user together with its student profile) inside one transaction.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    insert_student, insert_user, CourseRepository, CourseStore, EnrollmentRepository,
    EnrollmentStore, StudentRepository, StudentStore, UserRepository, UserStore,
};
use crate::domain::{NewUser, Student, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to the generic method.
/// For testing, mock the repositories it hands out.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get student profile repository
    fn students(&self) -> Arc<dyn StudentRepository>;

    /// Get course repository
    fn courses(&self) -> Arc<dyn CourseRepository>;

    /// Get enrollment repository
    fn enrollments(&self) -> Arc<dyn EnrollmentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    /// Get student profile repository for this transaction
    pub fn students(&self) -> TxStudentRepository<'_> {
        TxStudentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    student_repo: Arc<StudentStore>,
    course_repo: Arc<CourseStore>,
    enrollment_repo: Arc<EnrollmentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            student_repo: Arc::new(StudentStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            enrollment_repo: Arc::new(EnrollmentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.student_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn enrollments(&self) -> Arc<dyn EnrollmentRepository> {
        self.enrollment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    /// Create a new user
    pub async fn create(&self, input: &NewUser) -> AppResult<User> {
        insert_user(self.txn, input).await
    }
}

/// Transaction-aware student profile repository.
pub struct TxStudentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxStudentRepository<'_> {
    /// Create the student profile of an existing user
    pub async fn create(&self, user_id: i32, student_code: &str) -> AppResult<Student> {
        insert_student(self.txn, user_id, student_code).await
    }
}
