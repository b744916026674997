//! Enrollment repository implementation.
//!
//! Listing queries return enrollments joined with their student (and that
//! student's user) and, where the caller is not the course itself, the course.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use super::entities::course::Entity as CourseEntity;
use super::entities::enrollment::{self, ActiveModel, Entity as EnrollmentEntity};
use super::student_repository::students_with_users;
use crate::domain::{CourseEnrollment, Enrollment, EnrollmentDetails, NewEnrollment};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Enrollment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Count enrollments referencing a course
    async fn count_for_course(&self, course_id: i32) -> AppResult<u64>;

    /// Insert a new enrollment; the (student, course) unique index applies
    async fn create(&self, input: NewEnrollment) -> AppResult<Enrollment>;

    /// Find one enrollment with student, user and course
    async fn find_details(&self, id: i32) -> AppResult<Option<EnrollmentDetails>>;

    /// Enrollments of a course with their students
    async fn list_for_course(&self, course_id: i32) -> AppResult<Vec<CourseEnrollment>>;

    /// Enrollments of a student, most recent first
    async fn list_for_student(&self, student_id: i32) -> AppResult<Vec<EnrollmentDetails>>;

    /// Every enrollment, most recent first
    async fn list_all(&self) -> AppResult<Vec<EnrollmentDetails>>;
}

/// Concrete implementation of EnrollmentRepository
pub struct EnrollmentStore {
    db: DatabaseConnection,
}

impl EnrollmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn newest_first(query: Select<EnrollmentEntity>) -> Select<EnrollmentEntity> {
        query
            .order_by_desc(enrollment::Column::EnrolledAt)
            .order_by_desc(enrollment::Column::Id)
    }

    /// Join enrollments with their course and student, preserving order.
    async fn with_details(
        &self,
        query: Select<EnrollmentEntity>,
    ) -> AppResult<Vec<EnrollmentDetails>> {
        let rows = query.find_also_related(CourseEntity).all(&self.db).await?;

        let student_ids = rows.iter().map(|(e, _)| e.student_id).collect();
        let students = students_with_users(&self.db, student_ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                let student = students.get(&enrollment.student_id)?.clone();
                Some(EnrollmentDetails {
                    enrollment: enrollment.into(),
                    student,
                    course: course?.into(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentStore {
    async fn count_for_course(&self, course_id: i32) -> AppResult<u64> {
        let count = EnrollmentEntity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn create(&self, input: NewEnrollment) -> AppResult<Enrollment> {
        let status = input.status_or_default();
        let active_model = ActiveModel {
            student_id: Set(input.student_id),
            course_id: Set(input.course_id),
            grade: Set(input.grade),
            status: Set(status),
            enrolled_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Enrollment::from(model))
    }

    async fn find_details(&self, id: i32) -> AppResult<Option<EnrollmentDetails>> {
        let query = EnrollmentEntity::find_by_id(id);
        Ok(self.with_details(query).await?.into_iter().next())
    }

    async fn list_for_course(&self, course_id: i32) -> AppResult<Vec<CourseEnrollment>> {
        let rows = Self::newest_first(
            EnrollmentEntity::find().filter(enrollment::Column::CourseId.eq(course_id)),
        )
        .all(&self.db)
        .await?;

        let student_ids = rows.iter().map(|e| e.student_id).collect();
        let students = students_with_users(&self.db, student_ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.get(&enrollment.student_id)?.clone();
                Some(CourseEnrollment {
                    enrollment: enrollment.into(),
                    student,
                })
            })
            .collect())
    }

    async fn list_for_student(&self, student_id: i32) -> AppResult<Vec<EnrollmentDetails>> {
        let query = Self::newest_first(
            EnrollmentEntity::find().filter(enrollment::Column::StudentId.eq(student_id)),
        );
        self.with_details(query).await
    }

    async fn list_all(&self) -> AppResult<Vec<EnrollmentDetails>> {
        self.with_details(Self::newest_first(EnrollmentEntity::find()))
            .await
    }
}
