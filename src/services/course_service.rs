//! Course service - Course records and enrollments.
//!
//! Every uniqueness rule has a pre-check for the common case and relies on
//! the store's unique constraint for the racing case.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Course, CourseChanges, CourseDetails, DomainError, EnrollmentDetails, NewCourse,
    NewEnrollment,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Course and enrollment use cases.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// List all courses, newest first
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    /// Course with its enrollments; `None` when absent
    async fn get_course(&self, id: i32) -> AppResult<Option<CourseDetails>>;

    /// Exact-match lookup by code
    async fn get_course_by_code(&self, code: &str) -> AppResult<Option<Course>>;

    /// Create a course with a unique code
    async fn create_course(&self, input: NewCourse) -> AppResult<Course>;

    /// Apply a partial update, keeping codes unique
    async fn update_course(&self, id: i32, changes: CourseChanges) -> AppResult<Course>;

    /// Delete a course that no enrollment references
    async fn delete_course(&self, id: i32) -> AppResult<Course>;

    /// Enroll a student into an active course
    async fn enroll_student(&self, input: NewEnrollment) -> AppResult<EnrollmentDetails>;

    /// Enrollments of a student, most recent first
    async fn student_courses(&self, student_id: i32) -> AppResult<Vec<EnrollmentDetails>>;

    /// Every enrollment, most recent first
    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>>;
}

/// Concrete implementation of CourseService using Unit of Work.
pub struct CourseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseManager<U> {
    /// Create new course service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseManager<U> {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.uow.courses().list().await
    }

    async fn get_course(&self, id: i32) -> AppResult<Option<CourseDetails>> {
        let Some(course) = self.uow.courses().find_by_id(id).await? else {
            return Ok(None);
        };

        let enrollments = self.uow.enrollments().list_for_course(id).await?;

        Ok(Some(CourseDetails {
            course,
            enrollments,
        }))
    }

    async fn get_course_by_code(&self, code: &str) -> AppResult<Option<Course>> {
        self.uow.courses().find_by_code(code).await
    }

    async fn create_course(&self, input: NewCourse) -> AppResult<Course> {
        if self.get_course_by_code(&input.code).await?.is_some() {
            return Err(DomainError::DuplicateCourseCode.into());
        }

        let course = self
            .uow
            .courses()
            .create(input)
            .await
            .map_err(|e| e.on_unique_violation(DomainError::DuplicateCourseCode))?;

        tracing::info!(course_id = course.id, code = %course.code, "Course created");
        Ok(course)
    }

    async fn update_course(&self, id: i32, changes: CourseChanges) -> AppResult<Course> {
        if let Some(code) = changes.code.as_deref() {
            if let Some(existing) = self.get_course_by_code(code).await? {
                if existing.id != id {
                    return Err(DomainError::CourseCodeTaken.into());
                }
            }
        }

        self.uow
            .courses()
            .update(id, changes)
            .await
            .map_err(|e| e.on_unique_violation(DomainError::CourseCodeTaken))?
            .ok_or_else(|| DomainError::CourseNotFound.into())
    }

    async fn delete_course(&self, id: i32) -> AppResult<Course> {
        let courses = self.uow.courses();

        let course = courses
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CourseNotFound)?;

        if self.uow.enrollments().count_for_course(id).await? > 0 {
            return Err(DomainError::CourseHasEnrollments.into());
        }

        // An enrollment inserted after the count trips the foreign key instead
        let deleted = courses
            .delete(id)
            .await
            .map_err(|e| e.on_foreign_key_violation(DomainError::CourseHasEnrollments))?;

        if !deleted {
            return Err(DomainError::CourseNotFound.into());
        }

        tracing::info!(course_id = id, "Course deleted");
        Ok(course)
    }

    async fn enroll_student(&self, input: NewEnrollment) -> AppResult<EnrollmentDetails> {
        let student = self.uow.students().find_by_id(input.student_id).await?;
        let course = self.uow.courses().find_by_id(input.course_id).await?;

        // Order decides which error callers see first
        if student.is_none() {
            return Err(DomainError::StudentNotFound.into());
        }
        match course {
            None => return Err(DomainError::CourseNotFound.into()),
            Some(course) if !course.accepts_enrollments() => {
                return Err(DomainError::CourseInactive.into())
            }
            Some(_) => {}
        }

        let enrollments = self.uow.enrollments();
        let enrollment = enrollments
            .create(input)
            .await
            .map_err(|e| e.on_unique_violation(DomainError::AlreadyEnrolled))?;

        tracing::info!(
            enrollment_id = enrollment.id,
            student_id = enrollment.student_id,
            course_id = enrollment.course_id,
            "Student enrolled"
        );

        enrollments
            .find_details(enrollment.id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Enrollment {} vanished", enrollment.id)))
    }

    async fn student_courses(&self, student_id: i32) -> AppResult<Vec<EnrollmentDetails>> {
        self.uow.enrollments().list_for_student(student_id).await
    }

    async fn list_enrollments(&self) -> AppResult<Vec<EnrollmentDetails>> {
        self.uow.enrollments().list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Enrollment, Student, StudentWithUser, User};
    use crate::infra::repositories::{
        MockCourseRepository, MockEnrollmentRepository, MockStudentRepository,
        MockUserRepository,
    };
    use crate::infra::{
        CourseRepository, EnrollmentRepository, StudentRepository, TransactionContext,
        UserRepository,
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    /// Test double for UnitOfWork handing out mock repositories
    struct TestUnitOfWork {
        students: Arc<MockStudentRepository>,
        courses: Arc<MockCourseRepository>,
        enrollments: Arc<MockEnrollmentRepository>,
    }

    impl TestUnitOfWork {
        fn new(
            students: MockStudentRepository,
            courses: MockCourseRepository,
            enrollments: MockEnrollmentRepository,
        ) -> Self {
            Self {
                students: Arc::new(students),
                courses: Arc::new(courses),
                enrollments: Arc::new(enrollments),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn students(&self) -> Arc<dyn StudentRepository> {
            self.students.clone()
        }

        fn courses(&self) -> Arc<dyn CourseRepository> {
            self.courses.clone()
        }

        fn enrollments(&self) -> Arc<dyn EnrollmentRepository> {
            self.enrollments.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn service(
        students: MockStudentRepository,
        courses: MockCourseRepository,
        enrollments: MockEnrollmentRepository,
    ) -> CourseManager<TestUnitOfWork> {
        CourseManager::new(Arc::new(TestUnitOfWork::new(students, courses, enrollments)))
    }

    fn course(id: i32, code: &str, is_active: bool) -> Course {
        Course {
            id,
            name: "Algorithms".to_string(),
            code: code.to_string(),
            description: None,
            credits: 3,
            is_active,
            created_at: Utc::now(),
        }
    }

    fn student(id: i32) -> Student {
        Student {
            id,
            user_id: 10,
            student_code: "STU-1".to_string(),
            date_of_birth: None,
            gender: None,
            nationality: None,
            address: None,
            academic_status: "active".to_string(),
            enrollment_date: Utc::now(),
        }
    }

    fn details(enrollment_id: i32, student_id: i32, course_id: i32) -> EnrollmentDetails {
        let now = Utc::now();
        EnrollmentDetails {
            enrollment: Enrollment {
                id: enrollment_id,
                student_id,
                course_id,
                grade: None,
                status: "active".to_string(),
                enrolled_at: now,
            },
            student: StudentWithUser {
                student: student(student_id),
                user: User {
                    id: 10,
                    email: "s@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    name: "Student".to_string(),
                    phone: None,
                    is_active: true,
                    is_student: true,
                    is_teacher: false,
                    is_admin: false,
                    created_at: now,
                    updated_at: now,
                },
            },
            course: course(course_id, "CS201", true),
        }
    }

    fn enroll_input(student_id: i32, course_id: i32) -> NewEnrollment {
        NewEnrollment {
            student_id,
            course_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_course_rejects_duplicate_code() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_code()
            .withf(|code| code == "CS201")
            .returning(|code| Ok(Some(course(1, code, true))));
        courses.expect_create().never();

        let service = service(
            MockStudentRepository::new(),
            courses,
            MockEnrollmentRepository::new(),
        );
        let result = service
            .create_course(NewCourse {
                name: "Algorithms".to_string(),
                code: "CS201".to_string(),
                ..Default::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::DuplicateCourseCode))
        ));
    }

    #[tokio::test]
    async fn test_create_course_inserts_new_code() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_code().returning(|_| Ok(None));
        courses
            .expect_create()
            .times(1)
            .returning(|input| Ok(course(5, &input.code, true)));

        let service = service(
            MockStudentRepository::new(),
            courses,
            MockEnrollmentRepository::new(),
        );
        let created = service
            .create_course(NewCourse {
                name: "Algorithms".to_string(),
                code: "CS201".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(created.code, "CS201");
    }

    #[tokio::test]
    async fn test_update_course_rejects_code_of_other_course() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_code()
            .returning(|code| Ok(Some(course(2, code, true))));
        courses.expect_update().never();

        let service = service(
            MockStudentRepository::new(),
            courses,
            MockEnrollmentRepository::new(),
        );
        let result = service
            .update_course(
                1,
                CourseChanges {
                    code: Some("CS999".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CourseCodeTaken))
        ));
    }

    #[tokio::test]
    async fn test_update_course_allows_own_code() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_code()
            .returning(|code| Ok(Some(course(1, code, true))));
        courses
            .expect_update()
            .with(eq(1), mockall::predicate::always())
            .returning(|id, _| Ok(Some(course(id, "CS201", true))));

        let service = service(
            MockStudentRepository::new(),
            courses,
            MockEnrollmentRepository::new(),
        );
        let result = service
            .update_course(
                1,
                CourseChanges {
                    code: Some("CS201".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result.unwrap().code, "CS201");
    }

    #[tokio::test]
    async fn test_update_missing_course_is_domain_error() {
        let mut courses = MockCourseRepository::new();
        courses.expect_update().returning(|_, _| Ok(None));

        let service = service(
            MockStudentRepository::new(),
            courses,
            MockEnrollmentRepository::new(),
        );
        let result = service
            .update_course(
                42,
                CourseChanges {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CourseNotFound))
        ));
    }

    #[tokio::test]
    async fn test_delete_course_with_enrollments_is_blocked() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, "CS201", true))));
        courses.expect_delete().never();

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_count_for_course()
            .with(eq(1))
            .returning(|_| Ok(2));

        let service = service(MockStudentRepository::new(), courses, enrollments);
        let result = service.delete_course(1).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CourseHasEnrollments))
        ));
    }

    #[tokio::test]
    async fn test_delete_course_without_enrollments() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, "CS201", true))));
        courses.expect_delete().times(1).returning(|_| Ok(true));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_count_for_course().returning(|_| Ok(0));

        let service = service(MockStudentRepository::new(), courses, enrollments);
        let deleted = service.delete_course(1).await.unwrap();

        assert_eq!(deleted.id, 1);
    }

    #[tokio::test]
    async fn test_enroll_reports_missing_student_first() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_id().returning(|_| Ok(None));

        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_create().never();

        let service = service(students, courses, enrollments);
        let result = service.enroll_student(enroll_input(1, 2)).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::StudentNotFound))
        ));
    }

    #[tokio::test]
    async fn test_enroll_missing_course() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .returning(|id| Ok(Some(student(id))));

        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_create().never();

        let service = service(students, courses, enrollments);
        let result = service.enroll_student(enroll_input(1, 2)).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CourseNotFound))
        ));
    }

    #[tokio::test]
    async fn test_enroll_inactive_course() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .returning(|id| Ok(Some(student(id))));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, "CS201", false))));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_create().never();

        let service = service(students, courses, enrollments);
        let result = service.enroll_student(enroll_input(1, 2)).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::CourseInactive))
        ));
    }

    #[tokio::test]
    async fn test_enroll_returns_joined_enrollment() {
        let mut students = MockStudentRepository::new();
        students
            .expect_find_by_id()
            .returning(|id| Ok(Some(student(id))));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(course(id, "CS201", true))));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_create().times(1).returning(|input| {
            Ok(Enrollment {
                id: 9,
                student_id: input.student_id,
                course_id: input.course_id,
                grade: input.grade.clone(),
                status: input.status_or_default(),
                enrolled_at: Utc::now(),
            })
        });
        enrollments
            .expect_find_details()
            .with(eq(9))
            .returning(|id| Ok(Some(details(id, 1, 2))));

        let service = service(students, courses, enrollments);
        let enrolled = service.enroll_student(enroll_input(1, 2)).await.unwrap();

        assert_eq!(enrolled.enrollment.id, 9);
        assert_eq!(enrolled.student.student.id, 1);
        assert_eq!(enrolled.course.id, 2);
    }

    #[tokio::test]
    async fn test_get_missing_course_is_none() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));

        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_list_for_course().never();

        let service = service(MockStudentRepository::new(), courses, enrollments);

        assert!(service.get_course(3).await.unwrap().is_none());
    }
}
