//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod course_repository;
pub(crate) mod entities;
mod enrollment_repository;
mod student_repository;
mod user_repository;

pub use course_repository::{CourseRepository, CourseStore};
pub use enrollment_repository::{EnrollmentRepository, EnrollmentStore};
pub use student_repository::{StudentRepository, StudentStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use student_repository::insert_student;
pub(crate) use user_repository::insert_user;

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
