//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod course;
pub mod error;
pub mod user;

pub use course::{
    Course, CourseChanges, CourseDetails, CourseEnrollment, Enrollment, EnrollmentDetails,
    NewCourse, NewEnrollment,
};
pub use error::DomainError;
pub use user::{
    DeletedUser, NewUser, Student, StudentChanges, StudentWithUser, User, UserChanges,
    UserWithProfile,
};
