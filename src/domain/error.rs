//! Domain-level errors.
//!
//! These errors represent business rule violations and are independent of
//! infrastructure concerns (HTTP, database). The display text is the
//! user-facing message returned in the `error` field of the envelope.

use thiserror::Error;

/// Business rule violations raised by the services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("كود المادة موجود مسبقاً")]
    DuplicateCourseCode,

    /// Code owned by a different course (update path)
    #[error("كود المادة موجود مسبقاً لمادة أخرى")]
    CourseCodeTaken,

    #[error("لا يمكن حذف المادة لأنها تحتوي على طلاب مسجلين")]
    CourseHasEnrollments,

    #[error("المادة غير موجودة")]
    CourseNotFound,

    #[error("الطالب غير موجود")]
    StudentNotFound,

    #[error("المادة غير مفعلة")]
    CourseInactive,

    #[error("الطالب مسجل مسبقاً في هذه المادة")]
    AlreadyEnrolled,

    #[error("البريد الإلكتروني مستخدم مسبقاً")]
    DuplicateEmail,

    #[error("كود الطالب موجود مسبقاً")]
    DuplicateStudentCode,
}
