//! Course and enrollment entities and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::StudentWithUser;
use crate::config::{DEFAULT_COURSE_CREDITS, DEFAULT_ENROLLMENT_STATUS};

/// Course record
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Algorithms")]
    pub name: String,
    #[schema(example = "CS201")]
    pub code: String,
    pub description: Option<String>,
    #[schema(example = 3)]
    pub credits: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Only active courses take new enrollments
    pub fn accepts_enrollments(&self) -> bool {
        self.is_active
    }
}

/// Link between one student and one course
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
    #[schema(example = "active")]
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment joined with its student (and user) and course
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentDetails {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: StudentWithUser,
    pub course: Course,
}

/// Enrollment as listed under its course
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseEnrollment {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: StudentWithUser,
}

/// Course with every enrollment referencing it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub enrollments: Vec<CourseEnrollment>,
}

/// Validated input for creating a course
#[derive(Debug, Clone, Default)]
pub struct NewCourse {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
}

impl NewCourse {
    /// Zero counts as unset
    pub fn credits_or_default(&self) -> i32 {
        self.credits
            .filter(|credits| *credits != 0)
            .unwrap_or(DEFAULT_COURSE_CREDITS)
    }
}

/// Partial update of a course; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

/// Validated input for enrolling a student
#[derive(Debug, Clone, Default)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
    pub status: Option<String>,
}

impl NewEnrollment {
    pub fn status_or_default(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| DEFAULT_ENROLLMENT_STATUS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_default_to_three() {
        let course = NewCourse {
            name: "Algorithms".to_string(),
            code: "CS201".to_string(),
            ..Default::default()
        };
        assert_eq!(course.credits_or_default(), 3);

        let course = NewCourse {
            credits: Some(0),
            ..course
        };
        assert_eq!(course.credits_or_default(), 3);

        let course = NewCourse {
            credits: Some(4),
            ..course
        };
        assert_eq!(course.credits_or_default(), 4);
    }

    #[test]
    fn test_enrollment_status_defaults_to_active() {
        let input = NewEnrollment {
            student_id: 1,
            course_id: 2,
            ..Default::default()
        };
        assert_eq!(input.status_or_default(), "active");
    }

    #[test]
    fn test_course_json_is_camel_case() {
        let course = Course {
            id: 7,
            name: "Algorithms".to_string(),
            code: "CS201".to_string(),
            description: None,
            credits: 3,
            is_active: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["isActive"], true);
        assert!(json.get("createdAt").is_some());
    }
}
