//! User and student profile entities and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User account (student, teacher or admin)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "student@example.com")]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[schema(example = "Sara Ahmed")]
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_student: bool,
    pub is_teacher: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student profile attached 1:1 to a user
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(example = 1)]
    pub id: i32,
    pub user_id: i32,
    #[schema(example = "STU-2024-001")]
    pub student_code: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    #[schema(example = "active")]
    pub academic_status: String,
    pub enrollment_date: DateTime<Utc>,
}

/// User together with its optional student profile
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub student_profile: Option<Student>,
}

/// Student profile together with its owning user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentWithUser {
    #[serde(flatten)]
    pub student: Student,
    pub user: User,
}

/// Payload of a successful user deletion
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUser {
    pub deleted_user_id: i32,
}

/// Validated input for creating a user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub is_student: bool,
    pub is_teacher: bool,
    pub is_admin: bool,
    pub student_code: Option<String>,
}

impl NewUser {
    /// Student code to create a profile with, if this user gets one.
    ///
    /// A profile is only created for students that supplied a code.
    pub fn student_profile_code(&self) -> Option<&str> {
        if self.is_student {
            self.student_code.as_deref()
        } else {
            None
        }
    }
}

/// Partial update of a user; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub is_student: Option<bool>,
    pub is_teacher: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Partial update of a student profile
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub student_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub academic_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_only_for_students_with_code() {
        let mut input = NewUser {
            is_student: true,
            student_code: Some("STU-1".to_string()),
            ..Default::default()
        };
        assert_eq!(input.student_profile_code(), Some("STU-1"));

        input.is_student = false;
        assert_eq!(input.student_profile_code(), None);

        input.is_student = true;
        input.student_code = None;
        assert_eq!(input.student_profile_code(), None);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let now = Utc::now();
        let user = User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            name: "A".to_string(),
            phone: None,
            is_active: true,
            is_student: false,
            is_teacher: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["isActive"], true);
    }
}
