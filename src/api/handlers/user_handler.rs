//! User and student profile handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::AppState;
use crate::config::*;
use crate::domain::{
    DeletedUser, NewUser, StudentChanges, StudentWithUser, UserChanges, UserWithProfile,
};
use crate::errors::{ApiResult, OptionExt, ResultExt};
use crate::types::{ok, ApiResponse, Created};

/// User creation request; `studentCode` with `isStudent` also creates a student profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة"),
        length(min = 1, message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة"),
        email(message = "صيغة البريد الإلكتروني غير صحيحة")
    )]
    #[schema(example = "sara@example.com")]
    pub email: Option<String>,
    #[validate(
        required(message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة"),
        length(min = 1, message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة")
    )]
    pub password_hash: Option<String>,
    #[validate(
        required(message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة"),
        length(min = 1, message = "البريد الإلكتروني وكلمة المرور والاسم مطلوبة")
    )]
    #[schema(example = "Sara")]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_student: Option<bool>,
    pub is_teacher: Option<bool>,
    pub is_admin: Option<bool>,
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    #[schema(example = "STU-2024-001")]
    pub student_code: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            email: req.email.unwrap_or_default(),
            password_hash: req.password_hash.unwrap_or_default(),
            name: req.name.unwrap_or_default(),
            phone: req.phone,
            is_student: req.is_student.unwrap_or(false),
            is_teacher: req.is_teacher.unwrap_or(false),
            is_admin: req.is_admin.unwrap_or(false),
            student_code: req.student_code,
        }
    }
}

/// Partial user update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(email(message = "صيغة البريد الإلكتروني غير صحيحة"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub password_hash: Option<String>,
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub is_student: Option<bool>,
    pub is_teacher: Option<bool>,
    pub is_admin: Option<bool>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            email: req.email,
            password_hash: req.password_hash,
            name: req.name,
            phone: req.phone,
            is_active: req.is_active,
            is_student: req.is_student,
            is_teacher: req.is_teacher,
            is_admin: req.is_admin,
        }
    }
}

/// Partial student profile update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub student_code: Option<String>,
    /// `YYYY-MM-DD`
    #[schema(value_type = Option<String>, example = "2004-05-17")]
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub academic_status: Option<String>,
}

impl From<UpdateStudentRequest> for StudentChanges {
    fn from(req: UpdateStudentRequest) -> Self {
        StudentChanges {
            student_code: req.student_code,
            date_of_birth: req.date_of_birth,
            gender: req.gender,
            nationality: req.nationality,
            address: req.address,
            academic_status: req.academic_status,
        }
    }
}

/// User and student routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/students", get(list_students))
        .route("/students/:id", put(update_student))
}

/// List all users with their student profiles
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserWithProfile]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<UserWithProfile>>>> {
    let users = state
        .user_service
        .list_users()
        .await
        .or_fail(MSG_USERS_FETCH_FAILED)?;

    Ok(ok(MSG_USERS_FETCHED, users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserWithProfile),
        (status = 400, description = "Validation error, duplicate email or student code")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<UserWithProfile>> {
    let user = state
        .user_service
        .create_user(payload.into())
        .await
        .or_fail(MSG_USER_CREATE_FAILED)?;

    Ok(Created::new(MSG_USER_CREATED, user))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserWithProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<UserWithProfile>>> {
    let user = state
        .user_service
        .get_user(id)
        .await
        .and_then(|user| user.ok_or_not_found(MSG_USER_NOT_FOUND))
        .or_fail(MSG_USER_FETCH_FAILED)?;

    Ok(ok(MSG_USER_FETCHED, user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserWithProfile),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserWithProfile>>> {
    let user = state
        .user_service
        .update_user(id, payload.into())
        .await
        .or_fail(MSG_USER_UPDATE_FAILED)?;

    Ok(ok(MSG_USER_UPDATED, user))
}

/// Delete a user, its student profile and enrollments
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeletedUser),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<DeletedUser>>> {
    let deleted = state
        .user_service
        .delete_user(id)
        .await
        .or_fail(MSG_USER_DELETE_FAILED)?;

    Ok(ok(MSG_USER_DELETED, deleted))
}

/// List all student profiles with their users
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    responses(
        (status = 200, description = "All students", body = [StudentWithUser]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<StudentWithUser>>>> {
    let students = state
        .user_service
        .list_students()
        .await
        .or_fail(MSG_STUDENTS_FETCH_FAILED)?;

    Ok(ok(MSG_STUDENTS_FETCHED, students))
}

/// Update a student profile
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentWithUser),
        (status = 400, description = "Validation error, unknown student or duplicate code")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateStudentRequest>,
) -> ApiResult<Json<ApiResponse<StudentWithUser>>> {
    let student = state
        .user_service
        .update_student(id, payload.into())
        .await
        .or_fail(MSG_STUDENT_UPDATE_FAILED)?;

    Ok(ok(MSG_STUDENT_UPDATED, student))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_rejects_malformed_email() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"not-an-email","passwordHash":"h","name":"Sara"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        let message = errors.field_errors()["email"][0].message.clone().unwrap();

        assert_eq!(message, MSG_INVALID_EMAIL);
    }

    fn first_message(errors: &validator::ValidationErrors, field: &str) -> String {
        errors.field_errors()[field][0]
            .message
            .clone()
            .unwrap()
            .into_owned()
    }

    #[test]
    fn test_validation_messages_match_constants() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"studentCode":""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        for field in ["email", "password_hash", "name"] {
            assert_eq!(first_message(&errors, field), MSG_USER_FIELDS_REQUIRED);
        }
        assert_eq!(first_message(&errors, "student_code"), MSG_EMPTY_FIELD);

        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"email":"nope","passwordHash":"","name":""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(first_message(&errors, "email"), MSG_INVALID_EMAIL);
        assert_eq!(first_message(&errors, "password_hash"), MSG_EMPTY_FIELD);
        assert_eq!(first_message(&errors, "name"), MSG_EMPTY_FIELD);

        let req: UpdateStudentRequest =
            serde_json::from_str(r#"{"studentCode":"","academicStatus":""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(first_message(&errors, "student_code"), MSG_EMPTY_FIELD);
        assert_eq!(first_message(&errors, "academic_status"), MSG_EMPTY_FIELD);
    }

    #[test]
    fn test_create_user_flags_default_to_false() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"sara@example.com","passwordHash":"h","name":"Sara"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        let input = NewUser::from(req);
        assert!(!input.is_student);
        assert!(!input.is_teacher);
        assert!(!input.is_admin);
        assert!(input.student_profile_code().is_none());
    }

    #[test]
    fn test_student_update_parses_iso_date() {
        let req: UpdateStudentRequest =
            serde_json::from_str(r#"{"dateOfBirth":"2004-05-17"}"#).unwrap();

        assert_eq!(
            StudentChanges::from(req).date_of_birth,
            NaiveDate::from_ymd_opt(2004, 5, 17)
        );
    }

    #[test]
    fn test_student_update_rejects_other_date_formats() {
        let parsed = serde_json::from_str::<UpdateStudentRequest>(r#"{"dateOfBirth":"17/05/2004"}"#);

        assert!(parsed.is_err());
    }
}
