//! Course and enrollment handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::AppState;
use crate::config::*;
use crate::domain::{
    Course, CourseChanges, CourseDetails, EnrollmentDetails, NewCourse, NewEnrollment,
};
use crate::errors::{ApiResult, OptionExt, ResultExt};
use crate::types::{ok, ApiResponse, Created};

/// Course creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCourseRequest {
    #[validate(
        required(message = "الاسم والكود مطلوبان"),
        length(min = 1, message = "الاسم والكود مطلوبان")
    )]
    #[schema(example = "Algorithms")]
    pub name: Option<String>,
    #[validate(
        required(message = "الاسم والكود مطلوبان"),
        length(min = 1, message = "الاسم والكود مطلوبان")
    )]
    #[schema(example = "CS201")]
    pub code: Option<String>,
    pub description: Option<String>,
    /// Defaults to 3 when omitted or zero
    #[validate(range(min = 0, message = "عدد الساعات المعتمدة يجب أن يكون موجباً"))]
    pub credits: Option<i32>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(req: CreateCourseRequest) -> Self {
        NewCourse {
            name: req.name.unwrap_or_default(),
            code: req.code.unwrap_or_default(),
            description: req.description,
            credits: req.credits,
        }
    }
}

/// Partial course update; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "لا يمكن أن يكون الحقل فارغاً"))]
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "عدد الساعات المعتمدة يجب أن يكون موجباً"))]
    pub credits: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<UpdateCourseRequest> for CourseChanges {
    fn from(req: UpdateCourseRequest) -> Self {
        CourseChanges {
            name: req.name,
            code: req.code,
            description: req.description,
            credits: req.credits,
            is_active: req.is_active,
        }
    }
}

/// Enrollment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnrollRequest {
    #[validate(
        required(message = "معرف الطالب والمعرف المادة مطلوبان"),
        range(min = 1, message = "معرف الطالب والمعرف المادة مطلوبان")
    )]
    #[schema(example = 1)]
    pub student_id: Option<i32>,
    #[validate(
        required(message = "معرف الطالب والمعرف المادة مطلوبان"),
        range(min = 1, message = "معرف الطالب والمعرف المادة مطلوبان")
    )]
    #[schema(example = 1)]
    pub course_id: Option<i32>,
    pub grade: Option<String>,
    /// Defaults to "active"
    pub status: Option<String>,
}

impl From<EnrollRequest> for NewEnrollment {
    fn from(req: EnrollRequest) -> Self {
        NewEnrollment {
            student_id: req.student_id.unwrap_or_default(),
            course_id: req.course_id.unwrap_or_default(),
            grade: req.grade,
            status: req.status,
        }
    }
}

/// Routes under `/api/courses`
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Enrollment routes under `/api`
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enroll_student))
        .route("/students/:student_id/courses", get(student_courses))
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "Courses, newest first", body = [Course]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Course>>>> {
    let courses = state
        .course_service
        .list_courses()
        .await
        .or_fail(MSG_COURSES_FETCH_FAILED)?;

    Ok(ok(MSG_COURSES_FETCHED, courses))
}

/// Get a course with its enrollments
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDetails),
        (status = 400, description = "Invalid ID"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<CourseDetails>>> {
    let course = state
        .course_service
        .get_course(id)
        .await
        .and_then(|course| course.ok_or_not_found(MSG_COURSE_NOT_FOUND))
        .or_fail(MSG_COURSE_FETCH_FAILED)?;

    Ok(ok(MSG_COURSE_FETCHED, course))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error or duplicate code")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> ApiResult<Created<Course>> {
    let course = state
        .course_service
        .create_course(payload.into())
        .await
        .or_fail(MSG_COURSE_CREATE_FAILED)?;

    Ok(Created::new(MSG_COURSE_CREATED, course))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error, unknown course or code taken")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<UpdateCourseRequest>,
) -> ApiResult<Json<ApiResponse<Course>>> {
    let course = state
        .course_service
        .update_course(id, payload.into())
        .await
        .or_fail(MSG_COURSE_UPDATE_FAILED)?;

    Ok(ok(MSG_COURSE_UPDATED, course))
}

/// Delete a course without enrollments
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = Course),
        (status = 400, description = "Unknown course or course has enrollments")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<Course>>> {
    let course = state
        .course_service
        .delete_course(id)
        .await
        .or_fail(MSG_COURSE_DELETE_FAILED)?;

    Ok(ok(MSG_COURSE_DELETED, course))
}

/// Enroll a student into a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Student enrolled", body = EnrollmentDetails),
        (status = 400, description = "Validation error, unknown student or course, inactive course or already enrolled")
    )
)]
pub async fn enroll_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> ApiResult<Created<EnrollmentDetails>> {
    let enrollment = state
        .course_service
        .enroll_student(payload.into())
        .await
        .or_fail(MSG_ENROLL_FAILED)?;

    Ok(Created::new(MSG_ENROLLED, enrollment))
}

/// List a student's enrollments, most recent first
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/courses",
    tag = "Enrollments",
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrollments of the student", body = [EnrollmentDetails]),
        (status = 400, description = "Invalid ID")
    )
)]
pub async fn student_courses(
    State(state): State<AppState>,
    IdPath(student_id): IdPath,
) -> ApiResult<Json<ApiResponse<Vec<EnrollmentDetails>>>> {
    let enrollments = state
        .course_service
        .student_courses(student_id)
        .await
        .or_fail(MSG_STUDENT_COURSES_FETCH_FAILED)?;

    Ok(ok(MSG_STUDENT_COURSES_FETCHED, enrollments))
}
