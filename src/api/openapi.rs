//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{course_handler, health_handler, user_handler};
use crate::domain::{
    Course, CourseDetails, CourseEnrollment, DeletedUser, Enrollment, EnrollmentDetails, Student,
    StudentWithUser, User, UserWithProfile,
};

/// OpenAPI documentation for the Smart Edu API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Edu Management API",
        version = "0.1.0",
        description = "Users, student profiles, courses and enrollments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health,
        // Course endpoints
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
        // Enrollment endpoints
        course_handler::enroll_student,
        course_handler::student_courses,
        // User and student endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::list_students,
        user_handler::update_student,
    ),
    components(
        schemas(
            // Domain types
            User,
            Student,
            UserWithProfile,
            StudentWithUser,
            DeletedUser,
            Course,
            Enrollment,
            CourseEnrollment,
            CourseDetails,
            EnrollmentDetails,
            // Request types
            course_handler::CreateCourseRequest,
            course_handler::UpdateCourseRequest,
            course_handler::EnrollRequest,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::UpdateStudentRequest,
            health_handler::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and store connectivity"),
        (name = "Courses", description = "Course management"),
        (name = "Enrollments", description = "Student enrollment in courses"),
        (name = "Users", description = "User accounts"),
        (name = "Students", description = "Student profiles")
    )
)]
pub struct ApiDoc;
