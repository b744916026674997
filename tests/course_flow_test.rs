//! Service and store tests against an in-memory SQLite database.

mod common;

use smart_edu_api::domain::{DomainError, NewCourse, NewEnrollment, NewUser};
use smart_edu_api::errors::AppError;
use smart_edu_api::infra::{CourseRepository, CourseStore, EnrollmentRepository, EnrollmentStore};
use smart_edu_api::services::{ServiceContainer, Services};

fn new_course(name: &str, code: &str) -> NewCourse {
    NewCourse {
        name: name.to_string(),
        code: code.to_string(),
        ..Default::default()
    }
}

fn new_student(email: &str, code: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        name: "Student".to_string(),
        is_student: true,
        student_code: Some(code.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_unique_code_violation_translates_to_domain_error() {
    let db = common::test_database().await;
    let store = CourseStore::new(db.get_connection());

    store.create(new_course("Algorithms", "CS201")).await.unwrap();
    let err = store
        .create(new_course("Algorithms II", "CS201"))
        .await
        .unwrap_err()
        .on_unique_violation(DomainError::DuplicateCourseCode);

    assert!(matches!(
        err,
        AppError::Domain(DomainError::DuplicateCourseCode)
    ));
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_refuses_to_delete_referenced_course() {
    let db = common::test_database().await;
    let services = Services::from_connection(db.get_connection());
    let student = services
        .users()
        .create_user(new_student("sara@example.com", "STU-001"))
        .await
        .unwrap()
        .student_profile
        .unwrap();
    let course = services
        .courses()
        .create_course(new_course("Algorithms", "CS201"))
        .await
        .unwrap();
    services
        .courses()
        .enroll_student(NewEnrollment {
            student_id: student.id,
            course_id: course.id,
            ..Default::default()
        })
        .await
        .unwrap();

    // Bypass the service's count check; the foreign key still refuses
    let err = CourseStore::new(db.get_connection())
        .delete(course.id)
        .await
        .unwrap_err()
        .on_foreign_key_violation(DomainError::CourseHasEnrollments);

    assert!(matches!(
        err,
        AppError::Domain(DomainError::CourseHasEnrollments)
    ));
}

#[tokio::test]
async fn test_repeated_enrollment_keeps_single_row() {
    let db = common::test_database().await;
    let services = Services::from_connection(db.get_connection());
    let student = services
        .users()
        .create_user(new_student("sara@example.com", "STU-001"))
        .await
        .unwrap()
        .student_profile
        .unwrap();
    let course = services
        .courses()
        .create_course(new_course("Algorithms", "CS201"))
        .await
        .unwrap();
    let input = NewEnrollment {
        student_id: student.id,
        course_id: course.id,
        ..Default::default()
    };

    services.courses().enroll_student(input.clone()).await.unwrap();
    let second = services.courses().enroll_student(input).await;

    assert!(matches!(
        second,
        Err(AppError::Domain(DomainError::AlreadyEnrolled))
    ));
    let count = EnrollmentStore::new(db.get_connection())
        .count_for_course(course.id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_user_without_student_flag_gets_no_profile() {
    let db = common::test_database().await;
    let services = Services::from_connection(db.get_connection());

    let created = services
        .users()
        .create_user(NewUser {
            is_student: false,
            ..new_student("teacher@example.com", "STU-009")
        })
        .await
        .unwrap();

    assert!(created.student_profile.is_none());
    assert!(services.users().list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_course_details_include_enrolled_students() {
    let db = common::test_database().await;
    let services = Services::from_connection(db.get_connection());
    let course = services
        .courses()
        .create_course(new_course("Algorithms", "CS201"))
        .await
        .unwrap();

    for (email, code) in [("a@example.com", "STU-A"), ("b@example.com", "STU-B")] {
        let student = services
            .users()
            .create_user(new_student(email, code))
            .await
            .unwrap()
            .student_profile
            .unwrap();
        services
            .courses()
            .enroll_student(NewEnrollment {
                student_id: student.id,
                course_id: course.id,
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let details = services
        .courses()
        .get_course(course.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(details.course.code, "CS201");
    assert_eq!(details.enrollments.len(), 2);
    assert!(details
        .enrollments
        .iter()
        .all(|e| e.student.user.is_student));
}
