//! Inspect command - Prints store contents for diagnostics.

use crate::cli::args::{InspectArgs, InspectTarget};
use crate::config::Config;
use crate::domain::{Course, EnrollmentDetails, StudentWithUser};
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};

/// Execute the inspect command
pub async fn execute(args: InspectArgs, config: Config) -> AppResult<()> {
    let db = super::open_admin_store(&config).await?;
    let services = Services::from_connection(db.get_connection());

    let lines = match args.target {
        InspectTarget::Students => {
            let students = services.users().list_students().await?;
            println!("Students: {}", students.len());
            students.iter().map(student_line).collect::<Vec<_>>()
        }
        InspectTarget::Courses => {
            let courses = services.courses().list_courses().await?;
            println!("Courses: {}", courses.len());
            courses.iter().map(course_line).collect()
        }
        InspectTarget::Enrollments => {
            let enrollments = services.courses().list_enrollments().await?;
            println!("Enrollments: {}", enrollments.len());
            enrollments.iter().map(enrollment_line).collect()
        }
    };

    for line in lines {
        println!("  {}", line);
    }

    db.close().await?;
    Ok(())
}

fn student_line(s: &StudentWithUser) -> String {
    format!(
        "#{} {} <{}> code={} status={}",
        s.student.id, s.user.name, s.user.email, s.student.student_code, s.student.academic_status
    )
}

fn course_line(c: &Course) -> String {
    format!(
        "#{} {} ({}) credits={} {}",
        c.id,
        c.code,
        c.name,
        c.credits,
        if c.is_active { "active" } else { "inactive" }
    )
}

fn enrollment_line(e: &EnrollmentDetails) -> String {
    format!(
        "#{} student #{} {} -> course {} status={} grade={} at {}",
        e.enrollment.id,
        e.student.student.id,
        e.student.user.name,
        e.course.code,
        e.enrollment.status,
        e.enrollment.grade.as_deref().unwrap_or("-"),
        e.enrollment.enrolled_at.format("%Y-%m-%d %H:%M"),
    )
}
