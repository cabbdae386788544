use crate::routes::{course, enrollment, health};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        course::get_courses,
        course::get_course_by_id,
        course::add_course,
        course::update_course,
        course::delete_course,
        enrollment::get_students,
        enrollment::enroll_student,
        enrollment::remove_student,
        enrollment::get_waitlist,
        enrollment::join_waitlist,
        enrollment::promote_next
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Courses", description = "Course related endpoints"),
        (name = "Enrollment", description = "Enrolling and removing students"),
        (name = "Waiting list", description = "Course waiting lists"),
    ),
    info(
        title = "Course Registration API",
        version = "1.0.0",
        description = "Courses, enrollments and waiting lists",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
