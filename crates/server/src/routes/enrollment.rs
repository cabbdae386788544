use crate::{
    dtos::student::{EnrollStudentRequest, PromotionResponse, StudentResponse},
    error::ApiError,
    state::AppState,
    validation::parse_ssn,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use database::{entities::student, services::enrollment::EnrollmentService};

fn to_responses(students: Vec<student::Model>) -> Vec<StudentResponse> {
    students.into_iter().map(StudentResponse::from).collect()
}

/// Students currently enrolled in a course
#[utoipa::path(
    get,
    path = "/courses/{id}/students",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrolled students in enrollment order", body = Vec<StudentResponse>),
        (status = 404, description = "Course not found")
    ),
    tag = "Enrollment"
)]
pub async fn get_students(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let Path(id) = path?;
    let students = EnrollmentService::get_students_in_course(&state.db, id).await?;

    Ok(Json(to_responses(students)))
}

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/courses/{id}/students",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    request_body = EnrollStudentRequest,
    responses(
        (status = 201, description = "Student enrolled", body = StudentResponse),
        (status = 400, description = "Invalid SSN"),
        (status = 404, description = "Course or student not found"),
        (status = 412, description = "Already enrolled or course is full")
    ),
    tag = "Enrollment"
)]
pub async fn enroll_student(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let ssn = parse_ssn(&request.ssn)?;

    let student = EnrollmentService::enroll_student(&state.db, id, &ssn).await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Remove a student from a course, promoting the first student on the
/// waiting list into the freed seat
#[utoipa::path(
    delete,
    path = "/courses/{id}/students/{ssn}",
    params(
        ("id" = i32, Path, description = "Course ID"),
        ("ssn" = String, Path, description = "Student SSN")
    ),
    responses(
        (status = 200, description = "Student removed", body = PromotionResponse),
        (status = 400, description = "Invalid SSN"),
        (status = 404, description = "Student is not enrolled in the course"),
        (status = 500, description = "Student removed but the promotion failed")
    ),
    tag = "Enrollment"
)]
pub async fn remove_student(
    State(state): State<AppState>,
    path: Result<Path<(i32, String)>, PathRejection>,
) -> Result<Json<PromotionResponse>, ApiError> {
    let Path((id, ssn)) = path?;
    let ssn = parse_ssn(&ssn)?;

    let promoted = EnrollmentService::remove_student(&state.db, id, &ssn).await?;

    Ok(Json(PromotionResponse {
        promoted: promoted.map(StudentResponse::from),
    }))
}

/// Students waiting for a seat, first in line first
#[utoipa::path(
    get,
    path = "/courses/{id}/waitinglist",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Waiting list in join order", body = Vec<StudentResponse>),
        (status = 404, description = "Course not found")
    ),
    tag = "Waiting list"
)]
pub async fn get_waitlist(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let Path(id) = path?;
    let students = EnrollmentService::get_waitlist(&state.db, id).await?;

    Ok(Json(to_responses(students)))
}

/// Add a student to the end of a course's waiting list
#[utoipa::path(
    post,
    path = "/courses/{id}/waitinglist",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    request_body = EnrollStudentRequest,
    responses(
        (status = 201, description = "Student added to the waiting list", body = StudentResponse),
        (status = 400, description = "Invalid SSN"),
        (status = 404, description = "Course or student not found"),
        (status = 412, description = "Already enrolled or already waiting")
    ),
    tag = "Waiting list"
)]
pub async fn join_waitlist(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let ssn = parse_ssn(&request.ssn)?;

    let student = EnrollmentService::join_waitlist(&state.db, id, &ssn).await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Move the first student on the waiting list into the course
#[utoipa::path(
    post,
    path = "/courses/{id}/waitinglist/promote",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Promotion attempted", body = PromotionResponse),
        (status = 404, description = "Course not found"),
        (status = 412, description = "Course is full")
    ),
    tag = "Waiting list"
)]
pub async fn promote_next(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<PromotionResponse>, ApiError> {
    let Path(id) = path?;
    let promoted = EnrollmentService::promote_next(&state.db, id).await?;

    Ok(Json(PromotionResponse {
        promoted: promoted.map(StudentResponse::from),
    }))
}
