use crate::{
    dtos::course::{AddCourseRequest, CourseQueryParams, CourseResponse, UpdateCourseRequest},
    error::ApiError,
    state::AppState,
    validation::{
        parse_date_range, parse_max_students, parse_semester, parse_template_id,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use database::services::course::{CourseService, CourseUpdate, CourseWithTemplate, NewCourse};

/// List the courses taught in a semester
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Courses in the semester, possibly none", body = Vec<CourseResponse>),
        (status = 400, description = "Invalid semester"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let semester = parse_semester(params.semester.as_deref())?;

    let courses =
        CourseService::get_courses_by_semester(&state.db, semester, &state.current_semester)
            .await?;

    Ok(Json(
        courses
            .into_iter()
            .map(convert_to_course_response)
            .collect(),
    ))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CourseResponse>, ApiError> {
    let Path(id) = path?;
    let course = CourseService::get_course_by_id(&state.db, id).await?;

    Ok(Json(convert_to_course_response(course)))
}

/// Create a course from a catalog template
#[utoipa::path(
    post,
    path = "/courses",
    request_body = AddCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid course fields"),
        (status = 404, description = "Template not found")
    ),
    tag = "Courses"
)]
pub async fn add_course(
    State(state): State<AppState>,
    payload: Result<Json<AddCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let Json(request) = payload?;

    let (start_date, end_date) = parse_date_range(&request.start_date, &request.end_date)?;
    let new_course = NewCourse {
        template_id: parse_template_id(&request.template_id)?,
        semester: parse_semester(Some(request.semester.as_str()))?
            .ok_or_else(|| ApiError::InvalidInput("semester is required".to_string()))?,
        start_date,
        end_date,
        max_students: parse_max_students(request.max_students)?,
    };

    let course = CourseService::add_course(&state.db, new_course).await?;

    Ok((StatusCode::CREATED, Json(convert_to_course_response(course))))
}

/// Change the dates and capacity of a course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid course fields"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;

    let (start_date, end_date) = parse_date_range(&request.start_date, &request.end_date)?;
    let update = CourseUpdate {
        start_date,
        end_date,
        max_students: parse_max_students(request.max_students)?,
    };

    let course = CourseService::update_course(&state.db, id, update).await?;

    Ok(Json(convert_to_course_response(course)))
}

/// Delete a course together with its enrollments and waiting list
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    CourseService::delete_course(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn convert_to_course_response((course, template): CourseWithTemplate) -> CourseResponse {
    CourseResponse {
        id: course.id,
        template_id: course.template_id,
        name: template.name,
        credits: template.credits,
        semester: course.semester,
        start_date: course.start_date,
        end_date: course.end_date,
        max_students: course.max_students,
    }
}
