pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;
pub mod validation;

use crate::{
    doc::ApiDoc,
    routes::{course, enrollment, health},
    state::AppState,
};
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router with every route, the OpenAPI document and
/// response compression
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/courses",
            get(course::get_courses).post(course::add_course),
        )
        .route(
            "/courses/{id}",
            get(course::get_course_by_id)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route(
            "/courses/{id}/students",
            get(enrollment::get_students).post(enrollment::enroll_student),
        )
        .route(
            "/courses/{id}/students/{ssn}",
            delete(enrollment::remove_student),
        )
        .route(
            "/courses/{id}/waitinglist",
            get(enrollment::get_waitlist).post(enrollment::join_waitlist),
        )
        .route(
            "/courses/{id}/waitinglist/promote",
            post(enrollment::promote_next),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
