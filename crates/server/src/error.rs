use crate::config::ConfigError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::RegistrationError;
use log::error;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Error returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed and never reached the database
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Registration(err) => match err {
                RegistrationError::CourseNotFound(_)
                | RegistrationError::StudentNotFound(_)
                | RegistrationError::TemplateNotFound(_)
                | RegistrationError::RelationNotFound { .. } => StatusCode::NOT_FOUND,
                RegistrationError::AlreadyEnrolled { .. }
                | RegistrationError::AlreadyWaitlisted { .. }
                | RegistrationError::CapacityExceeded { .. } => StatusCode::PRECONDITION_FAILED,
                RegistrationError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                RegistrationError::PromotionFailed { .. } | RegistrationError::Database(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed with {status}: {self}");
        }

        let body = match &self {
            // The client must know the removal itself went through
            Self::Registration(RegistrationError::PromotionFailed { .. }) => {
                json!({ "error": self.to_string(), "removed": true })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Failure while starting the server
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnAcquireErr;

    fn status_of(err: RegistrationError) -> StatusCode {
        ApiError::from(err).status()
    }

    #[test]
    fn test_registration_errors_map_to_status_codes() {
        assert_eq!(
            status_of(RegistrationError::CourseNotFound(1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RegistrationError::StudentNotFound("1234567890".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RegistrationError::AlreadyWaitlisted {
                course_id: 1,
                ssn: "1234567890".into()
            }),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            status_of(RegistrationError::CapacityExceeded {
                course_id: 1,
                max_students: 2
            }),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            status_of(RegistrationError::StorageUnavailable(
                DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)
            )),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(RegistrationError::Database(DbErr::Custom("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidInput("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_promotion_failure_is_a_server_error() {
        let err = RegistrationError::PromotionFailed {
            course_id: 1,
            source: Box::new(RegistrationError::CapacityExceeded {
                course_id: 1,
                max_students: 1,
            }),
        };

        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
