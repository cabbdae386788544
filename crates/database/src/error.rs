use log::warn;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Constraint the storage layer rejected a write with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A referenced row (course, student, template) does not exist
    ForeignKey,
    /// The write duplicates a row on a unique key
    Unique,
}

/// Structured classification of a [`DbErr`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFault {
    Violation(Violation),
    /// The database could not be reached or a connection could not be
    /// acquired in time
    Unavailable,
    Other,
}

impl StorageFault {
    pub fn classify(err: &DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Self::Unavailable,
            _ => match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Self::Violation(Violation::ForeignKey)
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => Self::Violation(Violation::Unique),
                _ => Self::Other,
            },
        }
    }
}

/// Every way a registration operation can fail
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("course {0} was not found")]
    CourseNotFound(i32),
    #[error("student {0} was not found")]
    StudentNotFound(String),
    #[error("course template {0} was not found")]
    TemplateNotFound(String),
    #[error("student {ssn} is not enrolled in course {course_id}")]
    RelationNotFound { course_id: i32, ssn: String },
    #[error("student {ssn} is already enrolled in course {course_id}")]
    AlreadyEnrolled { course_id: i32, ssn: String },
    #[error("student {ssn} is already on the waiting list for course {course_id}")]
    AlreadyWaitlisted { course_id: i32, ssn: String },
    #[error("course {course_id} is full ({max_students} students)")]
    CapacityExceeded { course_id: i32, max_students: i32 },
    #[error("storage is unavailable: {0}")]
    StorageUnavailable(#[source] DbErr),
    /// The removal that triggered the promotion was committed; the waiting
    /// list was not advanced.
    #[error("waiting list promotion for course {course_id} failed: {source}")]
    PromotionFailed {
        course_id: i32,
        #[source]
        source: Box<RegistrationError>,
    },
    #[error(transparent)]
    Database(DbErr),
}

impl RegistrationError {
    /// Reclassifies a storage error, translating constraint violations with
    /// `on_violation`. Violations it returns `None` for, and anything else
    /// unrecognized, are passed through unchanged.
    pub(crate) fn from_db<F>(err: DbErr, on_violation: F) -> Self
    where
        F: FnOnce(Violation) -> Option<RegistrationError>,
    {
        Self::from_fault(StorageFault::classify(&err), err, on_violation)
    }

    fn from_fault<F>(fault: StorageFault, err: DbErr, on_violation: F) -> Self
    where
        F: FnOnce(Violation) -> Option<RegistrationError>,
    {
        match fault {
            StorageFault::Violation(violation) => match on_violation(violation) {
                Some(mapped) => {
                    warn!("Constraint violation ({violation:?}) mapped to: {mapped}");
                    mapped
                }
                None => Self::Database(err),
            },
            StorageFault::Unavailable => {
                warn!("Storage unavailable: {err}");
                Self::StorageUnavailable(err)
            }
            StorageFault::Other => Self::Database(err),
        }
    }

    /// Whether the error means a referenced record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CourseNotFound(_)
                | Self::StudentNotFound(_)
                | Self::TemplateNotFound(_)
                | Self::RelationNotFound { .. }
        )
    }
}

impl From<DbErr> for RegistrationError {
    fn from(err: DbErr) -> Self {
        Self::from_db(err, |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn test_acquire_timeout_is_unavailable() {
        let err = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout);
        assert_eq!(StorageFault::classify(&err), StorageFault::Unavailable);

        let mapped = RegistrationError::from(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(mapped, RegistrationError::StorageUnavailable(_)));
    }

    #[test]
    fn test_connection_error_is_unavailable() {
        let err = DbErr::Conn(RuntimeErr::Internal("connection reset".into()));
        assert_eq!(StorageFault::classify(&err), StorageFault::Unavailable);
    }

    #[test]
    fn test_unrecognized_error_passes_through_unchanged() {
        let mapped = RegistrationError::from_db(DbErr::Custom("boom".into()), |_| {
            Some(RegistrationError::CourseNotFound(1))
        });

        match mapped {
            RegistrationError::Database(DbErr::Custom(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected passthrough, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_violation_uses_the_callers_mapping() {
        let mapped = RegistrationError::from_fault(
            StorageFault::Violation(Violation::Unique),
            DbErr::Custom("UNIQUE constraint failed".into()),
            |violation| match violation {
                Violation::Unique => Some(RegistrationError::AlreadyEnrolled {
                    course_id: 4,
                    ssn: "1234567890".into(),
                }),
                Violation::ForeignKey => None,
            },
        );

        assert!(matches!(
            mapped,
            RegistrationError::AlreadyEnrolled { course_id: 4, .. }
        ));
    }

    #[test]
    fn test_unmapped_violation_passes_through() {
        let mapped = RegistrationError::from_fault(
            StorageFault::Violation(Violation::Unique),
            DbErr::Custom("UNIQUE constraint failed".into()),
            |_| None,
        );

        assert!(matches!(mapped, RegistrationError::Database(DbErr::Custom(_))));
    }

    #[test]
    fn test_not_found_kinds() {
        assert!(RegistrationError::CourseNotFound(3).is_not_found());
        assert!(
            RegistrationError::RelationNotFound {
                course_id: 3,
                ssn: "1234567890".into()
            }
            .is_not_found()
        );
        assert!(
            !RegistrationError::CapacityExceeded {
                course_id: 3,
                max_students: 2
            }
            .is_not_found()
        );
    }
}
