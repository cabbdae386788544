use crate::{
    entities::{course, enrollment, student, waitlist_entry},
    error::{RegistrationError, Violation},
};
use chrono::Utc;
use log::{debug, info, warn};
use models::{enrollment_status::EnrollmentStatus, ssn::Ssn};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

/// Owns every transition of a (course, student) pair between not enrolled,
/// enrolled and waitlisted.
///
/// Each public operation runs in a single database transaction. Writes that
/// depend on a course's seat count first take an exclusive lock on the course
/// row, so concurrent callers on the same course are serialized by the
/// database rather than by this process.
pub struct EnrollmentService;

impl EnrollmentService {
    /// Students currently holding a seat in the course, in enrollment order
    pub async fn get_students_in_course(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Vec<student::Model>, RegistrationError> {
        Self::ensure_course_exists(db, course_id).await?;

        let students = student::Entity::find()
            .inner_join(enrollment::Entity)
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::Status.eq(EnrollmentStatus::Active))
            .order_by_asc(enrollment::Column::Id)
            .all(db)
            .await?;

        Ok(students)
    }

    /// Students on the course's waiting list, first in line first
    pub async fn get_waitlist(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Vec<student::Model>, RegistrationError> {
        Self::ensure_course_exists(db, course_id).await?;

        let students = student::Entity::find()
            .inner_join(waitlist_entry::Entity)
            .filter(waitlist_entry::Column::CourseId.eq(course_id))
            .order_by_asc(waitlist_entry::Column::Id)
            .all(db)
            .await?;

        Ok(students)
    }

    /// Enroll a student, reactivating a previously removed enrollment if one
    /// exists. Any waiting list entry for the pair is cleared.
    pub async fn enroll_student(
        db: &DatabaseConnection,
        course_id: i32,
        ssn: &Ssn,
    ) -> Result<student::Model, RegistrationError> {
        let txn = db.begin().await?;
        let student = Self::enroll_in_txn(&txn, course_id, ssn.as_str()).await?;
        txn.commit().await?;

        Ok(student)
    }

    /// Remove a student from a course and hand the freed seat to the first
    /// student on the waiting list.
    ///
    /// Returns the promoted student, if any. When the promotion fails the
    /// removal is still committed and [`RegistrationError::PromotionFailed`]
    /// is returned; the waiting list is left untouched.
    pub async fn remove_student(
        db: &DatabaseConnection,
        course_id: i32,
        ssn: &Ssn,
    ) -> Result<Option<student::Model>, RegistrationError> {
        let not_enrolled = || RegistrationError::RelationNotFound {
            course_id,
            ssn: ssn.to_string(),
        };

        let txn = db.begin().await?;

        // Hold the seat count steady until the promotion below has run
        Self::lock_course(&txn, course_id)
            .await
            .map_err(|err| match err {
                RegistrationError::CourseNotFound(_) => not_enrolled(),
                other => other,
            })?;

        let relation = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::StudentId.eq(ssn.as_str()))
            .filter(enrollment::Column::Status.eq(EnrollmentStatus::Active))
            .one(&txn)
            .await?
            .ok_or_else(not_enrolled)?;

        let mut relation: enrollment::ActiveModel = relation.into();
        relation.status = Set(EnrollmentStatus::Removed);
        relation.updated_at = Set(Utc::now().naive_utc());
        relation.update(&txn).await?;

        info!("Removed student {ssn} from course {course_id}");

        // The promotion runs in a savepoint so a failure only discards the
        // promotion, never the removal
        let savepoint = txn.begin().await?;
        match Self::promote_in_txn(&savepoint, course_id).await {
            Ok(promoted) => {
                savepoint.commit().await?;
                txn.commit().await?;
                Ok(promoted)
            }
            Err(source) => {
                savepoint.rollback().await?;
                txn.commit().await?;

                warn!(
                    "Student {ssn} was removed from course {course_id} but promotion failed: {source}"
                );
                Err(RegistrationError::PromotionFailed {
                    course_id,
                    source: Box::new(source),
                })
            }
        }
    }

    /// Add a student to the end of a course's waiting list
    pub async fn join_waitlist(
        db: &DatabaseConnection,
        course_id: i32,
        ssn: &Ssn,
    ) -> Result<student::Model, RegistrationError> {
        let txn = db.begin().await?;
        Self::lock_course(&txn, course_id).await?;

        let enrolled = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::StudentId.eq(ssn.as_str()))
            .filter(enrollment::Column::Status.eq(EnrollmentStatus::Active))
            .one(&txn)
            .await?;
        if enrolled.is_some() {
            return Err(RegistrationError::AlreadyEnrolled {
                course_id,
                ssn: ssn.to_string(),
            });
        }

        let queued = waitlist_entry::Entity::find()
            .filter(waitlist_entry::Column::CourseId.eq(course_id))
            .filter(waitlist_entry::Column::StudentId.eq(ssn.as_str()))
            .one(&txn)
            .await?;
        if queued.is_some() {
            return Err(RegistrationError::AlreadyWaitlisted {
                course_id,
                ssn: ssn.to_string(),
            });
        }

        waitlist_entry::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(ssn.to_string()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            RegistrationError::from_db(err, |violation| {
                waitlist_violation(course_id, ssn.as_str(), violation)
            })
        })?;

        let student = Self::find_student(&txn, ssn.as_str()).await?;
        txn.commit().await?;

        info!("Student {ssn} joined the waiting list for course {course_id}");
        Ok(student)
    }

    /// Promote the first student on the waiting list into the course.
    ///
    /// Runs the same promotion that follows a removal; use it to advance a
    /// waiting list whose promotion previously failed.
    pub async fn promote_next(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Option<student::Model>, RegistrationError> {
        let txn = db.begin().await?;
        Self::lock_course(&txn, course_id).await?;

        let promoted = Self::promote_in_txn(&txn, course_id).await?;
        txn.commit().await?;

        Ok(promoted)
    }

    async fn promote_in_txn(
        txn: &DatabaseTransaction,
        course_id: i32,
    ) -> Result<Option<student::Model>, RegistrationError> {
        // One seat was freed, so only the first in line is considered
        let Some(next) = waitlist_entry::Entity::find()
            .filter(waitlist_entry::Column::CourseId.eq(course_id))
            .order_by_asc(waitlist_entry::Column::Id)
            .one(txn)
            .await?
        else {
            debug!("Waiting list for course {course_id} is empty");
            return Ok(None);
        };

        // Enrolling clears the pair's waiting list entry
        let student = Self::enroll_in_txn(txn, course_id, &next.student_id).await?;

        info!(
            "Promoted student {} from the waiting list of course {course_id}",
            student.ssn
        );
        Ok(Some(student))
    }

    async fn enroll_in_txn(
        txn: &DatabaseTransaction,
        course_id: i32,
        ssn: &str,
    ) -> Result<student::Model, RegistrationError> {
        let course = Self::lock_course(txn, course_id).await?;

        let existing = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::StudentId.eq(ssn))
            .one(txn)
            .await?;

        if let Some(relation) = &existing
            && relation.status.is_active()
        {
            return Err(RegistrationError::AlreadyEnrolled {
                course_id,
                ssn: ssn.to_owned(),
            });
        }

        if let Some(capacity) = course.capacity() {
            let active = enrollment::Entity::find()
                .filter(enrollment::Column::CourseId.eq(course_id))
                .filter(enrollment::Column::Status.eq(EnrollmentStatus::Active))
                .count(txn)
                .await?;

            if active >= capacity {
                return Err(RegistrationError::CapacityExceeded {
                    course_id,
                    max_students: course.max_students,
                });
            }
        }

        let now = Utc::now().naive_utc();
        match existing {
            Some(relation) => {
                let mut relation: enrollment::ActiveModel = relation.into();
                relation.status = Set(EnrollmentStatus::Active);
                relation.updated_at = Set(now);
                relation.update(txn).await?;

                info!("Re-activated enrollment of student {ssn} in course {course_id}");
            }
            None => {
                enrollment::ActiveModel {
                    course_id: Set(course_id),
                    student_id: Set(ssn.to_owned()),
                    status: Set(EnrollmentStatus::Active),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await
                .map_err(|err| {
                    RegistrationError::from_db(err, |violation| {
                        enrollment_violation(course_id, ssn, violation)
                    })
                })?;

                info!("Enrolled student {ssn} in course {course_id}");
            }
        }

        waitlist_entry::Entity::delete_many()
            .filter(waitlist_entry::Column::CourseId.eq(course_id))
            .filter(waitlist_entry::Column::StudentId.eq(ssn))
            .exec(txn)
            .await?;

        Self::find_student(txn, ssn).await
    }

    /// Fetch the course row, locking it until the transaction ends
    async fn lock_course(
        txn: &DatabaseTransaction,
        course_id: i32,
    ) -> Result<course::Model, RegistrationError> {
        course::Entity::find_for_update(course_id)
            .one(txn)
            .await?
            .ok_or(RegistrationError::CourseNotFound(course_id))
    }

    async fn ensure_course_exists(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<(), RegistrationError> {
        course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or(RegistrationError::CourseNotFound(course_id))
    }

    async fn find_student(
        txn: &DatabaseTransaction,
        ssn: &str,
    ) -> Result<student::Model, RegistrationError> {
        student::Entity::find_by_id(ssn.to_owned())
            .one(txn)
            .await?
            .ok_or_else(|| RegistrationError::StudentNotFound(ssn.to_owned()))
    }
}

/// Meaning of a constraint violation raised by inserting an enrollment
fn enrollment_violation(
    course_id: i32,
    ssn: &str,
    violation: Violation,
) -> Option<RegistrationError> {
    Some(match violation {
        Violation::ForeignKey => RegistrationError::StudentNotFound(ssn.to_owned()),
        Violation::Unique => RegistrationError::AlreadyEnrolled {
            course_id,
            ssn: ssn.to_owned(),
        },
    })
}

/// Meaning of a constraint violation raised by inserting a waiting list entry
fn waitlist_violation(
    course_id: i32,
    ssn: &str,
    violation: Violation,
) -> Option<RegistrationError> {
    Some(match violation {
        Violation::ForeignKey => RegistrationError::StudentNotFound(ssn.to_owned()),
        Violation::Unique => RegistrationError::AlreadyWaitlisted {
            course_id,
            ssn: ssn.to_owned(),
        },
    })
}
