use crate::{
    entities::{course, course_template, enrollment, waitlist_entry},
    error::{RegistrationError, Violation},
};
use chrono::NaiveDateTime;
use log::info;
use models::{semester::Semester, template_id::TemplateId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

/// A course together with the catalog entry it was created from
pub type CourseWithTemplate = (course::Model, course_template::Model);

/// Fields of a course supplied when it is created
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub template_id: TemplateId,
    pub semester: Semester,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub max_students: i32,
}

/// The mutable fields of a course
#[derive(Debug, Clone)]
pub struct CourseUpdate {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub max_students: i32,
}

pub struct CourseService;

impl CourseService {
    /// List the courses taught in `semester`, or in `current_semester` when
    /// none is given. An unknown semester yields an empty list.
    pub async fn get_courses_by_semester(
        db: &DatabaseConnection,
        semester: Option<Semester>,
        current_semester: &Semester,
    ) -> Result<Vec<CourseWithTemplate>, RegistrationError> {
        let semester = semester.unwrap_or_else(|| current_semester.clone());

        let courses = course::Entity::find()
            .filter(course::Column::Semester.eq(semester.as_str()))
            .find_also_related(course_template::Entity)
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?
            .into_iter()
            // Courses are only listed together with their catalog entry
            .filter_map(|(course, template)| template.map(|t| (course, t)))
            .collect();

        Ok(courses)
    }

    /// Get a single course with its catalog entry
    pub async fn get_course_by_id(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<CourseWithTemplate, RegistrationError> {
        match course::Entity::find_by_id(course_id)
            .find_also_related(course_template::Entity)
            .one(db)
            .await?
        {
            Some((course, Some(template))) => Ok((course, template)),
            Some((course, None)) => Err(RegistrationError::TemplateNotFound(course.template_id)),
            None => Err(RegistrationError::CourseNotFound(course_id)),
        }
    }

    pub async fn add_course(
        db: &DatabaseConnection,
        new_course: NewCourse,
    ) -> Result<CourseWithTemplate, RegistrationError> {
        let template_id = new_course.template_id.to_string();
        let txn = db.begin().await?;

        let course = course::ActiveModel {
            template_id: Set(template_id.clone()),
            semester: Set(new_course.semester.to_string()),
            start_date: Set(new_course.start_date),
            end_date: Set(new_course.end_date),
            max_students: Set(new_course.max_students),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            RegistrationError::from_db(err, |violation| match violation {
                Violation::ForeignKey => Some(RegistrationError::TemplateNotFound(
                    template_id.clone(),
                )),
                Violation::Unique => None,
            })
        })?;

        let template = course_template::Entity::find_by_id(template_id.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| RegistrationError::TemplateNotFound(template_id.clone()))?;

        txn.commit().await?;

        info!(
            "Added course {} ({}) for semester {}",
            course.id, template.template_id, course.semester
        );
        Ok((course, template))
    }

    /// Update the start date, end date and capacity of a course
    pub async fn update_course(
        db: &DatabaseConnection,
        course_id: i32,
        update: CourseUpdate,
    ) -> Result<CourseWithTemplate, RegistrationError> {
        let txn = db.begin().await?;

        let existing = course::Entity::find_for_update(course_id)
            .one(&txn)
            .await?
            .ok_or(RegistrationError::CourseNotFound(course_id))?;

        let mut course: course::ActiveModel = existing.into();
        course.start_date = Set(update.start_date);
        course.end_date = Set(update.end_date);
        course.max_students = Set(update.max_students);
        let course = course.update(&txn).await?;

        let template = course_template::Entity::find_by_id(course.template_id.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| RegistrationError::TemplateNotFound(course.template_id.clone()))?;

        txn.commit().await?;

        info!("Updated course {course_id}");
        Ok((course, template))
    }

    /// Delete a course along with every enrollment and waiting list entry
    /// that references it
    pub async fn delete_course(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<(), RegistrationError> {
        let txn = db.begin().await?;

        course::Entity::find_for_update(course_id)
            .one(&txn)
            .await?
            .ok_or(RegistrationError::CourseNotFound(course_id))?;

        let waitlist = waitlist_entry::Entity::delete_many()
            .filter(waitlist_entry::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;

        let enrollments = enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;

        course::Entity::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|err| {
                RegistrationError::from_db(err, |violation| match violation {
                    Violation::ForeignKey => Some(RegistrationError::CourseNotFound(course_id)),
                    Violation::Unique => None,
                })
            })?;

        txn.commit().await?;

        info!(
            "Deleted course {course_id} with {} enrollments and {} waiting list entries",
            enrollments.rows_affected, waitlist.rows_affected
        );
        Ok(())
    }
}
