#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use database::{
    entities::{course_template, enrollment, student, waitlist_entry},
    services::course::{CourseService, NewCourse},
};
use migration::{Migrator, MigratorTrait};
use models::{semester::Semester, ssn::Ssn};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database,
    DatabaseConnection, EntityTrait, QueryFilter,
};

pub const TEMPLATE_ID: &str = "T-514-VEFT";
pub const SEMESTER: &str = "20163";

/// Fresh in-memory SQLite database with all migrations applied
///
/// The pool holds a single connection: every in-memory connection is its own
/// database, and a single connection also serializes concurrent callers the
/// way SQLite's writer lock would.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    course_template::ActiveModel {
        template_id: Set(TEMPLATE_ID.to_string()),
        name: Set("Web services".to_string()),
        credits: Set(6),
    }
    .insert(&db)
    .await
    .unwrap();

    db
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn semester() -> Semester {
    SEMESTER.parse().unwrap()
}

pub fn new_course(max_students: i32) -> NewCourse {
    NewCourse {
        template_id: TEMPLATE_ID.parse().unwrap(),
        semester: semester(),
        start_date: date(2016, 8, 22),
        end_date: date(2016, 11, 30),
        max_students,
    }
}

/// Creates a course and returns its id
pub async fn seed_course(db: &DatabaseConnection, max_students: i32) -> i32 {
    let (course, _) = CourseService::add_course(db, new_course(max_students))
        .await
        .unwrap();
    course.id
}

/// Creates `count` students and returns their SSNs in creation order
pub async fn seed_students(db: &DatabaseConnection, count: usize) -> Vec<Ssn> {
    let mut ssns = Vec::with_capacity(count);

    for i in 0..count {
        let ssn = format!("01010{i:05}");
        student::ActiveModel {
            ssn: Set(ssn.clone()),
            name: Set(format!("Student {i}")),
        }
        .insert(db)
        .await
        .unwrap();

        ssns.push(ssn.parse().unwrap());
    }

    ssns
}

/// Every enrollment row for the pair, whatever its status
pub async fn enrollment_rows(
    db: &DatabaseConnection,
    course_id: i32,
    ssn: &Ssn,
) -> Vec<enrollment::Model> {
    enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course_id))
        .filter(enrollment::Column::StudentId.eq(ssn.as_str()))
        .all(db)
        .await
        .unwrap()
}

pub async fn waitlist_rows(db: &DatabaseConnection, course_id: i32) -> Vec<waitlist_entry::Model> {
    waitlist_entry::Entity::find()
        .filter(waitlist_entry::Column::CourseId.eq(course_id))
        .all(db)
        .await
        .unwrap()
}

pub fn ssns_of(students: &[student::Model]) -> Vec<String> {
    students.iter().map(|s| s.ssn.clone()).collect()
}
