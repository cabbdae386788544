mod common;

use common::*;
use database::{
    entities::{course, enrollment},
    error::RegistrationError,
    services::{
        course::{CourseService, CourseUpdate, NewCourse},
        enrollment::EnrollmentService,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn test_add_and_get_course() {
    let db = setup_db().await;

    let (added, template) = CourseService::add_course(&db, new_course(30))
        .await
        .unwrap();
    assert_eq!(template.name, "Web services");
    assert_eq!(template.credits, 6);
    assert_eq!(added.semester, SEMESTER);
    assert_eq!(added.max_students, 30);

    let (fetched, _) = CourseService::get_course_by_id(&db, added.id)
        .await
        .unwrap();
    assert_eq!(fetched, added);
}

#[tokio::test]
async fn test_add_course_with_unknown_template() {
    let db = setup_db().await;

    let err = CourseService::add_course(
        &db,
        NewCourse {
            template_id: "T-999-NOPE".parse().unwrap(),
            ..new_course(10)
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(&err, RegistrationError::TemplateNotFound(id) if id == "T-999-NOPE"));
    assert_eq!(course::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_get_missing_course() {
    let db = setup_db().await;

    let err = CourseService::get_course_by_id(&db, 1).await.unwrap_err();
    assert!(matches!(err, RegistrationError::CourseNotFound(1)));
}

#[tokio::test]
async fn test_list_courses_by_semester() {
    let db = setup_db().await;
    let current = seed_course(&db, 10).await;
    CourseService::add_course(
        &db,
        NewCourse {
            semester: "20171".parse().unwrap(),
            ..new_course(10)
        },
    )
    .await
    .unwrap();

    // No semester given: the configured current semester is used
    let courses = CourseService::get_courses_by_semester(&db, None, &semester())
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].0.id, current);

    let spring = CourseService::get_courses_by_semester(
        &db,
        Some("20171".parse().unwrap()),
        &semester(),
    )
    .await
    .unwrap();
    assert_eq!(spring.len(), 1);
    assert_eq!(spring[0].0.semester, "20171");

    // An unknown semester is an empty list, not an error
    let none = CourseService::get_courses_by_semester(
        &db,
        Some("19991".parse().unwrap()),
        &semester(),
    )
    .await
    .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_update_course() {
    let db = setup_db().await;
    let course_id = seed_course(&db, 10).await;

    let (updated, _) = CourseService::update_course(
        &db,
        course_id,
        CourseUpdate {
            start_date: date(2016, 9, 1),
            end_date: date(2016, 12, 15),
            max_students: 0,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.start_date, date(2016, 9, 1));
    assert_eq!(updated.end_date, date(2016, 12, 15));
    assert_eq!(updated.capacity(), None);
    assert_eq!(updated.template_id, TEMPLATE_ID);

    let err = CourseService::update_course(
        &db,
        course_id + 1,
        CourseUpdate {
            start_date: date(2016, 9, 1),
            end_date: date(2016, 12, 15),
            max_students: 0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RegistrationError::CourseNotFound(_)));
}

#[tokio::test]
async fn test_delete_course_removes_its_relations() {
    let db = setup_db().await;
    let course_id = seed_course(&db, 1).await;
    let other_id = seed_course(&db, 1).await;
    let ssns = seed_students(&db, 3).await;

    EnrollmentService::enroll_student(&db, course_id, &ssns[0])
        .await
        .unwrap();
    EnrollmentService::enroll_student(&db, course_id, &ssns[1])
        .await
        .unwrap_err();
    EnrollmentService::join_waitlist(&db, course_id, &ssns[1])
        .await
        .unwrap();
    EnrollmentService::enroll_student(&db, course_id, &ssns[2])
        .await
        .unwrap_err();
    EnrollmentService::enroll_student(&db, other_id, &ssns[2])
        .await
        .unwrap();

    CourseService::delete_course(&db, course_id).await.unwrap();

    let err = CourseService::get_course_by_id(&db, course_id)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::CourseNotFound(_)));
    assert!(waitlist_rows(&db, course_id).await.is_empty());

    let remaining = enrollment::Entity::find()
        .filter(enrollment::Column::CourseId.eq(course_id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // Other courses are untouched
    let students = EnrollmentService::get_students_in_course(&db, other_id)
        .await
        .unwrap();
    assert_eq!(ssns_of(&students), vec![ssns[2].to_string()]);
}

#[tokio::test]
async fn test_delete_missing_course() {
    let db = setup_db().await;

    let err = CourseService::delete_course(&db, 3).await.unwrap_err();
    assert!(matches!(err, RegistrationError::CourseNotFound(3)));
}
