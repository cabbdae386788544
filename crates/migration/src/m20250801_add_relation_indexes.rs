use crate::m20250801_create_registration_tables::{Courses, Enrollments, WaitlistEntries};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one enrollment row per (course, student), active or removed
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .col(Enrollments::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A student can only be queued once per course
        manager
            .create_index(
                Index::create()
                    .name("idx_waitlist_entries_course_student")
                    .table(WaitlistEntries::Table)
                    .col(WaitlistEntries::CourseId)
                    .col(WaitlistEntries::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Capacity checks count active rows per course
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_semester")
                    .table(Courses::Table)
                    .col(Courses::Semester)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_semester")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_course_status")
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_waitlist_entries_course_student")
                    .table(WaitlistEntries::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_course_student")
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
