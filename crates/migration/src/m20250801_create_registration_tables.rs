use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create course_templates table (catalog entries)
        manager
            .create_table(
                Table::create()
                    .table(CourseTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTemplates::TemplateId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseTemplates::Name).string().not_null())
                    .col(
                        ColumnDef::new(CourseTemplates::Credits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table, keyed by SSN
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Ssn)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::TemplateId).string().not_null())
                    .col(ColumnDef::new(Courses::Semester).string_len(5).not_null())
                    .col(ColumnDef::new(Courses::StartDate).date_time().not_null())
                    .col(ColumnDef::new(Courses::EndDate).date_time().not_null())
                    .col(
                        ColumnDef::new(Courses::MaxStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-template_id")
                            .from(Courses::Table, Courses::TemplateId)
                            .to(CourseTemplates::Table, CourseTemplates::TemplateId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments table (soft-deleted via status)
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Enrollments::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Enrollments::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Ssn)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create waitlist_entries table (hard-deleted, FIFO by id)
        manager
            .create_table(
                Table::create()
                    .table(WaitlistEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaitlistEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaitlistEntries::CourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaitlistEntries::StudentId)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaitlistEntries::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-waitlist_entries-course_id")
                            .from(WaitlistEntries::Table, WaitlistEntries::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-waitlist_entries-student_id")
                            .from(WaitlistEntries::Table, WaitlistEntries::StudentId)
                            .to(Students::Table, Students::Ssn)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(WaitlistEntries::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseTemplates::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum CourseTemplates {
    Table,
    TemplateId,
    Name,
    Credits,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    Table,
    Ssn,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    Table,
    Id,
    TemplateId,
    Semester,
    StartDate,
    EndDate,
    MaxStudents,
}

#[derive(DeriveIden)]
pub(crate) enum Enrollments {
    Table,
    Id,
    CourseId,
    StudentId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum WaitlistEntries {
    Table,
    Id,
    CourseId,
    StudentId,
    CreatedAt,
}
