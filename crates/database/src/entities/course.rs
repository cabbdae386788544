use sea_orm::{QuerySelect, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub template_id: String,
    pub semester: String, // e.g. 20163
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub max_students: i32, // 0 means unlimited
}

impl Model {
    /// The number of seats, or `None` when the course admits any number of
    /// students
    pub fn capacity(&self) -> Option<u64> {
        match u64::try_from(self.max_students) {
            Ok(0) | Err(_) => None,
            Ok(seats) => Some(seats),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_template::Entity",
        from = "Column::TemplateId",
        to = "super::course_template::Column::TemplateId"
    )]
    CourseTemplate,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::waitlist_entry::Entity")]
    WaitlistEntries,
}

impl Related<super::course_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTemplate.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::waitlist_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaitlistEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Select a course by id with `FOR UPDATE`, holding the row until the
    /// surrounding transaction ends
    pub fn find_for_update(course_id: i32) -> Select<Entity> {
        Self::find_by_id(course_id).lock_exclusive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_find_for_update_locks_the_row() {
        let sql = Entity::find_for_update(7)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""courses"."id" = 7"#), "{sql}");
        assert!(sql.ends_with("FOR UPDATE"), "{sql}");
    }

    #[test]
    fn test_capacity_treats_zero_as_unlimited() {
        let course = |max_students| Model {
            id: 1,
            template_id: "T-514-VEFT".to_string(),
            semester: "20163".to_string(),
            start_date: DateTime::default(),
            end_date: DateTime::default(),
            max_students,
        };

        assert_eq!(course(0).capacity(), None);
        assert_eq!(course(-3).capacity(), None);
        assert_eq!(course(25).capacity(), Some(25));
    }
}
