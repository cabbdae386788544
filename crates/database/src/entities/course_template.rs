use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog entry shared by every offering of a course
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub template_id: String, // e.g. T-514-VEFT
    pub name: String,
    pub credits: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
