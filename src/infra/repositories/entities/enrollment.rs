//! Enrollment database entity for SeaORM.
//!
//! The (student_id, course_id) pair carries a unique index created by the
//! migrations.

use sea_orm::entity::prelude::*;

use crate::domain::Enrollment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
    pub status: String,
    pub enrolled_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "NoAction"
    )]
    Course,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Enrollment {
    fn from(model: Model) -> Self {
        Enrollment {
            id: model.id,
            student_id: model.student_id,
            course_id: model.course_id,
            grade: model.grade,
            status: model.status,
            enrolled_at: model.enrolled_at,
        }
    }
}
