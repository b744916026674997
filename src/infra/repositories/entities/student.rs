//! Student profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Student;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(unique)]
    pub student_code: String,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub academic_status: String,
    pub enrollment_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            id: model.id,
            user_id: model.user_id,
            student_code: model.student_code,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
            nationality: model.nationality,
            address: model.address,
            academic_status: model.academic_status,
            enrollment_date: model.enrollment_date,
        }
    }
}
