//! Course database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Course;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course {
            id: model.id,
            name: model.name,
            code: model.code,
            description: model.description,
            credits: model.credits,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
