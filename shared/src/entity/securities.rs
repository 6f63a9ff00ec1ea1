//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "securities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::daily_records::Entity")]
    DailyRecords,
}

impl Related<super::daily_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
