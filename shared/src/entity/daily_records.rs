//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

/// One security's trading activity for one calendar date. The composite
/// primary key carries the at-most-one-record-per-date invariant.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "daily_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub security_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub trade_date: Date,
    pub code: String,
    pub volume: Option<i64>,
    pub value: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub change: Option<Decimal>,
    pub transactions: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::securities::Entity",
        from = "Column::SecurityId",
        to = "super::securities::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Securities,
}

impl Related<super::securities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Securities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
