//! SeaORM Entity for avs_operators table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "avs_operators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub address: String,
    pub stake: Decimal,
    /// active or inactive
    pub status: String,
    pub tasks_completed: i64,
    #[sea_orm(column_type = "Decimal(Some((5, 4)))")]
    pub reputation: Decimal,
    pub last_seen: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
