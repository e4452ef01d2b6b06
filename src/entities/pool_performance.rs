//! SeaORM Entity for pool_performance table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pool_performance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub pool_id: String,
    pub tvl: Decimal,
    /// Percentage, 0-100
    #[sea_orm(column_type = "Decimal(Some((7, 4)))")]
    pub lvr_reduction: Decimal,
    pub rewards_distributed: Decimal,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
