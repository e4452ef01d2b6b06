//! SeaORM Entity for auctions table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "auctions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub pool_id: String,
    pub winner: String,
    /// Winning bid in ETH
    pub winning_bid: Decimal,
    pub total_bids: i64,
    pub timestamp: DateTimeWithTimeZone,
    /// completed, pending or failed
    pub status: String,
    pub block_number: i64,
    pub gas_used: Option<i64>,
    pub lvr_amount: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::auction_bids::Entity")]
    AuctionBids,
}

impl Related<super::auction_bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuctionBids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
