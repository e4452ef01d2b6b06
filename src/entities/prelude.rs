pub use super::auction_bids::Entity as AuctionBids;
pub use super::auctions::Entity as Auctions;
pub use super::avs_operators::Entity as AvsOperators;
pub use super::pool_performance::Entity as PoolPerformance;
pub use super::status_checks::Entity as StatusChecks;
