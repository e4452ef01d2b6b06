//! Migration to create auction, participant bid, pool snapshot, operator
//! and status check tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatusChecks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusChecks::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StatusChecks::ClientName).string().not_null())
                    .col(
                        ColumnDef::new(StatusChecks::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Auctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Auctions::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Auctions::PoolId).string().not_null())
                    .col(ColumnDef::new(Auctions::Winner).string().not_null())
                    // Unconstrained numeric keeps the submitted scale
                    .col(ColumnDef::new(Auctions::WinningBid).decimal().not_null())
                    .col(ColumnDef::new(Auctions::TotalBids).big_integer().not_null())
                    .col(
                        ColumnDef::new(Auctions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Auctions::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Auctions::BlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(Auctions::GasUsed).big_integer().null())
                    .col(ColumnDef::new(Auctions::LvrAmount).decimal().null())
                    .to_owned(),
            )
            .await?;

        // Recency window and recent listing both scan by timestamp
        manager
            .create_index(
                Index::create()
                    .name("idx_auctions_timestamp")
                    .table(Auctions::Table)
                    .col(Auctions::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auctions_pool_id")
                    .table(Auctions::Table)
                    .col(Auctions::PoolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuctionBids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuctionBids::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuctionBids::AuctionId).string_len(36).not_null())
                    .col(ColumnDef::new(AuctionBids::Address).string().not_null())
                    .col(ColumnDef::new(AuctionBids::Bid).decimal().not_null())
                    .col(
                        ColumnDef::new(AuctionBids::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auction_bids_auction_id")
                            .from(AuctionBids::Table, AuctionBids::AuctionId)
                            .to(Auctions::Table, Auctions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auction_bids_auction_id")
                    .table(AuctionBids::Table)
                    .col(AuctionBids::AuctionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PoolPerformance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PoolPerformance::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PoolPerformance::Name).string().not_null())
                    .col(ColumnDef::new(PoolPerformance::PoolId).string().not_null())
                    .col(ColumnDef::new(PoolPerformance::Tvl).decimal().not_null())
                    .col(
                        ColumnDef::new(PoolPerformance::LvrReduction)
                            .decimal_len(7, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PoolPerformance::RewardsDistributed)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PoolPerformance::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pool_performance_pool_id")
                    .table(PoolPerformance::Table)
                    .col(PoolPerformance::PoolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AvsOperators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AvsOperators::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AvsOperators::Address).string().not_null())
                    .col(ColumnDef::new(AvsOperators::Stake).decimal().not_null())
                    .col(ColumnDef::new(AvsOperators::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(AvsOperators::TasksCompleted)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvsOperators::Reputation)
                            .decimal_len(5, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AvsOperators::LastSeen)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per operator address
        manager
            .create_index(
                Index::create()
                    .name("idx_avs_operators_address")
                    .table(AvsOperators::Table)
                    .col(AvsOperators::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AvsOperators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PoolPerformance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuctionBids::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Auctions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StatusChecks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StatusChecks {
    Table,
    Id,
    ClientName,
    Timestamp,
}

#[derive(DeriveIden)]
enum Auctions {
    Table,
    Id,
    PoolId,
    Winner,
    WinningBid,
    TotalBids,
    Timestamp,
    Status,
    BlockNumber,
    GasUsed,
    LvrAmount,
}

#[derive(DeriveIden)]
enum AuctionBids {
    Table,
    Id,
    AuctionId,
    Address,
    Bid,
    Timestamp,
}

#[derive(DeriveIden)]
enum PoolPerformance {
    Table,
    Id,
    Name,
    PoolId,
    Tvl,
    LvrReduction,
    RewardsDistributed,
    LastUpdated,
}

#[derive(DeriveIden)]
enum AvsOperators {
    Table,
    Id,
    Address,
    Stake,
    Status,
    TasksCompleted,
    Reputation,
    LastSeen,
}
