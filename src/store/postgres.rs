//! PostgreSQL record store on top of SeaORM

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use super::{Collection, Record, RecordStore, StoreError, StoreResult, TimeWindow};
use crate::entities::{
    auction_bids, auctions, avs_operators, pool_performance,
    prelude::{AuctionBids, Auctions, AvsOperators, PoolPerformance, StatusChecks},
    status_checks,
};
use crate::models::{
    auction::{AuctionRecord, AuctionStatus, ParticipantBid},
    operator::{AvsOperator, OperatorStatus},
    pool::PoolPerformance as PoolSnapshot,
    status::StatusCheck,
};

#[derive(Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        info!("Connecting to database...");
        let db = Database::connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!("Running migrations...");
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {}", e)))?;

        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(collection: Collection, err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return StoreError::Duplicate {
            collection,
            key: detail,
        };
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}

fn corrupt(collection: Collection, message: impl Into<String>) -> StoreError {
    StoreError::Corrupt {
        collection,
        message: message.into(),
    }
}

fn to_u64(collection: Collection, field: &str, value: i64) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| corrupt(collection, format!("negative {}: {}", field, value)))
}

fn to_i64(collection: Collection, field: &str, value: u64) -> StoreResult<i64> {
    i64::try_from(value)
        .map_err(|_| StoreError::Backend(format!("{}.{} out of range: {}", collection, field, value)))
}

fn status_check_from_model(m: status_checks::Model) -> StoreResult<Record> {
    Ok(Record::StatusCheck(StatusCheck {
        id: m.id,
        client_name: m.client_name,
        timestamp: m.timestamp.with_timezone(&Utc),
    }))
}

fn auction_from_model(m: auctions::Model) -> StoreResult<Record> {
    let c = Collection::Auctions;
    Ok(Record::Auction(AuctionRecord {
        status: m.status.parse::<AuctionStatus>().map_err(|e| corrupt(c, e))?,
        total_bids: to_u64(c, "total_bids", m.total_bids)?,
        block_number: to_u64(c, "block_number", m.block_number)?,
        gas_used: m.gas_used.map(|g| to_u64(c, "gas_used", g)).transpose()?,
        id: m.id,
        pool_id: m.pool_id,
        winner: m.winner,
        winning_bid: m.winning_bid,
        timestamp: m.timestamp.with_timezone(&Utc),
        lvr_amount: m.lvr_amount,
    }))
}

fn bid_from_model(m: auction_bids::Model) -> StoreResult<Record> {
    Ok(Record::Bid(ParticipantBid {
        id: m.id,
        auction_id: m.auction_id,
        address: m.address,
        bid: m.bid,
        timestamp: m.timestamp.with_timezone(&Utc),
    }))
}

fn pool_from_model(m: pool_performance::Model) -> StoreResult<Record> {
    Ok(Record::Pool(PoolSnapshot {
        id: m.id,
        name: m.name,
        pool_id: m.pool_id,
        tvl: m.tvl,
        lvr_reduction: m.lvr_reduction,
        rewards_distributed: m.rewards_distributed,
        last_updated: m.last_updated.with_timezone(&Utc),
    }))
}

fn operator_from_model(m: avs_operators::Model) -> StoreResult<Record> {
    let c = Collection::AvsOperators;
    Ok(Record::Operator(AvsOperator {
        status: m.status.parse::<OperatorStatus>().map_err(|e| corrupt(c, e))?,
        tasks_completed: to_u64(c, "tasks_completed", m.tasks_completed)?,
        id: m.id,
        address: m.address,
        stake: m.stake,
        reputation: m.reputation,
        last_seen: m.last_seen.with_timezone(&Utc),
    }))
}

fn convert_all<M>(models: Vec<M>, convert: fn(M) -> StoreResult<Record>) -> StoreResult<Vec<Record>> {
    models.into_iter().map(convert).collect()
}

async fn insert_record<C: ConnectionTrait>(conn: &C, record: Record) -> StoreResult<()> {
    let collection = record.collection();
    let result = match record {
        Record::StatusCheck(r) => {
            StatusChecks::insert(status_checks::ActiveModel {
                id: Set(r.id),
                client_name: Set(r.client_name),
                timestamp: Set(r.timestamp.fixed_offset()),
            })
            .exec_without_returning(conn)
            .await
        }
        Record::Auction(r) => {
            let model = auctions::ActiveModel {
                total_bids: Set(to_i64(collection, "total_bids", r.total_bids)?),
                block_number: Set(to_i64(collection, "block_number", r.block_number)?),
                gas_used: Set(r.gas_used.map(|g| to_i64(collection, "gas_used", g)).transpose()?),
                id: Set(r.id),
                pool_id: Set(r.pool_id),
                winner: Set(r.winner),
                winning_bid: Set(r.winning_bid),
                timestamp: Set(r.timestamp.fixed_offset()),
                status: Set(r.status.to_string()),
                lvr_amount: Set(r.lvr_amount),
            };
            Auctions::insert(model).exec_without_returning(conn).await
        }
        Record::Bid(r) => {
            AuctionBids::insert(auction_bids::ActiveModel {
                id: Set(r.id),
                auction_id: Set(r.auction_id),
                address: Set(r.address),
                bid: Set(r.bid),
                timestamp: Set(r.timestamp.fixed_offset()),
            })
            .exec_without_returning(conn)
            .await
        }
        Record::Pool(r) => {
            PoolPerformance::insert(pool_performance::ActiveModel {
                id: Set(r.id),
                name: Set(r.name),
                pool_id: Set(r.pool_id),
                tvl: Set(r.tvl),
                lvr_reduction: Set(r.lvr_reduction),
                rewards_distributed: Set(r.rewards_distributed),
                last_updated: Set(r.last_updated.fixed_offset()),
            })
            .exec_without_returning(conn)
            .await
        }
        Record::Operator(r) => {
            let model = avs_operators::ActiveModel {
                tasks_completed: Set(to_i64(collection, "tasks_completed", r.tasks_completed)?),
                id: Set(r.id),
                address: Set(r.address),
                stake: Set(r.stake),
                status: Set(r.status.to_string()),
                reputation: Set(r.reputation),
                last_seen: Set(r.last_seen.fixed_offset()),
            };
            AvsOperators::insert(model).exec_without_returning(conn).await
        }
    };

    result.map(|_| ()).map_err(|e| map_db_err(collection, e))
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn insert_all(&self, records: Vec<Record>) -> StoreResult<()> {
        let count = records.len();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        for record in records {
            // Dropping an uncommitted transaction rolls it back
            insert_record(&txn, record).await?;
        }

        txn.commit()
            .await
            .map_err(|e| StoreError::Backend(format!("commit failed: {}", e)))?;

        debug!(count, "Committed record batch");
        Ok(())
    }

    async fn list_all(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        let err = |e| map_db_err(collection, e);
        match collection {
            Collection::StatusChecks => convert_all(
                StatusChecks::find().all(&self.db).await.map_err(err)?,
                status_check_from_model,
            ),
            Collection::Auctions => convert_all(
                Auctions::find().all(&self.db).await.map_err(err)?,
                auction_from_model,
            ),
            Collection::AuctionBids => convert_all(
                AuctionBids::find().all(&self.db).await.map_err(err)?,
                bid_from_model,
            ),
            Collection::PoolPerformance => convert_all(
                PoolPerformance::find().all(&self.db).await.map_err(err)?,
                pool_from_model,
            ),
            Collection::AvsOperators => convert_all(
                AvsOperators::find().all(&self.db).await.map_err(err)?,
                operator_from_model,
            ),
        }
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Record>> {
        let err = |e| map_db_err(collection, e);
        let id = id.to_string();
        match collection {
            Collection::StatusChecks => StatusChecks::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(err)?
                .map(status_check_from_model)
                .transpose(),
            Collection::Auctions => Auctions::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(err)?
                .map(auction_from_model)
                .transpose(),
            Collection::AuctionBids => AuctionBids::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(err)?
                .map(bid_from_model)
                .transpose(),
            Collection::PoolPerformance => PoolPerformance::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(err)?
                .map(pool_from_model)
                .transpose(),
            Collection::AvsOperators => AvsOperators::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(err)?
                .map(operator_from_model)
                .transpose(),
        }
    }

    async fn find_window(
        &self,
        collection: Collection,
        window: TimeWindow,
    ) -> StoreResult<Vec<Record>> {
        let err = |e| map_db_err(collection, e);
        let (start, end) = (window.start.fixed_offset(), window.end.fixed_offset());
        match collection {
            Collection::StatusChecks => convert_all(
                StatusChecks::find()
                    .filter(status_checks::Column::Timestamp.between(start, end))
                    .all(&self.db)
                    .await
                    .map_err(err)?,
                status_check_from_model,
            ),
            Collection::Auctions => convert_all(
                Auctions::find()
                    .filter(auctions::Column::Timestamp.between(start, end))
                    .all(&self.db)
                    .await
                    .map_err(err)?,
                auction_from_model,
            ),
            Collection::AuctionBids => convert_all(
                AuctionBids::find()
                    .filter(auction_bids::Column::Timestamp.between(start, end))
                    .all(&self.db)
                    .await
                    .map_err(err)?,
                bid_from_model,
            ),
            Collection::PoolPerformance => convert_all(
                PoolPerformance::find()
                    .filter(pool_performance::Column::LastUpdated.between(start, end))
                    .all(&self.db)
                    .await
                    .map_err(err)?,
                pool_from_model,
            ),
            Collection::AvsOperators => convert_all(
                AvsOperators::find()
                    .filter(avs_operators::Column::LastSeen.between(start, end))
                    .all(&self.db)
                    .await
                    .map_err(err)?,
                operator_from_model,
            ),
        }
    }

    async fn find_by_parent(
        &self,
        collection: Collection,
        parent_id: &str,
    ) -> StoreResult<Vec<Record>> {
        match collection {
            Collection::AuctionBids => convert_all(
                AuctionBids::find()
                    .filter(auction_bids::Column::AuctionId.eq(parent_id))
                    .all(&self.db)
                    .await
                    .map_err(|e| map_db_err(collection, e))?,
                bid_from_model,
            ),
            // Only bids have a parent
            _ => Ok(Vec::new()),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db
            .ping()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn close(&self) -> StoreResult<()> {
        info!("Closing database connection pool");
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
