//! Record store abstraction
//!
//! Handlers never talk to the database directly. They receive an
//! `Arc<dyn RecordStore>` through `AppState` and go through the typed
//! helpers at the bottom of this module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    auction::{AuctionRecord, ParticipantBid},
    operator::AvsOperator,
    pool::PoolPerformance,
    status::StatusCheck,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Logical collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    StatusChecks,
    Auctions,
    AuctionBids,
    PoolPerformance,
    AvsOperators,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::StatusChecks => "status_checks",
            Collection::Auctions => "auctions",
            Collection::AuctionBids => "auction_bids",
            Collection::PoolPerformance => "pool_performance",
            Collection::AvsOperators => "avs_operators",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored record of any collection
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    StatusCheck(StatusCheck),
    Auction(AuctionRecord),
    Bid(ParticipantBid),
    Pool(PoolPerformance),
    Operator(AvsOperator),
}

impl Record {
    pub fn collection(&self) -> Collection {
        match self {
            Record::StatusCheck(_) => Collection::StatusChecks,
            Record::Auction(_) => Collection::Auctions,
            Record::Bid(_) => Collection::AuctionBids,
            Record::Pool(_) => Collection::PoolPerformance,
            Record::Operator(_) => Collection::AvsOperators,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::StatusCheck(r) => &r.id,
            Record::Auction(r) => &r.id,
            Record::Bid(r) => &r.id,
            Record::Pool(r) => &r.id,
            Record::Operator(r) => &r.id,
        }
    }

    /// Timestamp used for windowed lookups
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Record::StatusCheck(r) => r.timestamp,
            Record::Auction(r) => r.timestamp,
            Record::Bid(r) => r.timestamp,
            Record::Pool(r) => r.last_updated,
            Record::Operator(r) => r.last_seen,
        }
    }

    /// Owning record id for sub-records
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Record::Bid(r) => Some(&r.auction_id),
            _ => None,
        }
    }
}

/// Inclusive time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of `length` ending at `end`
    pub fn trailing(end: DateTime<Utc>, length: chrono::Duration) -> Self {
        Self { start: end - length, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store error: {0}")]
    Backend(String),

    #[error("duplicate {collection} record: {key}")]
    Duplicate { collection: Collection, key: String },

    #[error("malformed {collection} record: {message}")]
    Corrupt {
        collection: Collection,
        message: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence backend for all records.
///
/// Implementations must make `insert_all` atomic: either every record is
/// committed or none is. Reads must observe every committed write.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert several records as one unit
    async fn insert_all(&self, records: Vec<Record>) -> StoreResult<()>;

    async fn insert(&self, record: Record) -> StoreResult<()> {
        self.insert_all(vec![record]).await
    }

    async fn list_all(&self, collection: Collection) -> StoreResult<Vec<Record>>;

    async fn find_by_id(&self, collection: Collection, id: &str) -> StoreResult<Option<Record>>;

    /// Records whose timestamp falls inside `window`
    async fn find_window(
        &self,
        collection: Collection,
        window: TimeWindow,
    ) -> StoreResult<Vec<Record>>;

    /// Sub-records owned by `parent_id` (participant bids of an auction)
    async fn find_by_parent(
        &self,
        collection: Collection,
        parent_id: &str,
    ) -> StoreResult<Vec<Record>>;

    /// Cheap reachability check
    async fn ping(&self) -> StoreResult<()>;

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Typed view over a `Record` variant
pub trait StoredRecord: Sized + Send {
    const COLLECTION: Collection;

    fn into_record(self) -> Record;

    fn from_record(record: Record) -> Option<Self>;
}

macro_rules! stored_record {
    ($ty:ty, $variant:ident, $collection:expr) => {
        impl StoredRecord for $ty {
            const COLLECTION: Collection = $collection;

            fn into_record(self) -> Record {
                Record::$variant(self)
            }

            fn from_record(record: Record) -> Option<Self> {
                match record {
                    Record::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

stored_record!(StatusCheck, StatusCheck, Collection::StatusChecks);
stored_record!(AuctionRecord, Auction, Collection::Auctions);
stored_record!(ParticipantBid, Bid, Collection::AuctionBids);
stored_record!(PoolPerformance, Pool, Collection::PoolPerformance);
stored_record!(AvsOperator, Operator, Collection::AvsOperators);

fn decode<T: StoredRecord>(records: Vec<Record>) -> StoreResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| {
            let found = record.collection();
            T::from_record(record).ok_or_else(|| StoreError::Corrupt {
                collection: T::COLLECTION,
                message: format!("store returned a {} record", found),
            })
        })
        .collect()
}

pub async fn fetch_all<T: StoredRecord>(store: &dyn RecordStore) -> StoreResult<Vec<T>> {
    decode(store.list_all(T::COLLECTION).await?)
}

pub async fn fetch_by_id<T: StoredRecord>(
    store: &dyn RecordStore,
    id: &str,
) -> StoreResult<Option<T>> {
    match store.find_by_id(T::COLLECTION, id).await? {
        Some(record) => Ok(decode(vec![record])?.pop()),
        None => Ok(None),
    }
}

pub async fn fetch_window<T: StoredRecord>(
    store: &dyn RecordStore,
    window: TimeWindow,
) -> StoreResult<Vec<T>> {
    decode(store.find_window(T::COLLECTION, window).await?)
}

pub async fn fetch_by_parent<T: StoredRecord>(
    store: &dyn RecordStore,
    parent_id: &str,
) -> StoreResult<Vec<T>> {
    decode(store.find_by_parent(T::COLLECTION, parent_id).await?)
}
