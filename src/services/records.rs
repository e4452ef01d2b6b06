//! Create operations
//!
//! Each write is validated first and then committed with a single store
//! call, so a rejected request never leaves partial state behind.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::ApiResult;
use crate::models::{
    auction::{AuctionCreate, AuctionRecord},
    operator::{AvsOperator, AvsOperatorCreate},
    pool::{PoolPerformance, PoolPerformanceCreate},
    status::{StatusCheck, StatusCheckCreate},
};
use crate::services::validator;
use crate::store::{RecordStore, StoredRecord};

pub async fn create_status_check(
    store: &dyn RecordStore,
    input: StatusCheckCreate,
    now: DateTime<Utc>,
) -> ApiResult<StatusCheck> {
    let check = validator::validate_status_check(input, now)?;
    store.insert(check.clone().into_record()).await?;

    info!(id = %check.id, client_name = %check.client_name, "Recorded status check");
    Ok(check)
}

/// Persist an auction together with its participant bids
pub async fn create_auction(store: &dyn RecordStore, input: AuctionCreate) -> ApiResult<AuctionRecord> {
    let (auction, bids) = validator::validate_auction(input)?.into_records();

    let mut batch = Vec::with_capacity(bids.len() + 1);
    batch.push(auction.clone().into_record());
    batch.extend(bids.into_iter().map(StoredRecord::into_record));

    let participants = batch.len() - 1;
    store.insert_all(batch).await?;

    info!(
        auction_id = %auction.id,
        pool_id = %auction.pool_id,
        block_number = auction.block_number,
        participants,
        "Auction created"
    );
    Ok(auction)
}

pub async fn create_pool_snapshot(
    store: &dyn RecordStore,
    input: PoolPerformanceCreate,
    now: DateTime<Utc>,
) -> ApiResult<PoolPerformance> {
    let snapshot = validator::validate_pool_snapshot(input, now)?;
    store.insert(snapshot.clone().into_record()).await?;

    info!(id = %snapshot.id, pool_id = %snapshot.pool_id, "Pool snapshot recorded");
    Ok(snapshot)
}

/// Register an operator; a second registration of the same address is a conflict
pub async fn register_operator(
    store: &dyn RecordStore,
    input: AvsOperatorCreate,
    now: DateTime<Utc>,
) -> ApiResult<AvsOperator> {
    let operator = validator::validate_operator(input, now)?;
    store.insert(operator.clone().into_record()).await?;

    info!(id = %operator.id, address = %operator.address, "Operator registered");
    Ok(operator)
}
