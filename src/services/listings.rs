//! Bounded and stable listings
//!
//! Store order is not guaranteed, so every listing applies its own total
//! order before returning. That keeps repeated reads over unchanged data
//! byte-identical.

use std::collections::HashMap;

use crate::error::ApiResult;
use crate::models::{
    auction::AuctionRecord, operator::AvsOperator, pool::PoolPerformance, status::StatusCheck,
};
use crate::store::{self, RecordStore};

/// Upper bound on the status check listing
pub const STATUS_CHECK_LIMIT: usize = 1000;

/// Newest first, ties by id; at most `limit` entries
pub fn select_recent(mut auctions: Vec<AuctionRecord>, limit: usize) -> Vec<AuctionRecord> {
    auctions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    auctions.truncate(limit);
    auctions
}

/// Latest snapshot per pool, ordered by name then pool id
pub fn latest_pool_snapshots(snapshots: Vec<PoolPerformance>) -> Vec<PoolPerformance> {
    let mut latest: HashMap<String, PoolPerformance> = HashMap::new();

    for snapshot in snapshots {
        let newer = match latest.get(&snapshot.pool_id) {
            Some(current) => (snapshot.last_updated, &snapshot.id) > (current.last_updated, &current.id),
            None => true,
        };
        if newer {
            latest.insert(snapshot.pool_id.clone(), snapshot);
        }
    }

    let mut pools: Vec<PoolPerformance> = latest.into_values().collect();
    pools.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.pool_id.cmp(&b.pool_id)));
    pools
}

pub fn sort_operators(mut operators: Vec<AvsOperator>) -> Vec<AvsOperator> {
    operators.sort_by(|a, b| a.address.cmp(&b.address).then_with(|| a.id.cmp(&b.id)));
    operators
}

pub fn sort_status_checks(mut checks: Vec<StatusCheck>) -> Vec<StatusCheck> {
    checks.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
    checks.truncate(STATUS_CHECK_LIMIT);
    checks
}

pub async fn recent_auctions(store: &dyn RecordStore, limit: usize) -> ApiResult<Vec<AuctionRecord>> {
    Ok(select_recent(store::fetch_all(store).await?, limit))
}

pub async fn pool_performance(store: &dyn RecordStore) -> ApiResult<Vec<PoolPerformance>> {
    Ok(latest_pool_snapshots(store::fetch_all(store).await?))
}

pub async fn operators(store: &dyn RecordStore) -> ApiResult<Vec<AvsOperator>> {
    Ok(sort_operators(store::fetch_all(store).await?))
}

pub async fn status_checks(store: &dyn RecordStore) -> ApiResult<Vec<StatusCheck>> {
    Ok(sort_status_checks(store::fetch_all(store).await?))
}
