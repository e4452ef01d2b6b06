//! Auction summary and per-pool metrics
//!
//! All sums are exact `Decimal` arithmetic. Values are rounded and rendered
//! with two decimal places only when building the response. Stored amounts
//! are capped at `validator::MAX_AMOUNT`, so sums stay far inside the
//! `Decimal` range.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::ApiResult;
use crate::models::{
    auction::{AuctionRecord, AuctionStatus, AuctionSummary},
    operator::{AvsOperator, OperatorStatus},
    pool::{PoolMetrics, PoolPerformance},
};
use crate::store::{self, RecordStore, TimeWindow};

/// Decimal places used for every rendered amount
pub const DISPLAY_DECIMALS: u32 = 2;

/// Render an amount with exactly two decimal places ("6" -> "6.00")
pub fn display_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMALS);
    rounded.to_string()
}

/// LP portion of `total`; `lp_share` is validated to [0, 1] at startup
pub fn lp_portion(total: Decimal, lp_share: Decimal) -> Decimal {
    let share = lp_share.clamp(Decimal::ZERO, Decimal::ONE);
    total * share
}

/// Summary over an already windowed auction population
pub fn compute_summary(
    auctions: &[AuctionRecord],
    operators: &[AvsOperator],
    lp_share: Decimal,
) -> AuctionSummary {
    let active_auctions = auctions
        .iter()
        .filter(|a| a.status != AuctionStatus::Completed)
        .count() as u64;

    let total_mev: Decimal = auctions.iter().map(|a| a.winning_bid).sum();
    let lp_rewards = lp_portion(total_mev, lp_share);

    let avs_operator_count = operators
        .iter()
        .filter(|o| o.status == OperatorStatus::Active)
        .count() as u64;

    AuctionSummary {
        active_auctions,
        total_mev_recovered: display_amount(total_mev),
        total_lp_rewards: display_amount(lp_rewards),
        avs_operator_count,
    }
}

/// Metrics for one pool from all of its auctions and snapshots
pub fn compute_pool_metrics(
    pool_id: &str,
    auctions: &[AuctionRecord],
    snapshots: &[PoolPerformance],
    lp_share: Decimal,
) -> PoolMetrics {
    let pool_auctions: Vec<&AuctionRecord> =
        auctions.iter().filter(|a| a.pool_id == pool_id).collect();

    let auctions_triggered = pool_auctions.len() as u64;
    let lvr_detected = pool_auctions.iter().filter(|a| a.lvr_amount.is_some()).count() as u64;
    let mev_recovered: Decimal = pool_auctions.iter().map(|a| a.winning_bid).sum();

    let avg_participation = if pool_auctions.is_empty() {
        Decimal::ZERO
    } else {
        let total_bids: Decimal = pool_auctions.iter().map(|a| Decimal::from(a.total_bids)).sum();
        total_bids / Decimal::from(auctions_triggered)
    };

    let latest_snapshot = snapshots
        .iter()
        .filter(|s| s.pool_id == pool_id)
        .max_by(|a, b| a.last_updated.cmp(&b.last_updated).then_with(|| a.id.cmp(&b.id)));

    PoolMetrics {
        pool_id: pool_id.to_string(),
        auctions_triggered,
        mev_recovered: display_amount(mev_recovered),
        lp_rewards_distributed: display_amount(lp_portion(mev_recovered, lp_share)),
        avg_auction_participation: display_amount(avg_participation),
        lvr_detected,
        tvl: latest_snapshot.map(|s| display_amount(s.tvl)),
        lvr_reduction: latest_snapshot.map(|s| s.lvr_reduction),
        last_auction_at: pool_auctions.iter().map(|a| a.timestamp).max(),
    }
}

/// Load the windowed population and summarize it
pub async fn load_summary(
    store: &dyn RecordStore,
    config: &ServiceConfig,
    now: DateTime<Utc>,
) -> ApiResult<AuctionSummary> {
    let window = TimeWindow::trailing(now, config.summary_window);
    let auctions: Vec<AuctionRecord> = store::fetch_window(store, window).await?;
    let operators: Vec<AvsOperator> = store::fetch_all(store).await?;

    debug!(
        auctions = auctions.len(),
        operators = operators.len(),
        window_start = %window.start,
        "Computing auction summary"
    );

    Ok(compute_summary(&auctions, &operators, config.lp_share))
}

pub async fn load_pool_metrics(
    store: &dyn RecordStore,
    config: &ServiceConfig,
    pool_id: &str,
) -> ApiResult<PoolMetrics> {
    let auctions: Vec<AuctionRecord> = store::fetch_all(store).await?;
    let snapshots: Vec<PoolPerformance> = store::fetch_all(store).await?;

    Ok(compute_pool_metrics(pool_id, &auctions, &snapshots, config.lp_share))
}
