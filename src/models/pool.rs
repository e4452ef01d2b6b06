//! Pool performance snapshots and per-pool metrics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time performance snapshot for a liquidity pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPerformance {
    pub id: String,
    /// Display name, e.g. "ETH/USDC"
    pub name: String,
    pub pool_id: String,
    /// Total value locked in USD
    pub tvl: Decimal,
    /// Percentage of LVR mitigated, 0-100
    #[serde(with = "rust_decimal::serde::float")]
    pub lvr_reduction: Decimal,
    /// Rewards paid out to LPs in ETH
    pub rewards_distributed: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Body of POST /api/pools/performance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPerformanceCreate {
    pub name: Option<String>,
    pub pool_id: Option<String>,
    pub tvl: Option<Decimal>,
    pub lvr_reduction: Option<Decimal>,
    pub rewards_distributed: Option<Decimal>,
    pub last_updated: Option<String>,
}

/// Response for GET /api/pools/{id}/metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolMetrics {
    pub pool_id: String,
    pub auctions_triggered: u64,
    pub mev_recovered: String,
    pub lp_rewards_distributed: String,
    pub avg_auction_participation: String,
    /// Auctions of this pool that reported an LVR amount
    pub lvr_detected: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvl: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub lvr_reduction: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_auction_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lvr_reduction_serializes_as_number() {
        let pool = PoolPerformance {
            id: "p1".to_string(),
            name: "ETH/USDC".to_string(),
            pool_id: "0xabc".to_string(),
            tvl: dec!(12500000),
            lvr_reduction: dec!(4.5),
            rewards_distributed: dec!(12.34),
            last_updated: Utc::now(),
        };

        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["lvrReduction"], 4.5);
        assert_eq!(json["tvl"], "12500000");
        assert_eq!(json["rewardsDistributed"], "12.34");
    }

    #[test]
    fn test_metrics_omits_missing_snapshot_fields() {
        let metrics = PoolMetrics {
            pool_id: "0xabc".to_string(),
            auctions_triggered: 0,
            mev_recovered: "0.00".to_string(),
            lp_rewards_distributed: "0.00".to_string(),
            avg_auction_participation: "0.00".to_string(),
            lvr_detected: 0,
            tvl: None,
            lvr_reduction: None,
            last_auction_at: None,
        };

        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("auctionsTriggered"));
        assert!(!json.contains("tvl"));
        assert!(!json.contains("lastAuctionAt"));
    }

    #[test]
    fn test_metrics_lvr_reduction_is_number() {
        let metrics = PoolMetrics {
            pool_id: "0xabc".to_string(),
            auctions_triggered: 2,
            mev_recovered: "3.00".to_string(),
            lp_rewards_distributed: "2.55".to_string(),
            avg_auction_participation: "4.50".to_string(),
            lvr_detected: 1,
            tvl: Some("250.00".to_string()),
            lvr_reduction: Some(dec!(3.5)),
            last_auction_at: None,
        };

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["lvrReduction"], 3.5);
        assert_eq!(json["lvrDetected"], 1);
    }
}
