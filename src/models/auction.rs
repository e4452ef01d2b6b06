//! Auction records, participant bids and the views assembled from them
//!
//! Models for the /api/auctions endpoints. Monetary amounts are
//! `rust_decimal::Decimal` and serialize as JSON strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Auction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Completed,
    Pending,
    Failed,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Completed => "completed",
            AuctionStatus::Pending => "pending",
            AuctionStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(AuctionStatus::Completed),
            "pending" => Ok(AuctionStatus::Pending),
            "failed" => Ok(AuctionStatus::Failed),
            _ => Err(format!(
                "Unknown auction status: '{}'. Must be one of: completed, pending, failed",
                s
            )),
        }
    }
}

/// Stored auction outcome for a single pool and block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRecord {
    pub id: String,
    pub pool_id: String,
    pub winner: String,
    /// Winning bid in ETH
    pub winning_bid: Decimal,
    pub total_bids: u64,
    pub timestamp: DateTime<Utc>,
    pub status: AuctionStatus,
    pub block_number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    /// LVR detected for the block that triggered the auction, in ETH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lvr_amount: Option<Decimal>,
}

/// Individual participant bid, stored alongside its auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBid {
    pub id: String,
    pub auction_id: String,
    pub address: String,
    pub bid: Decimal,
    /// Submission time
    pub timestamp: DateTime<Utc>,
}

/// Participant entry in a create request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantCreate {
    pub address: Option<String>,
    pub bid: Option<Decimal>,
    pub timestamp: Option<String>,
}

/// Body of POST /api/auctions
///
/// Every field is optional at the serde level so that missing fields are
/// reported by the validator with the field name instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionCreate {
    pub pool_id: Option<String>,
    pub winner: Option<String>,
    pub winning_bid: Option<Decimal>,
    pub total_bids: Option<i64>,
    /// RFC 3339 or "YYYY-MM-DD HH:MM:SS" (UTC)
    pub timestamp: Option<String>,
    pub status: Option<String>,
    pub block_number: Option<i64>,
    pub gas_used: Option<i64>,
    pub lvr_amount: Option<Decimal>,
    #[serde(default)]
    pub participants: Vec<ParticipantCreate>,
}

/// Response for successful record creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
    pub message: String,
}

/// Participant as shown in the auction detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub address: String,
    pub bid: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Response for GET /api/auctions/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetail {
    pub id: String,
    pub pool_id: String,
    pub status: AuctionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub winner: String,
    pub winning_bid: Decimal,
    pub total_bids: u64,
    pub participants: Vec<ParticipantView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lvr_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    pub block_number: u64,
}

/// Response for GET /api/auctions/summary
///
/// Totals are pre-formatted with two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionSummary {
    pub active_auctions: u64,
    #[serde(rename = "totalMEVRecovered")]
    pub total_mev_recovered: String,
    #[serde(rename = "totalLPRewards")]
    pub total_lp_rewards: String,
    pub avs_operator_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_from_str() {
        assert_eq!("completed".parse::<AuctionStatus>(), Ok(AuctionStatus::Completed));
        assert_eq!("PENDING".parse::<AuctionStatus>(), Ok(AuctionStatus::Pending));
        assert_eq!("failed".parse::<AuctionStatus>(), Ok(AuctionStatus::Failed));
        assert!("settled".parse::<AuctionStatus>().is_err());
    }

    #[test]
    fn test_summary_field_names() {
        let summary = AuctionSummary {
            active_auctions: 1,
            total_mev_recovered: "6.00".to_string(),
            total_lp_rewards: "5.10".to_string(),
            avs_operator_count: 2,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["activeAuctions"], 1);
        assert_eq!(json["totalMEVRecovered"], "6.00");
        assert_eq!(json["totalLPRewards"], "5.10");
        assert_eq!(json["avsOperatorCount"], 2);
    }

    #[test]
    fn test_auction_record_serializes_amounts_as_strings() {
        let record = AuctionRecord {
            id: "a1".to_string(),
            pool_id: "0xpool".to_string(),
            winner: "0xwinner".to_string(),
            winning_bid: dec!(1.25),
            total_bids: 4,
            timestamp: Utc::now(),
            status: AuctionStatus::Completed,
            block_number: 18_500_000,
            gas_used: None,
            lvr_amount: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["winningBid"], "1.25");
        assert_eq!(json["poolId"], "0xpool");
        assert_eq!(json["status"], "completed");
        // Optional fields are omitted when absent
        assert!(json.get("gasUsed").is_none());
        assert!(json.get("lvrAmount").is_none());
    }

    #[test]
    fn test_create_shape_accepts_numeric_and_string_bids() {
        let from_number: AuctionCreate =
            serde_json::from_str(r#"{"winningBid": 1.5, "totalBids": 3}"#).unwrap();
        assert_eq!(from_number.winning_bid, Some(dec!(1.5)));

        let from_string: AuctionCreate =
            serde_json::from_str(r#"{"winningBid": "2.75"}"#).unwrap();
        assert_eq!(from_string.winning_bid, Some(dec!(2.75)));
        assert!(from_string.participants.is_empty());
    }
}
