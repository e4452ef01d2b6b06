//! Single-auction detail view
//!
//! Joins an auction with its participant bids.

use std::cmp::Ordering;

use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::auction::{AuctionDetail, AuctionRecord, ParticipantBid, ParticipantView};
use crate::store::{self, RecordStore};

/// Submission time ascending, then address, then id
fn participant_order(a: &ParticipantBid, b: &ParticipantBid) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.address.cmp(&b.address))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn assemble_detail(auction: AuctionRecord, mut bids: Vec<ParticipantBid>) -> AuctionDetail {
    bids.sort_by(participant_order);

    // Bidding opens with the first submission; auctions without recorded
    // bids collapse to the settlement instant
    let start_time = bids.first().map(|b| b.timestamp).unwrap_or(auction.timestamp);

    AuctionDetail {
        start_time,
        end_time: auction.timestamp,
        participants: bids
            .into_iter()
            .map(|b| ParticipantView {
                address: b.address,
                bid: b.bid,
                timestamp: b.timestamp,
            })
            .collect(),
        id: auction.id,
        pool_id: auction.pool_id,
        status: auction.status,
        winner: auction.winner,
        winning_bid: auction.winning_bid,
        total_bids: auction.total_bids,
        lvr_amount: auction.lvr_amount,
        gas_used: auction.gas_used,
        block_number: auction.block_number,
    }
}

pub async fn load_auction_detail(store: &dyn RecordStore, auction_id: &str) -> ApiResult<AuctionDetail> {
    let auction: AuctionRecord = match store::fetch_by_id(store, auction_id).await? {
        Some(auction) => auction,
        None => {
            warn!(auction_id = %auction_id, "Auction not found");
            return Err(ApiError::not_found(format!("Auction {} not found", auction_id)));
        }
    };

    let bids: Vec<ParticipantBid> = store::fetch_by_parent(store, auction_id).await?;

    info!(auction_id = %auction_id, participants = bids.len(), "Assembled auction detail");

    Ok(assemble_detail(auction, bids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auction::AuctionStatus;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn auction() -> AuctionRecord {
        AuctionRecord {
            id: "a1".to_string(),
            pool_id: "0xpool".to_string(),
            winner: "0xwinner".to_string(),
            winning_bid: dec!(2.5),
            total_bids: 5,
            timestamp: Utc::now(),
            status: AuctionStatus::Completed,
            block_number: 18_550_000,
            gas_used: Some(210_000),
            lvr_amount: Some(dec!(4.2)),
        }
    }

    fn bid(id: &str, address: &str, seconds_before: i64, base: chrono::DateTime<Utc>) -> ParticipantBid {
        ParticipantBid {
            id: id.to_string(),
            auction_id: "a1".to_string(),
            address: address.to_string(),
            bid: dec!(1.0),
            timestamp: base - Duration::seconds(seconds_before),
        }
    }

    #[test]
    fn test_participants_sorted_by_time_then_address() {
        let auction = auction();
        let base = auction.timestamp;
        let bids = vec![
            bid("b1", "0xcc", 10, base),
            bid("b2", "0xbb", 60, base),
            bid("b3", "0xaa", 10, base),
            bid("b4", "0xdd", 120, base),
        ];

        let detail = assemble_detail(auction, bids);
        let order: Vec<&str> = detail.participants.iter().map(|p| p.address.as_str()).collect();

        assert_eq!(order, vec!["0xdd", "0xbb", "0xaa", "0xcc"]);
        assert_eq!(detail.start_time, base - Duration::seconds(120));
        assert_eq!(detail.end_time, base);
    }

    #[test]
    fn test_no_participants_start_equals_end() {
        let detail = assemble_detail(auction(), Vec::new());
        assert!(detail.participants.is_empty());
        assert_eq!(detail.start_time, detail.end_time);
        assert_eq!(detail.gas_used, Some(210_000));
    }
}
