//! Record validation
//!
//! Turns create-shapes into drafts or rejects them with a field-level
//! `ValidationError`. Nothing here touches the store; ids are assigned
//! when a draft is turned into records.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{
    auction::{AuctionCreate, AuctionRecord, AuctionStatus, ParticipantBid, ParticipantCreate},
    operator::{AvsOperator, AvsOperatorCreate, OperatorStatus},
    pool::{PoolPerformance, PoolPerformanceCreate},
    status::{StatusCheck, StatusCheckCreate},
};

/// Format used by the hook contract relayer, interpreted as UTC
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MAX_LVR_REDUCTION: Decimal = Decimal::ONE_HUNDRED;

/// Upper bound on any monetary amount; keeps aggregate sums far from the
/// `Decimal` range so summation cannot overflow
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Decimal places kept for monetary amounts
pub const MAX_AMOUNT_SCALE: u32 = 18;

/// Decimal places the ratio columns (`lvrReduction`, `reputation`) hold
pub const RATIO_SCALE: u32 = 4;

/// Timestamps are stored with microsecond precision
const TIMESTAMP_PRECISION: u16 = 6;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::missing(field))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    let text = required(value, field)?.trim().to_string();
    if text.is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(text)
}

fn non_negative_int(value: i64, field: &str) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::new(field, "must be non-negative"))
}

fn non_negative_amount(value: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new(field, "must be non-negative"));
    }
    Ok(value)
}

/// Non-negative, at most `MAX_AMOUNT`, at most `MAX_AMOUNT_SCALE` places
fn amount(value: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    let value = non_negative_amount(value, field)?;
    if value > MAX_AMOUNT {
        return Err(ValidationError::new(field, format!("must not exceed {}", MAX_AMOUNT)));
    }
    if value.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(ValidationError::new(
            field,
            format!("at most {} decimal places", MAX_AMOUNT_SCALE),
        ));
    }
    Ok(value)
}

/// Bounded ratio with at most `RATIO_SCALE` decimal places
fn ratio(value: Decimal, max: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    let value = bounded(value, Decimal::ZERO, max, field)?;
    if value.normalize().scale() > RATIO_SCALE {
        return Err(ValidationError::new(
            field,
            format!("at most {} decimal places", RATIO_SCALE),
        ));
    }
    Ok(value)
}

fn bounded(value: Decimal, min: Decimal, max: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

/// Parse RFC 3339, or the legacy "YYYY-MM-DD HH:MM:SS" form as UTC
pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(TIMESTAMP_PRECISION));
    }
    NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ValidationError::new(
                field,
                format!(
                    "invalid timestamp '{}': expected RFC 3339 or YYYY-MM-DD HH:MM:SS",
                    raw
                ),
            )
        })
}

fn optional_timestamp(
    raw: Option<String>,
    field: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    match raw {
        Some(raw) => parse_timestamp(&raw, field),
        None => Ok(creation_time(now)),
    }
}

/// `now` at the precision the store keeps, so a created record reads back unchanged
pub fn creation_time(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(TIMESTAMP_PRECISION)
}

/// Validated bid awaiting an id
#[derive(Debug, Clone, PartialEq)]
pub struct BidDraft {
    pub address: String,
    pub bid: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Validated auction awaiting an id
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionDraft {
    pub pool_id: String,
    pub winner: String,
    pub winning_bid: Decimal,
    pub total_bids: u64,
    pub timestamp: DateTime<Utc>,
    pub status: AuctionStatus,
    pub block_number: u64,
    pub gas_used: Option<u64>,
    pub lvr_amount: Option<Decimal>,
    pub participants: Vec<BidDraft>,
}

impl AuctionDraft {
    /// Assign fresh ids to the auction and each of its bids
    pub fn into_records(self) -> (AuctionRecord, Vec<ParticipantBid>) {
        let auction_id = new_id();
        let bids = self
            .participants
            .into_iter()
            .map(|p| ParticipantBid {
                id: new_id(),
                auction_id: auction_id.clone(),
                address: p.address,
                bid: p.bid,
                timestamp: p.timestamp,
            })
            .collect();

        let auction = AuctionRecord {
            id: auction_id,
            pool_id: self.pool_id,
            winner: self.winner,
            winning_bid: self.winning_bid,
            total_bids: self.total_bids,
            timestamp: self.timestamp,
            status: self.status,
            block_number: self.block_number,
            gas_used: self.gas_used,
            lvr_amount: self.lvr_amount,
        };

        (auction, bids)
    }
}

fn validate_participant(index: usize, input: ParticipantCreate) -> Result<BidDraft, ValidationError> {
    let field = |name: &str| format!("participants[{}].{}", index, name);

    Ok(BidDraft {
        address: required_text(input.address, &field("address"))?,
        bid: amount(required(input.bid, &field("bid"))?, &field("bid"))?,
        timestamp: parse_timestamp(
            &required(input.timestamp, &field("timestamp"))?,
            &field("timestamp"),
        )?,
    })
}

pub fn validate_auction(input: AuctionCreate) -> Result<AuctionDraft, ValidationError> {
    let pool_id = required_text(input.pool_id, "poolId")?;
    let winner = required_text(input.winner, "winner")?;
    let winning_bid = amount(required(input.winning_bid, "winningBid")?, "winningBid")?;
    let total_bids = non_negative_int(required(input.total_bids, "totalBids")?, "totalBids")?;
    let timestamp = parse_timestamp(&required(input.timestamp, "timestamp")?, "timestamp")?;
    let block_number = non_negative_int(required(input.block_number, "blockNumber")?, "blockNumber")?;

    let status = match input.status {
        Some(raw) => raw
            .trim()
            .parse::<AuctionStatus>()
            .map_err(|e| ValidationError::new("status", e))?,
        None => AuctionStatus::Completed,
    };

    let gas_used = input
        .gas_used
        .map(|g| non_negative_int(g, "gasUsed"))
        .transpose()?;
    let lvr_amount = input
        .lvr_amount
        .map(|a| amount(a, "lvrAmount"))
        .transpose()?;

    let participants = input
        .participants
        .into_iter()
        .enumerate()
        .map(|(i, p)| validate_participant(i, p))
        .collect::<Result<Vec<_>, _>>()?;

    if participants.len() as u64 > total_bids {
        return Err(ValidationError::new(
            "totalBids",
            format!(
                "must be at least the number of participants ({})",
                participants.len()
            ),
        ));
    }

    Ok(AuctionDraft {
        pool_id,
        winner,
        winning_bid,
        total_bids,
        timestamp,
        status,
        block_number,
        gas_used,
        lvr_amount,
        participants,
    })
}

/// Build a status check; the timestamp is the creation time
pub fn validate_status_check(
    input: StatusCheckCreate,
    now: DateTime<Utc>,
) -> Result<StatusCheck, ValidationError> {
    Ok(StatusCheck {
        id: new_id(),
        client_name: required_text(input.client_name, "clientName")?,
        timestamp: creation_time(now),
    })
}

pub fn validate_pool_snapshot(
    input: PoolPerformanceCreate,
    now: DateTime<Utc>,
) -> Result<PoolPerformance, ValidationError> {
    Ok(PoolPerformance {
        name: required_text(input.name, "name")?,
        pool_id: required_text(input.pool_id, "poolId")?,
        tvl: amount(required(input.tvl, "tvl")?, "tvl")?,
        lvr_reduction: ratio(
            required(input.lvr_reduction, "lvrReduction")?,
            MAX_LVR_REDUCTION,
            "lvrReduction",
        )?,
        rewards_distributed: amount(
            required(input.rewards_distributed, "rewardsDistributed")?,
            "rewardsDistributed",
        )?,
        last_updated: optional_timestamp(input.last_updated, "lastUpdated", now)?,
        id: new_id(),
    })
}

pub fn validate_operator(
    input: AvsOperatorCreate,
    now: DateTime<Utc>,
) -> Result<AvsOperator, ValidationError> {
    let status = match input.status {
        Some(raw) => raw
            .trim()
            .parse::<OperatorStatus>()
            .map_err(|e| ValidationError::new("status", e))?,
        None => OperatorStatus::Active,
    };

    Ok(AvsOperator {
        // Addresses are case-insensitive hex; store one canonical form
        address: required_text(input.address, "address")?.to_lowercase(),
        stake: amount(required(input.stake, "stake")?, "stake")?,
        status,
        tasks_completed: non_negative_int(required(input.tasks_completed, "tasksCompleted")?, "tasksCompleted")?,
        reputation: ratio(required(input.reputation, "reputation")?, Decimal::ONE, "reputation")?,
        last_seen: optional_timestamp(input.last_seen, "lastSeen", now)?,
        id: new_id(),
    })
}
