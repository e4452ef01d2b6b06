//! Auction handlers
//!
//! GET /api/auctions/summary, GET /api/auctions/recent,
//! GET /api/auctions/{id} and POST /api/auctions.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::error::ApiResult;
use crate::models::auction::{
    AuctionCreate, AuctionDetail, AuctionRecord, AuctionSummary, CreatedResponse,
};
use crate::services::{aggregate, auction_detail, listings, records};
use crate::AppState;

/// GET /api/auctions/summary
///
/// Recomputed from stored records on every request; an empty store yields
/// a zero summary rather than an error.
pub async fn get_auction_summary(State(state): State<AppState>) -> ApiResult<Json<AuctionSummary>> {
    let summary = aggregate::load_summary(state.store.as_ref(), &state.config, Utc::now()).await?;

    info!(
        active = summary.active_auctions,
        total_mev = %summary.total_mev_recovered,
        operators = summary.avs_operator_count,
        "Auction summary computed"
    );

    Ok(Json(summary))
}

/// GET /api/auctions/recent
pub async fn get_recent_auctions(State(state): State<AppState>) -> ApiResult<Json<Vec<AuctionRecord>>> {
    let auctions =
        listings::recent_auctions(state.store.as_ref(), state.config.recent_auctions_limit).await?;
    Ok(Json(auctions))
}

/// GET /api/auctions/{id}
///
/// # Response
/// - 200: Auction with participants ordered by submission time
/// - 404: No auction with that id
pub async fn get_auction_details(
    State(state): State<AppState>,
    Path(auction_id): Path<String>,
) -> ApiResult<Json<AuctionDetail>> {
    Ok(Json(
        auction_detail::load_auction_detail(state.store.as_ref(), &auction_id).await?,
    ))
}

/// POST /api/auctions
///
/// Used by the hook relayer to record settled auctions.
///
/// # Response
/// - 201: `{id, message}`
/// - 422: Missing or invalid field
pub async fn create_auction(
    State(state): State<AppState>,
    payload: Result<Json<AuctionCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(input) = payload?;
    let auction = records::create_auction(state.store.as_ref(), input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: auction.id,
            message: "Auction created successfully".to_string(),
        }),
    ))
}
