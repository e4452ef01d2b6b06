use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::error::ApiResult;
use crate::models::{
    auction::CreatedResponse,
    pool::{PoolMetrics, PoolPerformance, PoolPerformanceCreate},
};
use crate::services::{aggregate, listings, records};
use crate::AppState;

/// Handler for GET /api/pools/performance
/// Returns the latest snapshot of every tracked pool
pub async fn get_pool_performance(State(state): State<AppState>) -> ApiResult<Json<Vec<PoolPerformance>>> {
    Ok(Json(listings::pool_performance(state.store.as_ref()).await?))
}

/// Handler for POST /api/pools/performance
pub async fn create_pool_snapshot(
    State(state): State<AppState>,
    payload: Result<Json<PoolPerformanceCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(input) = payload?;
    let snapshot = records::create_pool_snapshot(state.store.as_ref(), input, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: snapshot.id,
            message: "Pool snapshot recorded".to_string(),
        }),
    ))
}

/// Handler for GET /api/pools/{id}/metrics
/// Unknown pools report zero activity
pub async fn get_pool_metrics(
    State(state): State<AppState>,
    Path(pool_id): Path<String>,
) -> ApiResult<Json<PoolMetrics>> {
    let metrics = aggregate::load_pool_metrics(state.store.as_ref(), &state.config, &pool_id).await?;
    Ok(Json(metrics))
}
