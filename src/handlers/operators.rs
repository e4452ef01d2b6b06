use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::error::ApiResult;
use crate::models::{
    auction::CreatedResponse,
    operator::{AvsOperator, AvsOperatorCreate},
};
use crate::services::{listings, records};
use crate::AppState;

/// Handler for GET /api/operators
pub async fn get_avs_operators(State(state): State<AppState>) -> ApiResult<Json<Vec<AvsOperator>>> {
    Ok(Json(listings::operators(state.store.as_ref()).await?))
}

/// Handler for POST /api/operators
/// Returns 409 when the address is already registered
pub async fn register_operator(
    State(state): State<AppState>,
    payload: Result<Json<AvsOperatorCreate>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(input) = payload?;
    let operator = records::register_operator(state.store.as_ref(), input, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: operator.id,
            message: "Operator registered".to_string(),
        }),
    ))
}
