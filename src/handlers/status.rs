use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;

use crate::error::ApiResult;
use crate::models::status::{StatusCheck, StatusCheckCreate};
use crate::services::{listings, records};
use crate::AppState;

/// Handler for POST /api/status
pub async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> ApiResult<Json<StatusCheck>> {
    let Json(input) = payload?;
    let check = records::create_status_check(state.store.as_ref(), input, Utc::now()).await?;
    Ok(Json(check))
}

/// Handler for GET /api/status
pub async fn list_status_checks(State(state): State<AppState>) -> ApiResult<Json<Vec<StatusCheck>>> {
    Ok(Json(listings::status_checks(state.store.as_ref()).await?))
}
