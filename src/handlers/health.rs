//! Health check handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use tracing::warn;

use crate::models::health::{HealthResponse, RootResponse, ServiceStatuses};
use crate::models::operator::{AvsOperator, OperatorStatus};
use crate::store;
use crate::AppState;

/// Service banner for GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "EigenLVR API - Loss Versus Rebalancing Mitigation System".to_string(),
    })
}

/// GET /api/health
///
/// Always answers 200; a store outage is reported as "degraded".
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = state.store.as_ref();

    let (database, avs) = match records.ping().await {
        Ok(()) => {
            let avs = match store::fetch_all::<AvsOperator>(records).await {
                Ok(operators) if operators.iter().any(|o| o.status == OperatorStatus::Active) => {
                    "operational"
                }
                Ok(_) => "no_active_operators",
                Err(e) => {
                    warn!(error = %e, "Failed to read operators for health check");
                    "unknown"
                }
            };
            ("connected", avs)
        }
        Err(e) => {
            warn!(error = %e, "Record store ping failed");
            ("unavailable", "unknown")
        }
    };

    let status = if database == "connected" { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceStatuses {
            database: database.to_string(),
            avs: avs.to_string(),
        },
    })
}
