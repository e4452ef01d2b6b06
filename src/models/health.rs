use serde::{Deserialize, Serialize};

/// Response for GET /api/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub services: ServiceStatuses,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatuses {
    /// "connected" or "unavailable"
    pub database: String,
    /// "operational", "no_active_operators" or "unknown"
    pub avs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}
