//! Router assembly

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{auctions, health, operators, pools, status};
use crate::AppState;

/// Create CORS layer. `*` allows any origin without credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any)
            .max_age(Duration::from_secs(600));
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN, header::AUTHORIZATION])
        .allow_credentials(true)
        .allow_origin(origins)
        .max_age(Duration::from_secs(600))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/status",
            get(status::list_status_checks).post(status::create_status_check),
        )
        .route("/auctions", post(auctions::create_auction))
        .route("/auctions/summary", get(auctions::get_auction_summary))
        .route("/auctions/recent", get(auctions::get_recent_auctions))
        .route("/auctions/{id}", get(auctions::get_auction_details))
        .route(
            "/pools/performance",
            get(pools::get_pool_performance).post(pools::create_pool_snapshot),
        )
        .route("/pools/{id}/metrics", get(pools::get_pool_metrics))
        .route(
            "/operators",
            get(operators::get_avs_operators).post(operators::register_operator),
        )
}

/// Full application router with middleware applied.
/// The banner answers at `/` and at the `/api` base path.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/api", get(health::root))
        .route("/api/", get(health::root))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}
