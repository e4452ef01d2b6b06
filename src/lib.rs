// src/lib.rs

use std::sync::Arc;

use config::ServiceConfig;
use store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: ServiceConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod auctions;
    pub mod auction_bids;
    pub mod avs_operators;
    pub mod pool_performance;
    pub mod status_checks;
}

pub mod services {
    pub mod aggregate;
    pub mod auction_detail;
    pub mod listings;
    pub mod records;
    pub mod validator;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;
