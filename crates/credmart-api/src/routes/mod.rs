//! API route handlers

pub mod health;
pub mod market;
pub mod wallet;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/faucet", post(market::faucet))
        .nest("/wallet", wallet::router())
        .nest("/market", market::router())
        .with_state(state)
}
