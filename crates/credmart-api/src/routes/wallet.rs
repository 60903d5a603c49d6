//! Wallet session routes

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{ApiError, WalletConnectRequest, WalletResponse};
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wallet_status))
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
}

/// GET /wallet - Current wallet session
async fn wallet_status(State(state): State<AppState>) -> Json<WalletResponse> {
    let wallet = state.wallet().await;
    Json(WalletResponse {
        connected: wallet.is_some(),
        address: wallet.map(|w| w.address.to_string()),
    })
}

/// POST /wallet/connect - Connect a wallet and bind the client's signer
async fn connect(
    State(state): State<AppState>,
    Json(request): Json<WalletConnectRequest>,
) -> Result<Json<WalletResponse>, (StatusCode, Json<ApiError>)> {
    let wallet = state.connect_wallet(&request.address).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(e.to_string())),
        )
    })?;

    Ok(Json(WalletResponse {
        connected: true,
        address: Some(wallet.address.to_string()),
    }))
}

/// POST /wallet/disconnect - Drop the wallet session
async fn disconnect(State(state): State<AppState>) -> Json<WalletResponse> {
    state.disconnect_wallet().await;
    Json(WalletResponse {
        connected: false,
        address: None,
    })
}
