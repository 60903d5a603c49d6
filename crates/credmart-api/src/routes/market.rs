//! Marketplace routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use chain_gateway::TokenParams;
use credmart_core::{Address, CredentialId, StableAmount, TokenAmount};
use market::{translate_error, MarketError};

use crate::dto::{
    ApiError, BalanceResponse, ClaimResponse, CreateMarketRequest, CreateMarketResponse,
    CreateTokenRequest, CreateTokenResponse, FaucetRequest, LiquidityRequest, LiquidityResponse,
    PoolResponse, QuoteRequest, QuoteResponse, RewardsResponse, TradeRequest, TradeResponse,
    TradeSide, TxResponse,
};
use crate::AppState;

type ErrorResponse = (StatusCode, Json<ApiError>);

/// Create marketplace routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance/{address}", get(get_balance))
        .route("/pools/{credential}", get(get_pool))
        .route("/pools", post(create_market))
        .route("/quote", post(quote))
        .route("/tokens", post(create_token))
        .route("/trades", post(trade))
        .route("/liquidity", post(add_liquidity))
        .route("/rewards/{credential}/{address}", get(get_rewards))
        .route("/rewards/{credential}/claim", post(claim_rewards))
}

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::bad_request(message)),
    )
}

/// Map a marketplace error to a status code and translated message
fn market_error(err: MarketError) -> ErrorResponse {
    let message = translate_error(&err);
    let (status, code) = match &err {
        MarketError::SignerRequired => (StatusCode::UNAUTHORIZED, "signer_required"),
        MarketError::PoolNotFound { .. } => (StatusCode::NOT_FOUND, "pool_not_found"),
        MarketError::InsufficientBalance { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_balance")
        }
        MarketError::InsufficientLiquidity => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_liquidity")
        }
        MarketError::SlippageExceeded => (StatusCode::UNPROCESSABLE_ENTITY, "slippage_exceeded"),
        MarketError::DeadlineExpired => (StatusCode::UNPROCESSABLE_ENTITY, "deadline_expired"),
        MarketError::ApprovalFailed { .. } => (StatusCode::BAD_GATEWAY, "approval_failed"),
        MarketError::ActionFailed { .. } => (StatusCode::BAD_GATEWAY, "action_failed"),
        MarketError::Reverted { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "contract_revert"),
        MarketError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
        MarketError::Gateway(_) => (StatusCode::BAD_GATEWAY, "gateway_error"),
        MarketError::Core(_) => (StatusCode::BAD_REQUEST, "bad_request"),
    };
    (status, Json(ApiError::new(code, message)))
}

/// Accept either a human label or a 0x-prefixed hex identifier
fn parse_credential(s: &str) -> Result<CredentialId, ErrorResponse> {
    let result = if s.starts_with("0x") {
        CredentialId::from_hex(s)
    } else {
        CredentialId::from_label(s)
    };
    result.map_err(|e| bad_request(e.to_string()))
}

fn parse_address(s: &str) -> Result<Address, ErrorResponse> {
    Address::parse(s).map_err(|e| bad_request(e.to_string()))
}

fn parse_stable(s: &str) -> Result<StableAmount, ErrorResponse> {
    StableAmount::parse(s).map_err(|e| bad_request(e.to_string()))
}

fn parse_token_amount(s: &str) -> Result<TokenAmount, ErrorResponse> {
    TokenAmount::parse(s).map_err(|e| bad_request(e.to_string()))
}

/// GET /market/balance/{address} - Stablecoin balance
async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let address = parse_address(&address)?;
    let balance = state
        .client()
        .stable_balance(&address)
        .await
        .map_err(market_error)?;

    Ok(Json(BalanceResponse {
        address: address.to_string(),
        balance: balance.format(),
        units: balance.units(),
    }))
}

/// GET /market/pools/{credential} - Pool snapshot
async fn get_pool(
    State(state): State<AppState>,
    Path(credential): Path<String>,
) -> Result<Json<PoolResponse>, ErrorResponse> {
    let id = parse_credential(&credential)?;
    let pool = state
        .client()
        .get_pool(id)
        .await
        .map_err(market_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::not_found(format!(
                    "No market for credential: {credential}"
                ))),
            )
        })?;

    Ok(Json(PoolResponse {
        credential: id.to_string(),
        token: pool.token.to_string(),
        token_reserves: pool.token_reserves.format(),
        stable_reserves: pool.stable_reserves.format(),
        total_liquidity: pool.total_liquidity,
        last_price: pool.last_price,
        is_active: pool.is_active,
    }))
}

/// POST /market/quote - Price a prospective trade
async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ErrorResponse> {
    let id = parse_credential(&request.credential)?;

    let (quote, amount_out, min_suggested) = match request.side {
        TradeSide::Buy => {
            let amount_in = parse_stable(&request.amount_in)?;
            let q = state
                .client()
                .buy_quote(id, amount_in)
                .await
                .map_err(market_error)?;
            (
                q,
                TokenAmount::from_units(q.amount_out).format(),
                TokenAmount::from_units(q.min_output_suggested).format(),
            )
        }
        TradeSide::Sell => {
            let amount_in = parse_token_amount(&request.amount_in)?;
            let q = state
                .client()
                .sell_quote(id, amount_in)
                .await
                .map_err(market_error)?;
            (
                q,
                StableAmount::from_units(q.amount_out).format(),
                StableAmount::from_units(q.min_output_suggested).format(),
            )
        }
    };

    Ok(Json(QuoteResponse {
        side: request.side,
        amount_in: request.amount_in,
        amount_out,
        fee: quote.fee.format(),
        effective_price: quote.effective_price,
        min_output_suggested: min_suggested,
    }))
}

/// POST /market/tokens - Create a credential token
async fn create_token(
    State(state): State<AppState>,
    Json(request): Json<CreateTokenRequest>,
) -> Result<Json<CreateTokenResponse>, ErrorResponse> {
    let id = parse_credential(&request.credential)?;
    let params = TokenParams {
        name: request.name,
        symbol: request.symbol,
        emission_rate: parse_token_amount(&request.emission_rate)?,
        max_supply: parse_token_amount(&request.max_supply)?,
    };

    let creation = state
        .client()
        .create_credential_token(id, &params)
        .await
        .map_err(market_error)?;

    Ok(Json(CreateTokenResponse {
        token: creation.token.to_string(),
        approval_tx: creation.approval_tx.map(|tx| tx.to_string()),
        tx_hash: creation.receipt.tx_hash.to_string(),
    }))
}

/// POST /market/pools - Create a market with initial liquidity
async fn create_market(
    State(state): State<AppState>,
    Json(request): Json<CreateMarketRequest>,
) -> Result<Json<CreateMarketResponse>, ErrorResponse> {
    let id = parse_credential(&request.credential)?;
    let token = parse_address(&request.token)?;
    let token_amount = parse_token_amount(&request.token_amount)?;
    let stable_amount = parse_stable(&request.stable_amount)?;

    let creation = state
        .client()
        .create_market_with_liquidity(id, &token, token_amount, stable_amount)
        .await
        .map_err(market_error)?;

    Ok(Json(CreateMarketResponse {
        approvals: creation.approvals.iter().map(|tx| tx.to_string()).collect(),
        tx_hash: creation.receipt.tx_hash.to_string(),
    }))
}

/// POST /market/trades - Execute a slippage-bounded trade
async fn trade(
    State(state): State<AppState>,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeResponse>, ErrorResponse> {
    let id = parse_credential(&request.credential)?;

    let (receipt, amount_out, min_output) = match request.side {
        TradeSide::Buy => {
            let amount_in = parse_stable(&request.amount_in)?;
            let r = state
                .client()
                .buy(id, amount_in, request.slippage_bps)
                .await
                .map_err(market_error)?;
            (
                r.clone(),
                TokenAmount::from_units(r.quote.amount_out).format(),
                TokenAmount::from_units(r.min_output).format(),
            )
        }
        TradeSide::Sell => {
            let amount_in = parse_token_amount(&request.amount_in)?;
            let r = state
                .client()
                .sell(id, amount_in, request.slippage_bps)
                .await
                .map_err(market_error)?;
            (
                r.clone(),
                StableAmount::from_units(r.quote.amount_out).format(),
                StableAmount::from_units(r.min_output).format(),
            )
        }
    };

    Ok(Json(TradeResponse {
        tx_hash: receipt.receipt.tx_hash.to_string(),
        approval_tx: receipt.approval_tx.map(|tx| tx.to_string()),
        amount_out,
        min_output,
        effective_price: receipt.quote.effective_price,
    }))
}

/// POST /market/liquidity - Add liquidity to an existing market
async fn add_liquidity(
    State(state): State<AppState>,
    Json(request): Json<LiquidityRequest>,
) -> Result<Json<LiquidityResponse>, ErrorResponse> {
    let id = parse_credential(&request.credential)?;
    let token_amount = parse_token_amount(&request.token_amount)?;
    let stable_amount = parse_stable(&request.stable_amount)?;

    let outcome = state
        .client()
        .add_liquidity(id, token_amount, stable_amount, request.slippage_bps)
        .await
        .map_err(market_error)?;

    Ok(Json(LiquidityResponse {
        tx_hash: outcome.receipt.tx_hash.to_string(),
        approvals: outcome.approvals.iter().map(|tx| tx.to_string()).collect(),
        min_liquidity: outcome.min_liquidity,
    }))
}

/// GET /market/rewards/{credential}/{address} - Pending rewards
async fn get_rewards(
    State(state): State<AppState>,
    Path((credential, address)): Path<(String, String)>,
) -> Result<Json<RewardsResponse>, ErrorResponse> {
    let id = parse_credential(&credential)?;
    let address = parse_address(&address)?;

    let pending = state
        .client()
        .pending_rewards(id, &address)
        .await
        .map_err(market_error)?;

    Ok(Json(RewardsResponse {
        credential: id.to_string(),
        address: address.to_string(),
        pending: pending.format(),
    }))
}

/// POST /market/rewards/{credential}/claim - Claim accrued rewards
async fn claim_rewards(
    State(state): State<AppState>,
    Path(credential): Path<String>,
) -> Result<Json<ClaimResponse>, ErrorResponse> {
    let id = parse_credential(&credential)?;
    let receipt = state
        .client()
        .claim_rewards(id)
        .await
        .map_err(market_error)?;

    Ok(Json(ClaimResponse {
        tx_hash: receipt.tx_hash.to_string(),
    }))
}

/// POST /faucet - Mint test stablecoin to the connected wallet
pub async fn faucet(
    State(state): State<AppState>,
    Json(request): Json<FaucetRequest>,
) -> Result<Json<TxResponse>, ErrorResponse> {
    let amount = parse_stable(&request.amount)?;
    let receipt = state
        .client()
        .mint_test_stable(amount)
        .await
        .map_err(market_error)?;

    Ok(Json(TxResponse {
        tx_hash: receipt.tx_hash.to_string(),
        block_number: receipt.block_number,
    }))
}
