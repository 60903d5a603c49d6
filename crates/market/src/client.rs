//! Marketplace client
//!
//! Single point of contact between callers and the four on-chain
//! contracts. The client owns no persistent state: all state lives
//! on-chain, reached through the injected [`ContractGateway`]. Read
//! methods are safe to issue concurrently; dependent writes are awaited
//! to confirmation before the next one is submitted, never pipelined.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use chain_gateway::{
    reasons, AmountOut, ContractGateway, GatewayError, PoolState, Signer, SwapDirection,
    TokenParams, TxReceipt,
};
use credmart_core::{Address, ContractAddresses, CredentialId, MarketConfig, StableAmount,
    TokenAmount, TxHash};

use crate::calculator;
use crate::constants::{DEFAULT_SLIPPAGE_BPS, MINT_FEE};
use crate::state::{
    LiquidityReceipt, MarketCreation, MarketError, Quote, Result, TokenCreation, TradePhase,
    TradeReceipt,
};

/// Map a revert into its typed marketplace error where the reason is in
/// the known vocabulary; anything else stays a raw `Reverted`.
fn classify(err: MarketError, id: CredentialId) -> MarketError {
    match err {
        MarketError::Gateway(GatewayError::Revert { reason }) => {
            let known = match reason.as_str() {
                reasons::INSUFFICIENT_LIQUIDITY => Some(MarketError::InsufficientLiquidity),
                reasons::SLIPPAGE_EXCEEDED => Some(MarketError::SlippageExceeded),
                reasons::DEADLINE_EXPIRED => Some(MarketError::DeadlineExpired),
                reasons::POOL_NOT_FOUND => Some(MarketError::PoolNotFound { id }),
                _ => None,
            };
            known.unwrap_or(MarketError::Reverted { reason })
        }
        other => other,
    }
}

/// Tag an approval-step failure. Timeouts keep their own variant: an
/// unconfirmed approval is not known to have failed.
fn approval_failed(op: &'static str, err: MarketError) -> MarketError {
    match err {
        MarketError::Gateway(source) => MarketError::ApprovalFailed { op, source },
        other => other,
    }
}

/// Tag an action-step failure that happened after fresh approvals
/// confirmed, so the caller knows to retry without re-approving.
fn action_failed(
    op: &'static str,
    approvals: Vec<TxHash>,
    err: MarketError,
    id: CredentialId,
) -> MarketError {
    match err {
        MarketError::Gateway(source) if !approvals.is_empty() => MarketError::ActionFailed {
            op,
            approvals,
            source,
        },
        other => classify(other, id),
    }
}

fn build_quote(direction: SwapDirection, amount_in: u128, out: AmountOut) -> Quote {
    let (in_decimal, out_decimal) = match direction {
        SwapDirection::StableToToken => (
            StableAmount::from_units(amount_in).to_f64(),
            TokenAmount::from_units(out.amount_out).to_f64(),
        ),
        SwapDirection::TokenToStable => (
            TokenAmount::from_units(amount_in).to_f64(),
            StableAmount::from_units(out.amount_out).to_f64(),
        ),
    };
    Quote {
        direction,
        amount_in,
        amount_out: out.amount_out,
        fee: StableAmount::from_units(out.fee),
        effective_price: calculator::effective_price(in_decimal, out_decimal),
        min_output_suggested: calculator::min_output_after_slippage(
            out.amount_out,
            DEFAULT_SLIPPAGE_BPS,
        ),
    }
}

/// Typed, unit-converted, slippage-protected access to the credential
/// marketplace contracts.
pub struct MarketplaceClient {
    gateway: Arc<dyn ContractGateway>,
    config: MarketConfig,
    signer: RwLock<Option<Signer>>,
}

impl MarketplaceClient {
    /// Read-only client. Mutating operations fail with
    /// [`MarketError::SignerRequired`] until a signer is attached.
    pub fn new(gateway: Arc<dyn ContractGateway>, config: MarketConfig) -> Self {
        Self {
            gateway,
            config,
            signer: RwLock::new(None),
        }
    }

    /// Read-write client bound to a signer from the start
    pub fn with_signer(
        gateway: Arc<dyn ContractGateway>,
        config: MarketConfig,
        signer: Signer,
    ) -> Self {
        Self {
            gateway,
            config,
            signer: RwLock::new(Some(signer)),
        }
    }

    /// Attach or replace the write capability. All mutating operations
    /// pick up the new signer at once; there are no per-contract handles
    /// left bound to the old one.
    pub async fn set_signer(&self, signer: Signer) {
        info!(address = %signer.address(), "signer attached");
        *self.signer.write().await = Some(signer);
    }

    /// Drop the write capability, downgrading to a read-only client
    pub async fn clear_signer(&self) {
        *self.signer.write().await = None;
    }

    /// Address of the currently attached signer, if any
    pub async fn signer_address(&self) -> Option<Address> {
        self.signer.read().await.as_ref().map(|s| s.address().clone())
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn contracts(&self) -> &ContractAddresses {
        self.gateway.contracts()
    }

    async fn signer(&self) -> Result<Signer> {
        self.signer
            .read()
            .await
            .clone()
            .ok_or(MarketError::SignerRequired)
    }

    /// Await a write to confirmation, bounded by the configured timeout.
    /// On expiry the transaction's on-chain status is unknown — it may
    /// still land — so the error says exactly that.
    async fn await_write<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = chain_gateway::Result<T>>,
    {
        let secs = self.config.confirm_timeout_secs;
        match tokio::time::timeout(Duration::from_secs(secs), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(MarketError::Gateway(e)),
            Err(_) => {
                warn!(after_secs = secs, "write unconfirmed at timeout; status unknown");
                Err(MarketError::Timeout { after_secs: secs })
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn stable_balance(&self, owner: &Address) -> Result<StableAmount> {
        Ok(self.gateway.stable_balance_of(owner).await?)
    }

    pub async fn token_balance(&self, token: &Address, owner: &Address) -> Result<TokenAmount> {
        Ok(self.gateway.token_balance_of(token, owner).await?)
    }

    pub async fn get_pool(&self, id: CredentialId) -> Result<Option<PoolState>> {
        Ok(self.gateway.get_pool(id).await?)
    }

    pub async fn token_price(&self, id: CredentialId) -> Result<f64> {
        self.gateway
            .get_token_price(id)
            .await
            .map_err(|e| classify(MarketError::Gateway(e), id))
    }

    pub async fn pending_rewards(&self, id: CredentialId, owner: &Address) -> Result<StableAmount> {
        Ok(self.gateway.pending_rewards(id, owner).await?)
    }

    pub async fn revenue_pool(&self) -> Result<StableAmount> {
        Ok(self.gateway.revenue_pool().await?)
    }

    /// Fee-aware quote for buying tokens with stablecoin. Pure read,
    /// safe at arbitrary frequency.
    pub async fn buy_quote(&self, id: CredentialId, amount_in: StableAmount) -> Result<Quote> {
        let out = self
            .gateway
            .get_amount_out(id, SwapDirection::StableToToken, amount_in.units())
            .await
            .map_err(|e| classify(MarketError::Gateway(e), id))?;
        let quote = build_quote(SwapDirection::StableToToken, amount_in.units(), out);
        debug!(credential = %id, amount_in = %amount_in, amount_out = quote.amount_out, "buy quote");
        Ok(quote)
    }

    /// Fee-aware quote for selling tokens into stablecoin
    pub async fn sell_quote(&self, id: CredentialId, amount_in: TokenAmount) -> Result<Quote> {
        let out = self
            .gateway
            .get_amount_out(id, SwapDirection::TokenToStable, amount_in.units())
            .await
            .map_err(|e| classify(MarketError::Gateway(e), id))?;
        let quote = build_quote(SwapDirection::TokenToStable, amount_in.units(), out);
        debug!(credential = %id, amount_in = %amount_in, amount_out = quote.amount_out, "sell quote");
        Ok(quote)
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Test-only faucet mint of stablecoin to the signer
    pub async fn mint_test_stable(&self, amount: StableAmount) -> Result<TxReceipt> {
        let signer = self.signer().await?;
        let receipt = self
            .await_write(self.gateway.stable_free_mint(&signer, amount))
            .await?;
        info!(amount = %amount, tx = %receipt.tx_hash, "faucet mint confirmed");
        Ok(receipt)
    }

    /// Create a credential token.
    ///
    /// Two sequential transactions: approve the minting fee to the fee
    /// collector (skipped when the allowance is already in place), then
    /// submit creation. If creation fails after a fresh approval
    /// confirmed, the error is [`MarketError::ActionFailed`] carrying the
    /// approval hash — retry creation without re-approving.
    pub async fn create_credential_token(
        &self,
        id: CredentialId,
        params: &TokenParams,
    ) -> Result<TokenCreation> {
        let signer = self.signer().await?;

        let balance = self.gateway.stable_balance_of(signer.address()).await?;
        if balance < MINT_FEE {
            return Err(MarketError::InsufficientBalance {
                asset: "stablecoin",
                required: MINT_FEE.format(),
                available: balance.format(),
            });
        }

        let fee_collector = self.gateway.contracts().fee_collector.clone();
        let approval_tx = self
            .ensure_stable_allowance(&signer, &fee_collector, MINT_FEE, "create_token")
            .await?;

        info!(credential = %id, symbol = %params.symbol, "submitting token creation");
        let approvals: Vec<TxHash> = approval_tx.clone().into_iter().collect();
        let created = self
            .await_write(self.gateway.create_token(&signer, id, params))
            .await
            .map_err(|e| action_failed("create_token", approvals, e, id))?;
        info!(token = %created.token, tx = %created.receipt.tx_hash, "token created");

        Ok(TokenCreation {
            token: created.token,
            approval_tx,
            receipt: created.receipt,
        })
    }

    /// Create the AMM pool for a credential token and seed it.
    ///
    /// Requires two prior approvals (token and stablecoin to the AMM);
    /// both are awaited before pool creation is submitted. A failure
    /// after the approvals confirmed (e.g. `POOL_EXISTS`) is a
    /// step-tagged [`MarketError::ActionFailed`].
    pub async fn create_market_with_liquidity(
        &self,
        id: CredentialId,
        token: &Address,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
    ) -> Result<MarketCreation> {
        let signer = self.signer().await?;

        let token_balance = self.gateway.token_balance_of(token, signer.address()).await?;
        if token_balance < token_amount {
            return Err(MarketError::InsufficientBalance {
                asset: "token",
                required: token_amount.format(),
                available: token_balance.format(),
            });
        }
        let stable_balance = self.gateway.stable_balance_of(signer.address()).await?;
        if stable_balance < stable_amount {
            return Err(MarketError::InsufficientBalance {
                asset: "stablecoin",
                required: stable_amount.format(),
                available: stable_balance.format(),
            });
        }

        let amm = self.gateway.contracts().amm.clone();
        let mut approvals = Vec::new();
        if let Some(tx) = self
            .ensure_token_allowance(&signer, token, &amm, token_amount, "create_market")
            .await?
        {
            approvals.push(tx);
        }
        if let Some(tx) = self
            .ensure_stable_allowance(&signer, &amm, stable_amount, "create_market")
            .await?
        {
            approvals.push(tx);
        }

        info!(credential = %id, tokens = %token_amount, stable = %stable_amount, "creating market");
        let receipt = self
            .await_write(self.gateway.create_pool(&signer, id, token, token_amount, stable_amount))
            .await
            .map_err(|e| action_failed("create_market", approvals.clone(), e, id))?;
        info!(tx = %receipt.tx_hash, "market created");

        Ok(MarketCreation { approvals, receipt })
    }

    /// Buy credential tokens with stablecoin.
    ///
    /// Approve-then-swap; the just-fetched quote becomes a minimum-output
    /// bound of `floor(quote * (1 - tolerance))`, enforced atomically
    /// on-chain together with a deadline of now plus the configured
    /// window.
    pub async fn buy(
        &self,
        id: CredentialId,
        amount_in: StableAmount,
        slippage_bps: Option<u32>,
    ) -> Result<TradeReceipt> {
        let signer = self.signer().await?;
        let bps = slippage_bps.unwrap_or(self.config.default_slippage_bps);

        let balance = self.gateway.stable_balance_of(signer.address()).await?;
        if balance < amount_in {
            return Err(MarketError::InsufficientBalance {
                asset: "stablecoin",
                required: amount_in.format(),
                available: balance.format(),
            });
        }

        let quote = self.buy_quote(id, amount_in).await?;
        let min_output = calculator::min_output_after_slippage(quote.amount_out, bps);
        let deadline = calculator::swap_deadline(self.config.deadline_window_secs);

        let amm = self.gateway.contracts().amm.clone();
        let approval_tx = self
            .ensure_stable_allowance(&signer, &amm, amount_in, "buy")
            .await?;

        info!(
            credential = %id,
            phase = %TradePhase::Submitted,
            amount_in = %amount_in,
            min_output,
            "submitting buy"
        );
        let receipt = self
            .await_write(self.gateway.swap_stable_for_tokens(
                &signer,
                id,
                amount_in,
                TokenAmount::from_units(min_output),
                deadline,
            ))
            .await
            .map_err(|e| {
                warn!(credential = %id, phase = %TradePhase::Reverted, "buy failed");
                classify(e, id)
            })?;
        info!(tx = %receipt.tx_hash, phase = %TradePhase::Confirmed, "buy confirmed");

        Ok(TradeReceipt {
            receipt,
            approval_tx,
            quote,
            min_output,
        })
    }

    /// Sell credential tokens for stablecoin. Mirror of [`Self::buy`].
    pub async fn sell(
        &self,
        id: CredentialId,
        amount_in: TokenAmount,
        slippage_bps: Option<u32>,
    ) -> Result<TradeReceipt> {
        let signer = self.signer().await?;
        let bps = slippage_bps.unwrap_or(self.config.default_slippage_bps);

        let pool = self
            .get_pool(id)
            .await?
            .ok_or(MarketError::PoolNotFound { id })?;

        let balance = self
            .gateway
            .token_balance_of(&pool.token, signer.address())
            .await?;
        if balance < amount_in {
            return Err(MarketError::InsufficientBalance {
                asset: "token",
                required: amount_in.format(),
                available: balance.format(),
            });
        }

        let quote = self.sell_quote(id, amount_in).await?;
        let min_output = calculator::min_output_after_slippage(quote.amount_out, bps);
        let deadline = calculator::swap_deadline(self.config.deadline_window_secs);

        let amm = self.gateway.contracts().amm.clone();
        let approval_tx = self
            .ensure_token_allowance(&signer, &pool.token, &amm, amount_in, "sell")
            .await?;

        info!(
            credential = %id,
            phase = %TradePhase::Submitted,
            amount_in = %amount_in,
            min_output,
            "submitting sell"
        );
        let receipt = self
            .await_write(self.gateway.swap_tokens_for_stable(
                &signer,
                id,
                amount_in,
                StableAmount::from_units(min_output),
                deadline,
            ))
            .await
            .map_err(|e| {
                warn!(credential = %id, phase = %TradePhase::Reverted, "sell failed");
                classify(e, id)
            })?;
        info!(tx = %receipt.tx_hash, phase = %TradePhase::Confirmed, "sell confirmed");

        Ok(TradeReceipt {
            receipt,
            approval_tx,
            quote,
            min_output,
        })
    }

    /// Add liquidity to an existing pool.
    ///
    /// The minimum-liquidity bound is derived from the pool's current
    /// share supply; the first provision to an empty pool is exempt.
    pub async fn add_liquidity(
        &self,
        id: CredentialId,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
        slippage_bps: Option<u32>,
    ) -> Result<LiquidityReceipt> {
        let signer = self.signer().await?;
        let bps = slippage_bps.unwrap_or(self.config.default_slippage_bps);

        let pool = self
            .get_pool(id)
            .await?
            .ok_or(MarketError::PoolNotFound { id })?;

        let token_balance = self
            .gateway
            .token_balance_of(&pool.token, signer.address())
            .await?;
        if token_balance < token_amount {
            return Err(MarketError::InsufficientBalance {
                asset: "token",
                required: token_amount.format(),
                available: token_balance.format(),
            });
        }
        let stable_balance = self.gateway.stable_balance_of(signer.address()).await?;
        if stable_balance < stable_amount {
            return Err(MarketError::InsufficientBalance {
                asset: "stablecoin",
                required: stable_amount.format(),
                available: stable_balance.format(),
            });
        }

        let min_liquidity = if pool.total_liquidity == 0 {
            0
        } else {
            let expected = calculator::expected_liquidity_shares(
                token_amount.units(),
                stable_amount.units(),
                &pool,
            );
            calculator::min_output_after_slippage(expected, bps)
        };
        let deadline = calculator::swap_deadline(self.config.deadline_window_secs);

        let amm = self.gateway.contracts().amm.clone();
        let mut approvals = Vec::new();
        if let Some(tx) = self
            .ensure_token_allowance(&signer, &pool.token, &amm, token_amount, "add_liquidity")
            .await?
        {
            approvals.push(tx);
        }
        if let Some(tx) = self
            .ensure_stable_allowance(&signer, &amm, stable_amount, "add_liquidity")
            .await?
        {
            approvals.push(tx);
        }

        info!(credential = %id, min_liquidity, "adding liquidity");
        let receipt = self
            .await_write(self.gateway.add_liquidity(
                &signer,
                id,
                token_amount,
                stable_amount,
                min_liquidity,
                deadline,
            ))
            .await
            .map_err(|e| classify(e, id))?;
        info!(tx = %receipt.tx_hash, "liquidity added");

        Ok(LiquidityReceipt {
            receipt,
            approvals,
            min_liquidity,
        })
    }

    /// Claim the signer's accrued rewards for a credential. A claim with
    /// zero pending balance succeeds as a zero-value transfer.
    pub async fn claim_rewards(&self, id: CredentialId) -> Result<TxReceipt> {
        let signer = self.signer().await?;
        let receipt = self
            .await_write(self.gateway.claim_rewards(&signer, id))
            .await
            .map_err(|e| classify(e, id))?;
        info!(credential = %id, tx = %receipt.tx_hash, "rewards claimed");
        Ok(receipt)
    }

    // ------------------------------------------------------------------
    // Approval sequencing
    // ------------------------------------------------------------------

    /// Ensure the spender can move `amount` of the signer's stablecoin,
    /// approving exactly that amount if the current allowance falls
    /// short. Returns the approval hash when one was submitted.
    async fn ensure_stable_allowance(
        &self,
        signer: &Signer,
        spender: &Address,
        amount: StableAmount,
        op: &'static str,
    ) -> Result<Option<TxHash>> {
        let current = self
            .gateway
            .stable_allowance(signer.address(), spender)
            .await?;
        if current >= amount {
            return Ok(None);
        }

        debug!(op, phase = %TradePhase::Approving, amount = %amount, "approving stablecoin");
        let receipt = self
            .await_write(self.gateway.stable_approve(signer, spender, amount))
            .await
            .map_err(|e| approval_failed(op, e))?;
        Ok(Some(receipt.tx_hash))
    }

    /// Token-side counterpart of [`Self::ensure_stable_allowance`]
    async fn ensure_token_allowance(
        &self,
        signer: &Signer,
        token: &Address,
        spender: &Address,
        amount: TokenAmount,
        op: &'static str,
    ) -> Result<Option<TxHash>> {
        let current = self
            .gateway
            .token_allowance(token, signer.address(), spender)
            .await?;
        if current >= amount {
            return Ok(None);
        }

        debug!(op, phase = %TradePhase::Approving, amount = %amount, "approving token");
        let receipt = self
            .await_write(self.gateway.token_approve(signer, token, spender, amount))
            .await
            .map_err(|e| approval_failed(op, e))?;
        Ok(Some(receipt.tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_gateway::SimChain;

    fn test_params() -> TokenParams {
        TokenParams {
            name: "Sample".into(),
            symbol: "SMP".into(),
            emission_rate: TokenAmount::parse("100").unwrap(),
            max_supply: TokenAmount::parse("1000000").unwrap(),
        }
    }

    fn cred(label: &str) -> CredentialId {
        CredentialId::from_label(label).unwrap()
    }

    fn signed_client() -> MarketplaceClient {
        let signer = Signer::new(Address::new(format!("0x{:040x}", 0xbeef)));
        MarketplaceClient::with_signer(
            Arc::new(SimChain::new()),
            MarketConfig::default(),
            signer,
        )
    }

    async fn client_with_market(client: &MarketplaceClient, id: CredentialId) -> Address {
        client
            .mint_test_stable(StableAmount::parse("1000").unwrap())
            .await
            .unwrap();
        let creation = client
            .create_credential_token(id, &test_params())
            .await
            .unwrap();
        client
            .create_market_with_liquidity(
                id,
                &creation.token,
                TokenAmount::parse("1000").unwrap(),
                StableAmount::parse("100").unwrap(),
            )
            .await
            .unwrap();
        creation.token
    }

    #[tokio::test]
    async fn test_writes_require_signer() {
        let client =
            MarketplaceClient::new(Arc::new(SimChain::new()), MarketConfig::default());
        let result = client
            .mint_test_stable(StableAmount::parse("1").unwrap())
            .await;
        assert!(matches!(result, Err(MarketError::SignerRequired)));

        let result = client.buy(cred("x"), StableAmount::parse("1").unwrap(), None).await;
        assert!(matches!(result, Err(MarketError::SignerRequired)));
    }

    #[tokio::test]
    async fn test_set_signer_upgrades_client() {
        let client =
            MarketplaceClient::new(Arc::new(SimChain::new()), MarketConfig::default());
        assert!(client.signer_address().await.is_none());

        client
            .set_signer(Signer::new(Address::new(format!("0x{:040x}", 7))))
            .await;
        client
            .mint_test_stable(StableAmount::parse("5").unwrap())
            .await
            .unwrap();

        client.clear_signer().await;
        let result = client.mint_test_stable(StableAmount::parse("5").unwrap()).await;
        assert!(matches!(result, Err(MarketError::SignerRequired)));
    }

    #[tokio::test]
    async fn test_quote_for_unknown_market() {
        let client = signed_client();
        let result = client
            .buy_quote(cred("missing"), StableAmount::parse("1").unwrap())
            .await;
        assert!(matches!(result, Err(MarketError::PoolNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_token_pre_checks_fee_balance() {
        let client = signed_client();
        let result = client
            .create_credential_token(cred("cred"), &test_params())
            .await;
        assert!(matches!(
            result,
            Err(MarketError::InsufficientBalance { asset: "stablecoin", .. })
        ));
    }

    #[tokio::test]
    async fn test_buy_pre_checks_balance() {
        let client = signed_client();
        let id = cred("cred");
        client_with_market(&client, id).await;

        let result = client
            .buy(id, StableAmount::parse("100000").unwrap(), None)
            .await;
        assert!(matches!(
            result,
            Err(MarketError::InsufficientBalance { asset: "stablecoin", .. })
        ));
    }

    #[tokio::test]
    async fn test_buy_records_bound_and_approval() {
        let client = signed_client();
        let id = cred("cred");
        client_with_market(&client, id).await;

        let amount = StableAmount::parse("10").unwrap();
        let trade = client.buy(id, amount, Some(100)).await.unwrap();

        assert_eq!(
            trade.min_output,
            calculator::min_output_after_slippage(trade.quote.amount_out, 100)
        );
        assert!(trade.approval_tx.is_some(), "fresh approval expected");
        assert!(trade.quote.effective_price > 0.0);
    }

    #[tokio::test]
    async fn test_duplicate_market_is_step_tagged() {
        let client = signed_client();
        let id = cred("cred");
        let token = client_with_market(&client, id).await;

        let result = client
            .create_market_with_liquidity(
                id,
                &token,
                TokenAmount::parse("10").unwrap(),
                StableAmount::parse("1").unwrap(),
            )
            .await;

        match result {
            Err(MarketError::ActionFailed { op, approvals, source }) => {
                assert_eq!(op, "create_market");
                assert!(!approvals.is_empty());
                assert_eq!(source.revert_reason(), Some(reasons::POOL_EXISTS));
            }
            other => panic!("expected ActionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sell_round_trips_through_pool() {
        let client = signed_client();
        let id = cred("cred");
        client_with_market(&client, id).await;

        let buy = client
            .buy(id, StableAmount::parse("10").unwrap(), None)
            .await
            .unwrap();
        let bought = TokenAmount::from_units(buy.quote.amount_out);

        let sell = client.sell(id, bought, None).await.unwrap();
        // selling back what was just bought recovers slightly less than
        // 10 stablecoin (two rounds of fees plus curve movement)
        assert!(sell.quote.amount_out < StableAmount::parse("10").unwrap().units());
        assert!(sell.quote.amount_out > StableAmount::parse("9").unwrap().units());
    }

    #[tokio::test]
    async fn test_add_liquidity_bound_is_nonzero_for_live_pool() {
        let client = signed_client();
        let id = cred("cred");
        client_with_market(&client, id).await;

        let outcome = client
            .add_liquidity(
                id,
                TokenAmount::parse("100").unwrap(),
                StableAmount::parse("10").unwrap(),
                None,
            )
            .await
            .unwrap();
        assert!(outcome.min_liquidity > 0);
        assert_eq!(outcome.approvals.len(), 2);
    }
}
