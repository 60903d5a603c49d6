//! The contract gateway trait

use async_trait::async_trait;

use credmart_core::{Address, ContractAddresses, CredentialId, StableAmount, TokenAmount};

use crate::error::Result;
use crate::types::{
    AmountOut, PoolState, Signer, SwapDirection, TokenCreated, TokenParams, TxReceipt,
};

/// Typed access to the four deployed marketplace contracts.
///
/// One method per contract operation; every return value is decoded into
/// an explicit struct before it crosses this boundary. Read methods are
/// side-effect free and safe to issue concurrently at arbitrary
/// frequency. Write methods resolve once the transaction is mined; a
/// caller must await a dependent write's confirmation before issuing the
/// next one.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Addresses of the deployed contracts on the active network
    fn contracts(&self) -> &ContractAddresses;

    // ------------------------------------------------------------------
    // Stablecoin contract
    // ------------------------------------------------------------------

    async fn stable_balance_of(&self, owner: &Address) -> Result<StableAmount>;

    async fn stable_allowance(&self, owner: &Address, spender: &Address) -> Result<StableAmount>;

    async fn stable_approve(
        &self,
        signer: &Signer,
        spender: &Address,
        amount: StableAmount,
    ) -> Result<TxReceipt>;

    /// Test-only faucet mint
    async fn stable_free_mint(&self, signer: &Signer, amount: StableAmount) -> Result<TxReceipt>;

    // ------------------------------------------------------------------
    // Credential token contracts (standard ERC-20 surface, per token)
    // ------------------------------------------------------------------

    async fn token_balance_of(&self, token: &Address, owner: &Address) -> Result<TokenAmount>;

    async fn token_allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount>;

    async fn token_approve(
        &self,
        signer: &Signer,
        token: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt>;

    // ------------------------------------------------------------------
    // Token factory contract
    // ------------------------------------------------------------------

    /// Create a credential token. The minting fee must already be
    /// approved to the fee collector or the call reverts.
    async fn create_token(
        &self,
        signer: &Signer,
        id: CredentialId,
        params: &TokenParams,
    ) -> Result<TokenCreated>;

    // ------------------------------------------------------------------
    // AMM contract
    // ------------------------------------------------------------------

    /// Pool snapshot, or `None` if no pool exists for this credential
    async fn get_pool(&self, id: CredentialId) -> Result<Option<PoolState>>;

    /// Fee-aware output amount for a prospective swap. Pure read.
    async fn get_amount_out(
        &self,
        id: CredentialId,
        direction: SwapDirection,
        amount_in: u128,
    ) -> Result<AmountOut>;

    /// Current spot price (stablecoin per token, decimal-adjusted)
    async fn get_token_price(&self, id: CredentialId) -> Result<f64>;

    async fn create_pool(
        &self,
        signer: &Signer,
        id: CredentialId,
        token: &Address,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
    ) -> Result<TxReceipt>;

    async fn add_liquidity(
        &self,
        signer: &Signer,
        id: CredentialId,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
        min_liquidity: u128,
        deadline: u64,
    ) -> Result<TxReceipt>;

    async fn swap_stable_for_tokens(
        &self,
        signer: &Signer,
        id: CredentialId,
        amount_in: StableAmount,
        min_out: TokenAmount,
        deadline: u64,
    ) -> Result<TxReceipt>;

    async fn swap_tokens_for_stable(
        &self,
        signer: &Signer,
        id: CredentialId,
        amount_in: TokenAmount,
        min_out: StableAmount,
        deadline: u64,
    ) -> Result<TxReceipt>;

    // ------------------------------------------------------------------
    // Fee collector contract
    // ------------------------------------------------------------------

    async fn pending_rewards(&self, id: CredentialId, owner: &Address) -> Result<StableAmount>;

    /// Claim accrued rewards for the signer. A zero-balance claim
    /// succeeds as a zero-value transfer.
    async fn claim_rewards(&self, signer: &Signer, id: CredentialId) -> Result<TxReceipt>;

    /// Total protocol revenue held by the fee collector
    async fn revenue_pool(&self) -> Result<StableAmount>;
}
