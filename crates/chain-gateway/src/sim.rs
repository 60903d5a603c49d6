//! In-memory simulated chain.
//!
//! `SimChain` implements the full [`ContractGateway`] against local state:
//! ERC-20 ledgers with allowances, the token factory with its minting fee,
//! a constant-product AMM (997/1000 fee), and fee-collector reward
//! accrual. It enforces the same allowance, balance, deadline, and
//! slippage rules a deployed contract would, producing the same revert
//! reason strings, so client behavior against it matches a live network.
//!
//! Simplifications relative to a deployed factory: the full `max_supply`
//! is minted to the creator at creation time, and the emission rate is
//! recorded but not paid out over time.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tokio::sync::Mutex;
use tracing::debug;

use credmart_core::{Address, ContractAddresses, CredentialId, StableAmount, TokenAmount, TxHash};

use crate::error::{reasons, GatewayError, Result};
use crate::gateway::ContractGateway;
use crate::types::{
    AmountOut, PoolState, Signer, SwapDirection, TokenCreated, TokenParams, TxReceipt,
};

/// Swap fee numerator (0.3% fee)
pub const FEE_NUM: u128 = 997;
/// Swap fee denominator
pub const FEE_DENOM: u128 = 1000;

/// Flat fee for minting a credential token: 1 stablecoin
pub const MINT_FEE: StableAmount = StableAmount::from_units(1_000_000);

/// Faucet cap per free-mint call: 10,000 stablecoin
pub const FREE_MINT_MAX: StableAmount = StableAmount::from_units(10_000_000_000);

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn big(x: u128) -> BigUint {
    BigUint::from(x)
}

fn to_u128(v: &BigUint) -> u128 {
    v.to_u128().unwrap_or(u128::MAX)
}

/// Minimal ERC-20 ledger: balances plus (owner, spender) allowances
#[derive(Debug, Default)]
struct Erc20 {
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
}

impl Erc20 {
    fn balance(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    fn credit(&mut self, owner: &Address, amount: u128) {
        *self.balances.entry(owner.clone()).or_insert(0) += amount;
    }

    fn debit(&mut self, owner: &Address, amount: u128) -> Result<()> {
        let balance = self.balance(owner);
        if balance < amount {
            return Err(GatewayError::revert(reasons::INSUFFICIENT_BALANCE));
        }
        self.balances.insert(owner.clone(), balance - amount);
        Ok(())
    }

    /// `transferFrom` semantics: allowance is checked before balance
    fn spend_allowance(&mut self, owner: &Address, spender: &Address, amount: u128) -> Result<()> {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return Err(GatewayError::revert(reasons::INSUFFICIENT_ALLOWANCE));
        }
        self.debit(owner, amount)?;
        self.allowances
            .insert((owner.clone(), spender.clone()), allowed - amount);
        Ok(())
    }
}

#[derive(Debug)]
struct TokenLedger {
    erc20: Erc20,
    #[allow(dead_code)]
    params: TokenParams,
    creator: Address,
}

#[derive(Debug)]
struct SimPool {
    token: Address,
    token_reserves: u128,
    stable_reserves: u128,
    total_liquidity: u128,
    last_price: f64,
    is_active: bool,
}

impl SimPool {
    fn spot_price(&self) -> f64 {
        if self.token_reserves == 0 {
            return 0.0;
        }
        (self.stable_reserves as f64 / credmart_core::STABLE_SCALE as f64)
            / (self.token_reserves as f64 / credmart_core::TOKEN_SCALE as f64)
    }
}

#[derive(Debug, Default)]
struct SimState {
    block: u64,
    nonce: u64,
    stable: Erc20,
    tokens: HashMap<Address, TokenLedger>,
    token_by_id: HashMap<CredentialId, Address>,
    pools: HashMap<CredentialId, SimPool>,
    /// Unclaimed swap-fee rewards per credential, in stablecoin units
    rewards: HashMap<CredentialId, u128>,
    next_token_suffix: u64,
}

impl SimState {
    fn mine(&mut self) -> TxReceipt {
        self.block += 1;
        self.nonce += 1;
        TxReceipt {
            tx_hash: TxHash::new(format!("0x{:064x}", self.nonce)),
            block_number: self.block,
        }
    }

    fn token_ledger(&mut self, token: &Address) -> Result<&mut TokenLedger> {
        self.tokens
            .get_mut(token)
            .ok_or_else(|| GatewayError::revert("UNKNOWN_TOKEN"))
    }
}

/// Fee-aware constant-product quote against current pool reserves.
///
/// output = reserves_out * input * fee_num / (reserves_in * fee_denom + input * fee_num)
///
/// The fee figure is always stablecoin-denominated: for buys it is the
/// skim taken off the input before it enters the pool, for sells it is
/// the difference between the feeless output and the actual output.
fn quote(pool: &SimPool, direction: SwapDirection, amount_in: u128) -> Result<AmountOut> {
    if pool.token_reserves == 0 || pool.stable_reserves == 0 {
        return Err(GatewayError::revert(reasons::INSUFFICIENT_LIQUIDITY));
    }
    if amount_in == 0 {
        return Ok(AmountOut {
            amount_out: 0,
            fee: 0,
        });
    }

    let (reserve_in, reserve_out) = match direction {
        SwapDirection::StableToToken => (pool.stable_reserves, pool.token_reserves),
        SwapDirection::TokenToStable => (pool.token_reserves, pool.stable_reserves),
    };

    let numerator = big(reserve_out) * big(amount_in) * big(FEE_NUM);
    let denominator = big(reserve_in) * big(FEE_DENOM) + big(amount_in) * big(FEE_NUM);
    let amount_out = to_u128(&(numerator / denominator));

    if amount_out == 0 || amount_out >= reserve_out {
        return Err(GatewayError::revert(reasons::INSUFFICIENT_LIQUIDITY));
    }

    let fee = match direction {
        // skim off the input before it reaches the pool
        SwapDirection::StableToToken => amount_in - amount_in * FEE_NUM / FEE_DENOM,
        // difference against the feeless output
        SwapDirection::TokenToStable => {
            let ideal = big(reserve_out) * big(amount_in) / (big(reserve_in) + big(amount_in));
            to_u128(&ideal).saturating_sub(amount_out)
        }
    };

    Ok(AmountOut { amount_out, fee })
}

/// Simulated chain hosting the four marketplace contracts
pub struct SimChain {
    contracts: ContractAddresses,
    state: Mutex<SimState>,
}

impl SimChain {
    pub fn new() -> Self {
        Self {
            contracts: ContractAddresses {
                stablecoin: Address::new(format!("0x{:040x}", 1)),
                token_factory: Address::new(format!("0x{:040x}", 2)),
                amm: Address::new(format!("0x{:040x}", 3)),
                fee_collector: Address::new(format!("0x{:040x}", 4)),
            },
            state: Mutex::new(SimState::default()),
        }
    }
}

impl Default for SimChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractGateway for SimChain {
    fn contracts(&self) -> &ContractAddresses {
        &self.contracts
    }

    async fn stable_balance_of(&self, owner: &Address) -> Result<StableAmount> {
        let state = self.state.lock().await;
        Ok(StableAmount::from_units(state.stable.balance(owner)))
    }

    async fn stable_allowance(&self, owner: &Address, spender: &Address) -> Result<StableAmount> {
        let state = self.state.lock().await;
        Ok(StableAmount::from_units(
            state.stable.allowance(owner, spender),
        ))
    }

    async fn stable_approve(
        &self,
        signer: &Signer,
        spender: &Address,
        amount: StableAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;
        state
            .stable
            .approve(signer.address(), spender, amount.units());
        Ok(state.mine())
    }

    async fn stable_free_mint(&self, signer: &Signer, amount: StableAmount) -> Result<TxReceipt> {
        if amount > FREE_MINT_MAX {
            return Err(GatewayError::revert(reasons::UNAUTHORIZED_MINTER));
        }
        let mut state = self.state.lock().await;
        state.stable.credit(signer.address(), amount.units());
        debug!(account = %signer.address(), amount = %amount, "faucet mint");
        Ok(state.mine())
    }

    async fn token_balance_of(&self, token: &Address, owner: &Address) -> Result<TokenAmount> {
        let mut state = self.state.lock().await;
        let ledger = state.token_ledger(token)?;
        Ok(TokenAmount::from_units(ledger.erc20.balance(owner)))
    }

    async fn token_allowance(
        &self,
        token: &Address,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount> {
        let mut state = self.state.lock().await;
        let ledger = state.token_ledger(token)?;
        Ok(TokenAmount::from_units(ledger.erc20.allowance(owner, spender)))
    }

    async fn token_approve(
        &self,
        signer: &Signer,
        token: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;
        let owner = signer.address().clone();
        let ledger = state.token_ledger(token)?;
        ledger.erc20.approve(&owner, spender, amount.units());
        Ok(state.mine())
    }

    async fn create_token(
        &self,
        signer: &Signer,
        id: CredentialId,
        params: &TokenParams,
    ) -> Result<TokenCreated> {
        let mut state = self.state.lock().await;

        if state.token_by_id.contains_key(&id) {
            return Err(GatewayError::revert(reasons::TOKEN_EXISTS));
        }

        // The minting fee moves via the caller's prior approval to the
        // fee collector.
        let owner = signer.address().clone();
        let fee_collector = self.contracts.fee_collector.clone();
        state
            .stable
            .spend_allowance(&owner, &fee_collector, MINT_FEE.units())?;
        state.stable.credit(&fee_collector, MINT_FEE.units());

        state.next_token_suffix += 1;
        let token = Address::new(format!("0x{:040x}", 0x1000 + state.next_token_suffix));

        let mut erc20 = Erc20::default();
        erc20.credit(&owner, params.max_supply.units());
        state.tokens.insert(
            token.clone(),
            TokenLedger {
                erc20,
                params: params.clone(),
                creator: owner,
            },
        );
        state.token_by_id.insert(id, token.clone());

        let receipt = state.mine();
        debug!(%token, credential = %id, "token created");
        Ok(TokenCreated { token, receipt })
    }

    async fn get_pool(&self, id: CredentialId) -> Result<Option<PoolState>> {
        let state = self.state.lock().await;
        Ok(state.pools.get(&id).map(|p| PoolState {
            token: p.token.clone(),
            token_reserves: TokenAmount::from_units(p.token_reserves),
            stable_reserves: StableAmount::from_units(p.stable_reserves),
            total_liquidity: p.total_liquidity,
            last_price: p.last_price,
            is_active: p.is_active,
        }))
    }

    async fn get_amount_out(
        &self,
        id: CredentialId,
        direction: SwapDirection,
        amount_in: u128,
    ) -> Result<AmountOut> {
        let state = self.state.lock().await;
        let pool = state
            .pools
            .get(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        quote(pool, direction, amount_in)
    }

    async fn get_token_price(&self, id: CredentialId) -> Result<f64> {
        let state = self.state.lock().await;
        let pool = state
            .pools
            .get(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        Ok(pool.spot_price())
    }

    async fn create_pool(
        &self,
        signer: &Signer,
        id: CredentialId,
        token: &Address,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;

        if state.pools.contains_key(&id) {
            return Err(GatewayError::revert(reasons::POOL_EXISTS));
        }
        if state.token_by_id.get(&id) != Some(token) {
            return Err(GatewayError::revert("UNKNOWN_TOKEN"));
        }
        if token_amount.is_zero() || stable_amount.is_zero() {
            return Err(GatewayError::revert(reasons::INSUFFICIENT_LIQUIDITY));
        }

        let owner = signer.address().clone();
        let amm = self.contracts.amm.clone();

        let ledger = state.token_ledger(token)?;
        ledger
            .erc20
            .spend_allowance(&owner, &amm, token_amount.units())?;
        ledger.erc20.credit(&amm, token_amount.units());
        state
            .stable
            .spend_allowance(&owner, &amm, stable_amount.units())?;
        state.stable.credit(&amm, stable_amount.units());

        // Initial liquidity shares: geometric mean of the two deposits
        let shares = (big(token_amount.units()) * big(stable_amount.units())).sqrt();

        let mut pool = SimPool {
            token: token.clone(),
            token_reserves: token_amount.units(),
            stable_reserves: stable_amount.units(),
            total_liquidity: to_u128(&shares),
            last_price: 0.0,
            is_active: true,
        };
        pool.last_price = pool.spot_price();
        state.pools.insert(id, pool);
        state.rewards.entry(id).or_insert(0);

        let receipt = state.mine();
        debug!(credential = %id, "pool created");
        Ok(receipt)
    }

    async fn add_liquidity(
        &self,
        signer: &Signer,
        id: CredentialId,
        token_amount: TokenAmount,
        stable_amount: StableAmount,
        min_liquidity: u128,
        deadline: u64,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;

        if unix_now() > deadline {
            return Err(GatewayError::revert(reasons::DEADLINE_EXPIRED));
        }
        let pool = state
            .pools
            .get(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;

        let shares = if pool.total_liquidity == 0 {
            to_u128(&(big(token_amount.units()) * big(stable_amount.units())).sqrt())
        } else {
            let by_token = big(token_amount.units()) * big(pool.total_liquidity)
                / big(pool.token_reserves);
            let by_stable = big(stable_amount.units()) * big(pool.total_liquidity)
                / big(pool.stable_reserves);
            to_u128(&by_token.min(by_stable))
        };
        if shares < min_liquidity {
            return Err(GatewayError::revert(reasons::SLIPPAGE_EXCEEDED));
        }

        let owner = signer.address().clone();
        let amm = self.contracts.amm.clone();
        let token = pool.token.clone();

        let ledger = state.token_ledger(&token)?;
        ledger
            .erc20
            .spend_allowance(&owner, &amm, token_amount.units())?;
        ledger.erc20.credit(&amm, token_amount.units());
        state
            .stable
            .spend_allowance(&owner, &amm, stable_amount.units())?;
        state.stable.credit(&amm, stable_amount.units());

        let pool = state
            .pools
            .get_mut(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        pool.token_reserves += token_amount.units();
        pool.stable_reserves += stable_amount.units();
        pool.total_liquidity += shares;

        Ok(state.mine())
    }

    async fn swap_stable_for_tokens(
        &self,
        signer: &Signer,
        id: CredentialId,
        amount_in: StableAmount,
        min_out: TokenAmount,
        deadline: u64,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;

        if unix_now() > deadline {
            return Err(GatewayError::revert(reasons::DEADLINE_EXPIRED));
        }
        let pool = state
            .pools
            .get(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        if !pool.is_active {
            return Err(GatewayError::revert("POOL_INACTIVE"));
        }

        let out = quote(pool, SwapDirection::StableToToken, amount_in.units())?;
        if out.amount_out < min_out.units() {
            return Err(GatewayError::revert(reasons::SLIPPAGE_EXCEEDED));
        }

        let owner = signer.address().clone();
        let amm = self.contracts.amm.clone();
        let fee_collector = self.contracts.fee_collector.clone();
        let token = pool.token.clone();

        // Pull the full input; the fee portion is skimmed to the fee
        // collector, the remainder enters the pool.
        state
            .stable
            .spend_allowance(&owner, &amm, amount_in.units())?;
        let effective_in = amount_in.units() - out.fee;
        state.stable.credit(&amm, effective_in);
        state.stable.credit(&fee_collector, out.fee);

        let ledger = state.token_ledger(&token)?;
        ledger.erc20.debit(&amm, out.amount_out)?;
        ledger.erc20.credit(&owner, out.amount_out);

        *state.rewards.entry(id).or_insert(0) += out.fee;

        let pool = state
            .pools
            .get_mut(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        pool.stable_reserves += effective_in;
        pool.token_reserves -= out.amount_out;
        pool.last_price = pool.spot_price();

        let receipt = state.mine();
        debug!(credential = %id, amount_in = %amount_in, amount_out = out.amount_out, "buy swap");
        Ok(receipt)
    }

    async fn swap_tokens_for_stable(
        &self,
        signer: &Signer,
        id: CredentialId,
        amount_in: TokenAmount,
        min_out: StableAmount,
        deadline: u64,
    ) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;

        if unix_now() > deadline {
            return Err(GatewayError::revert(reasons::DEADLINE_EXPIRED));
        }
        let pool = state
            .pools
            .get(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        if !pool.is_active {
            return Err(GatewayError::revert("POOL_INACTIVE"));
        }

        let out = quote(pool, SwapDirection::TokenToStable, amount_in.units())?;
        if out.amount_out < min_out.units() {
            return Err(GatewayError::revert(reasons::SLIPPAGE_EXCEEDED));
        }

        let owner = signer.address().clone();
        let amm = self.contracts.amm.clone();
        let fee_collector = self.contracts.fee_collector.clone();
        let token = pool.token.clone();

        let ledger = state.token_ledger(&token)?;
        ledger
            .erc20
            .spend_allowance(&owner, &amm, amount_in.units())?;
        ledger.erc20.credit(&amm, amount_in.units());

        // Trader output plus the skimmed fee both leave the pool
        state.stable.debit(&amm, out.amount_out + out.fee)?;
        state.stable.credit(&owner, out.amount_out);
        state.stable.credit(&fee_collector, out.fee);

        *state.rewards.entry(id).or_insert(0) += out.fee;

        let pool = state
            .pools
            .get_mut(&id)
            .ok_or_else(|| GatewayError::revert(reasons::POOL_NOT_FOUND))?;
        pool.token_reserves += amount_in.units();
        pool.stable_reserves -= out.amount_out + out.fee;
        pool.last_price = pool.spot_price();

        let receipt = state.mine();
        debug!(credential = %id, amount_in = %amount_in, amount_out = out.amount_out, "sell swap");
        Ok(receipt)
    }

    async fn pending_rewards(&self, id: CredentialId, owner: &Address) -> Result<StableAmount> {
        let state = self.state.lock().await;
        let creator = state
            .token_by_id
            .get(&id)
            .and_then(|token| state.tokens.get(token))
            .map(|l| &l.creator);
        if creator == Some(owner) {
            Ok(StableAmount::from_units(
                state.rewards.get(&id).copied().unwrap_or(0),
            ))
        } else {
            Ok(StableAmount::ZERO)
        }
    }

    async fn claim_rewards(&self, signer: &Signer, id: CredentialId) -> Result<TxReceipt> {
        let mut state = self.state.lock().await;

        let creator = state
            .token_by_id
            .get(&id)
            .and_then(|token| state.tokens.get(token))
            .map(|l| l.creator.clone())
            .ok_or_else(|| GatewayError::revert("UNKNOWN_TOKEN"))?;

        // A claim with nothing pending is a zero-value transfer, not an
        // error.
        let pending = if &creator == signer.address() {
            state.rewards.insert(id, 0).unwrap_or(0)
        } else {
            0
        };

        if pending > 0 {
            let fee_collector = self.contracts.fee_collector.clone();
            state.stable.debit(&fee_collector, pending)?;
            state.stable.credit(signer.address(), pending);
        }

        Ok(state.mine())
    }

    async fn revenue_pool(&self) -> Result<StableAmount> {
        let state = self.state.lock().await;
        Ok(StableAmount::from_units(
            state.stable.balance(&self.contracts.fee_collector),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(n: u8) -> Signer {
        Signer::new(Address::new(format!("0x{:040x}", 0xa000 + n as u64)))
    }

    fn id(label: &str) -> CredentialId {
        CredentialId::from_label(label).unwrap()
    }

    fn params() -> TokenParams {
        TokenParams {
            name: "Sample".into(),
            symbol: "SMP".into(),
            emission_rate: TokenAmount::parse("100").unwrap(),
            max_supply: TokenAmount::parse("1000000").unwrap(),
        }
    }

    async fn funded_chain(alice: &Signer) -> SimChain {
        let chain = SimChain::new();
        chain
            .stable_free_mint(alice, StableAmount::parse("1000").unwrap())
            .await
            .unwrap();
        chain
    }

    /// Create token + pool with 1000 tokens / 100 stable, returning the
    /// token address.
    async fn chain_with_pool(chain: &SimChain, alice: &Signer, cred: CredentialId) -> Address {
        let fee_collector = chain.contracts().fee_collector.clone();
        let amm = chain.contracts().amm.clone();

        chain
            .stable_approve(alice, &fee_collector, MINT_FEE)
            .await
            .unwrap();
        let created = chain.create_token(alice, cred, &params()).await.unwrap();

        chain
            .token_approve(alice, &created.token, &amm, TokenAmount::parse("1000").unwrap())
            .await
            .unwrap();
        chain
            .stable_approve(alice, &amm, StableAmount::parse("100").unwrap())
            .await
            .unwrap();
        chain
            .create_pool(
                alice,
                cred,
                &created.token,
                TokenAmount::parse("1000").unwrap(),
                StableAmount::parse("100").unwrap(),
            )
            .await
            .unwrap();
        created.token
    }

    fn assert_reverts_with(result: Result<TxReceipt>, reason: &str) {
        match result {
            Err(GatewayError::Revert { reason: r }) => assert_eq!(r, reason),
            other => panic!("expected revert {reason}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_faucet_mint_and_balance() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let balance = chain.stable_balance_of(alice.address()).await.unwrap();
        assert_eq!(balance, StableAmount::parse("1000").unwrap());

        // zero balance reads succeed
        let bob = signer(2);
        let balance = chain.stable_balance_of(bob.address()).await.unwrap();
        assert!(balance.is_zero());
    }

    #[tokio::test]
    async fn test_faucet_cap_enforced() {
        let alice = signer(1);
        let chain = SimChain::new();
        let result = chain
            .stable_free_mint(&alice, StableAmount::parse("10001").unwrap())
            .await;
        assert_reverts_with(result, reasons::UNAUTHORIZED_MINTER);
    }

    #[tokio::test]
    async fn test_create_token_requires_fee_approval() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let result = chain.create_token(&alice, id("cred"), &params()).await;
        match result {
            Err(GatewayError::Revert { reason }) => {
                assert_eq!(reason, reasons::INSUFFICIENT_ALLOWANCE)
            }
            other => panic!("expected allowance revert, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_token_mints_supply_and_collects_fee() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let fee_collector = chain.contracts().fee_collector.clone();

        chain
            .stable_approve(&alice, &fee_collector, MINT_FEE)
            .await
            .unwrap();
        let created = chain
            .create_token(&alice, id("cred"), &params())
            .await
            .unwrap();

        let supply = chain
            .token_balance_of(&created.token, alice.address())
            .await
            .unwrap();
        assert_eq!(supply, TokenAmount::parse("1000000").unwrap());

        // fee left the creator and landed in the revenue pool
        let balance = chain.stable_balance_of(alice.address()).await.unwrap();
        assert_eq!(balance, StableAmount::parse("999").unwrap());
        assert_eq!(chain.revenue_pool().await.unwrap(), MINT_FEE);

        // duplicate id is rejected
        chain
            .stable_approve(&alice, &fee_collector, MINT_FEE)
            .await
            .unwrap();
        let result = chain.create_token(&alice, id("cred"), &params()).await;
        match result {
            Err(GatewayError::Revert { reason }) => assert_eq!(reason, reasons::TOKEN_EXISTS),
            other => panic!("expected TOKEN_EXISTS, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_pool_rejected() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        let token = chain_with_pool(&chain, &alice, cred).await;

        let result = chain
            .create_pool(
                &alice,
                cred,
                &token,
                TokenAmount::parse("1").unwrap(),
                StableAmount::parse("1").unwrap(),
            )
            .await;
        assert_reverts_with(result, reasons::POOL_EXISTS);
    }

    #[tokio::test]
    async fn test_quote_matches_swap_execution() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        let token = chain_with_pool(&chain, &alice, cred).await;
        let amm = chain.contracts().amm.clone();

        let amount_in = StableAmount::parse("10").unwrap();
        let preview = chain
            .get_amount_out(cred, SwapDirection::StableToToken, amount_in.units())
            .await
            .unwrap();
        assert!(preview.amount_out > 0);

        let before = chain
            .token_balance_of(&token, alice.address())
            .await
            .unwrap();
        chain
            .stable_approve(&alice, &amm, amount_in)
            .await
            .unwrap();
        chain
            .swap_stable_for_tokens(
                &alice,
                cred,
                amount_in,
                TokenAmount::from_units(preview.amount_out),
                unix_now() + 3600,
            )
            .await
            .unwrap();
        let after = chain
            .token_balance_of(&token, alice.address())
            .await
            .unwrap();

        assert_eq!(
            after.units() - before.units(),
            preview.amount_out,
            "executed amount must equal the quoted amount at unchanged reserves"
        );
    }

    #[tokio::test]
    async fn test_swap_without_approval_reverts_on_allowance() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        chain_with_pool(&chain, &alice, cred).await;

        let result = chain
            .swap_stable_for_tokens(
                &alice,
                cred,
                StableAmount::parse("10").unwrap(),
                TokenAmount::ZERO,
                unix_now() + 3600,
            )
            .await;
        assert_reverts_with(result, reasons::INSUFFICIENT_ALLOWANCE);
    }

    #[tokio::test]
    async fn test_swap_deadline_enforced() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        chain_with_pool(&chain, &alice, cred).await;

        let result = chain
            .swap_stable_for_tokens(
                &alice,
                cred,
                StableAmount::parse("10").unwrap(),
                TokenAmount::ZERO,
                unix_now() - 1,
            )
            .await;
        assert_reverts_with(result, reasons::DEADLINE_EXPIRED);
    }

    #[tokio::test]
    async fn test_swap_min_out_enforced() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        chain_with_pool(&chain, &alice, cred).await;
        let amm = chain.contracts().amm.clone();

        let amount_in = StableAmount::parse("10").unwrap();
        let preview = chain
            .get_amount_out(cred, SwapDirection::StableToToken, amount_in.units())
            .await
            .unwrap();

        chain
            .stable_approve(&alice, &amm, amount_in)
            .await
            .unwrap();
        let result = chain
            .swap_stable_for_tokens(
                &alice,
                cred,
                amount_in,
                TokenAmount::from_units(preview.amount_out + 1),
                unix_now() + 3600,
            )
            .await;
        assert_reverts_with(result, reasons::SLIPPAGE_EXCEEDED);
    }

    #[tokio::test]
    async fn test_rewards_accrue_and_claim_is_idempotent() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        chain_with_pool(&chain, &alice, cred).await;
        let amm = chain.contracts().amm.clone();

        let amount_in = StableAmount::parse("10").unwrap();
        chain
            .stable_approve(&alice, &amm, amount_in)
            .await
            .unwrap();
        chain
            .swap_stable_for_tokens(&alice, cred, amount_in, TokenAmount::ZERO, unix_now() + 3600)
            .await
            .unwrap();

        let pending = chain.pending_rewards(cred, alice.address()).await.unwrap();
        assert!(!pending.is_zero(), "swap fee should accrue to the creator");

        // a non-creator sees zero pending
        let bob = signer(2);
        let other = chain.pending_rewards(cred, bob.address()).await.unwrap();
        assert!(other.is_zero());

        let before = chain.stable_balance_of(alice.address()).await.unwrap();
        chain.claim_rewards(&alice, cred).await.unwrap();
        let after = chain.stable_balance_of(alice.address()).await.unwrap();
        assert_eq!(after.units() - before.units(), pending.units());

        // second claim: zero pending, still succeeds
        chain.claim_rewards(&alice, cred).await.unwrap();
        let pending = chain.pending_rewards(cred, alice.address()).await.unwrap();
        assert!(pending.is_zero());
    }

    #[tokio::test]
    async fn test_add_liquidity_proportional_shares() {
        let alice = signer(1);
        let chain = funded_chain(&alice).await;
        let cred = id("cred");
        let token = chain_with_pool(&chain, &alice, cred).await;
        let amm = chain.contracts().amm.clone();

        let before = chain.get_pool(cred).await.unwrap().unwrap();

        // add 10% more of each reserve: shares grow by 10%
        let add_token = TokenAmount::parse("100").unwrap();
        let add_stable = StableAmount::parse("10").unwrap();
        chain
            .token_approve(&alice, &token, &amm, add_token)
            .await
            .unwrap();
        chain
            .stable_approve(&alice, &amm, add_stable)
            .await
            .unwrap();
        chain
            .add_liquidity(
                &alice,
                cred,
                add_token,
                add_stable,
                before.total_liquidity / 10,
                unix_now() + 3600,
            )
            .await
            .unwrap();

        let after = chain.get_pool(cred).await.unwrap().unwrap();
        assert_eq!(
            after.total_liquidity,
            before.total_liquidity + before.total_liquidity / 10
        );
        assert_eq!(
            after.token_reserves.units(),
            before.token_reserves.units() + add_token.units()
        );
    }
}
