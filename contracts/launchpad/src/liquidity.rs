//! Clients for the contracts a successful sale lists its liquidity through.
//!
//! The router is external. The launchpad transfers the liquidity share and
//! the paired sale tokens to the router, calls `add_liquidity` with itself as
//! recipient, then moves the minted LP tokens into the sale's locker.
//! The locker is any contract exposing the [`TimeLock`] getters, normally a
//! `token_locker` instance.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::{LiquidityPosition, SaleConfig};
use crate::Error;

#[allow(dead_code)]
#[contractclient(name = "LiquidityRouterClient")]
pub trait LiquidityRouter {
    /// LP token of the `token_a`/`token_b` pool.
    fn lp_token(env: Env, token_a: Address, token_b: Address) -> Address;

    /// Deposit both amounts, already transferred to the router, and mint
    /// the LP tokens to `to`.
    fn add_liquidity(
        env: Env,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        to: Address,
    ) -> LiquidityPosition;
}

#[allow(dead_code)]
#[contractclient(name = "TimeLockClient")]
pub trait TimeLock {
    fn get_locked_token(env: Env) -> Address;
    fn get_beneficiary(env: Env) -> Address;
    fn get_unlock_time(env: Env) -> u64;
}

/// The locker must hold the router's LP token for the creator until the
/// liquidity unlock time or later.
pub fn check_custody(env: &Env, config: &SaleConfig, base_token: &Address) -> Result<(), Error> {
    let locker = TimeLockClient::new(env, &config.liquidity_locker);
    let lp_token =
        LiquidityRouterClient::new(env, &config.router).lp_token(&config.token, base_token);

    let valid = locker.get_locked_token() == lp_token
        && locker.get_beneficiary() == config.creator
        && locker.get_unlock_time() >= config.liquidity_unlock_time;
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig)
    }
}
