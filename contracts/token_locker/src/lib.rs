//! # Token Locker
//!
//! Holds a balance of one token for a beneficiary until an unlock time.
//! The unlock time can only move forward. Tokens other than the locked one
//! that end up here can be swept to the beneficiary at any time.
//!
//! The lock is configured by the constructor, so a deployed locker is never
//! left open for someone else to claim. Funding is a plain token transfer to
//! the contract address; the locked balance is whatever the contract holds
//! of `locked_token`.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

mod events;
mod storage;

#[cfg(test)]
mod test_locker;

pub use events::{LockExtended, Locked, Released};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized         = 2,
    Unauthorized           = 3,
    CannotSweepLockedToken = 4,
    InvalidExtension       = 5,
    LockNotExpired         = 6,
    ArithmeticOverflow     = 7,
}

fn require_beneficiary(env: &Env, caller: &Address) -> Result<Address, Error> {
    caller.require_auth();
    let beneficiary = storage::get_beneficiary(env).ok_or(Error::NotInitialized)?;
    if *caller != beneficiary {
        return Err(Error::Unauthorized);
    }
    Ok(beneficiary)
}

#[contract]
pub struct TokenLocker;

#[contractimpl]
impl TokenLocker {
    /// Bind the lock to `locked_token`, `beneficiary` and `unlock_time`
    /// as part of deployment.
    pub fn __constructor(env: Env, locked_token: Address, beneficiary: Address, unlock_time: u64) {
        storage::init_lock(&env, &locked_token, &beneficiary, unlock_time);
        events::locked(&env, &locked_token, &beneficiary, unlock_time);
    }

    pub fn transfer_beneficiary(
        env: Env,
        caller: Address,
        new_beneficiary: Address,
    ) -> Result<(), Error> {
        let previous = require_beneficiary(&env, &caller)?;
        storage::set_beneficiary(&env, &new_beneficiary);
        events::beneficiary_set(&env, &previous, &new_beneficiary);
        Ok(())
    }

    /// Push the unlock time `delta` seconds further out. Returns the new
    /// unlock time.
    pub fn extend_locktime(env: Env, caller: Address, delta: u64) -> Result<u64, Error> {
        require_beneficiary(&env, &caller)?;
        if delta == 0 {
            return Err(Error::InvalidExtension);
        }
        let previous = storage::get_unlock_time(&env).ok_or(Error::NotInitialized)?;
        let unlock_time = previous
            .checked_add(delta)
            .ok_or(Error::ArithmeticOverflow)?;
        storage::set_unlock_time(&env, unlock_time);
        events::lock_extended(&env, previous, unlock_time);
        Ok(unlock_time)
    }

    /// Send this contract's whole balance of `token` to the beneficiary.
    /// The locked token is refused.
    pub fn sweep(env: Env, caller: Address, token: Address) -> Result<i128, Error> {
        let beneficiary = require_beneficiary(&env, &caller)?;
        let locked_token = storage::get_locked_token(&env).ok_or(Error::NotInitialized)?;
        if token == locked_token {
            return Err(Error::CannotSweepLockedToken);
        }

        let client = token::Client::new(&env, &token);
        let here = env.current_contract_address();
        let amount = client.balance(&here);
        if amount > 0 {
            client.transfer(&here, &beneficiary, &amount);
        }
        events::swept(&env, &token, &beneficiary, amount);
        Ok(amount)
    }

    /// Release the locked balance to the beneficiary once the unlock time
    /// has been reached.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        let beneficiary = require_beneficiary(&env, &caller)?;
        let unlock_time = storage::get_unlock_time(&env).ok_or(Error::NotInitialized)?;
        if env.ledger().timestamp() < unlock_time {
            return Err(Error::LockNotExpired);
        }
        let locked_token = storage::get_locked_token(&env).ok_or(Error::NotInitialized)?;

        let client = token::Client::new(&env, &locked_token);
        let here = env.current_contract_address();
        let amount = client.balance(&here);
        if amount > 0 {
            client.transfer(&here, &beneficiary, &amount);
        }
        events::withdrawn(&env, &locked_token, &beneficiary, amount);
        Ok(amount)
    }

    pub fn get_beneficiary(env: Env) -> Result<Address, Error> {
        storage::get_beneficiary(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_unlock_time(env: Env) -> Result<u64, Error> {
        storage::get_unlock_time(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_locked_token(env: Env) -> Result<Address, Error> {
        storage::get_locked_token(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_locked_balance(env: Env) -> Result<i128, Error> {
        let locked_token = storage::get_locked_token(&env).ok_or(Error::NotInitialized)?;
        Ok(token::Client::new(&env, &locked_token).balance(&env.current_contract_address()))
    }
}
