//! Instance storage for a single lock.
//!
//! | Key            | Type      | Description                        |
//! |----------------|-----------|------------------------------------|
//! | `LockedToken`  | `Address` | Token held until the unlock time   |
//! | `Beneficiary`  | `Address` | Current owner of the lock          |
//! | `UnlockTime`   | `u64`     | Ledger timestamp the lock opens at |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.

use soroban_sdk::{contracttype, Address, Env};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    LockedToken,
    Beneficiary,
    UnlockTime,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn init_lock(env: &Env, locked_token: &Address, beneficiary: &Address, unlock_time: u64) {
    let instance = env.storage().instance();
    instance.set(&DataKey::LockedToken, locked_token);
    instance.set(&DataKey::Beneficiary, beneficiary);
    instance.set(&DataKey::UnlockTime, &unlock_time);
    bump_instance(env);
}

pub fn get_locked_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::LockedToken)
}

pub fn get_beneficiary(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Beneficiary)
}

pub fn set_beneficiary(env: &Env, beneficiary: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::Beneficiary, beneficiary);
    bump_instance(env);
}

pub fn get_unlock_time(env: &Env) -> Option<u64> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::UnlockTime)
}

pub fn set_unlock_time(env: &Env, unlock_time: u64) {
    env.storage()
        .instance()
        .set(&DataKey::UnlockTime, &unlock_time);
    bump_instance(env);
}
