//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the launchpad.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type          | Description                          |
//! |-----------------|---------------|--------------------------------------|
//! | `Owner`         | `Address`     | Factory owner                        |
//! | `BaseToken`     | `Address`     | Base currency every sale raises in   |
//! | `Template`      | `BytesN<32>`  | Sale template new sales are bound to |
//! | `FeeBps`        | `u32`         | Platform fee in basis points         |
//! | `FeeReceiver`   | `Address`     | Platform fee destination             |
//! | `FeeOrder`      | `FeeOrder`    | Fee application order                |
//! | `SaleCount`     | `u64`         | Registry sequence number             |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type          | Description                   |
//! |--------------------------|---------------|-------------------------------|
//! | `SaleAt(n)`              | `BytesN<32>`  | n-th deployed sale            |
//! | `SaleConfig(id)`         | `SaleConfig`  | Immutable deployer config     |
//! | `SaleInfo(id)`           | `SaleInfo`    | Immutable deploy-time facts   |
//! | `SaleState(id)`          | `SaleState`   | Mutable sale ledger           |
//! | `Contribution(id, addr)` | `i128`        | Cumulative contribution       |
//! | `Settlement(id, addr)`   | `Settlement`  | Claim or refund taken         |
//! | `UserSales(addr)`        | `Vec<BytesN>` | User-sale index               |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::{FeeOrder, SaleConfig, SaleInfo, SaleState, Settlement};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Platform fee a fresh launchpad starts with (2%).
pub const DEFAULT_FEE_BPS: u32 = 200;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    BaseToken,
    Template,
    FeeBps,
    FeeReceiver,
    FeeOrder,
    SaleCount,
    SaleAt(u64),
    SaleConfig(BytesN<32>),
    SaleInfo(BytesN<32>),
    SaleState(BytesN<32>),
    Contribution(BytesN<32>, Address),
    Settlement(BytesN<32>, Address),
    UserSales(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

/// Write the factory settings of a fresh launchpad.
pub fn init_factory(env: &Env, owner: &Address, base_token: &Address, template: &BytesN<32>) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, owner);
    instance.set(&DataKey::BaseToken, base_token);
    instance.set(&DataKey::Template, template);
    instance.set(&DataKey::FeeBps, &DEFAULT_FEE_BPS);
    instance.set(&DataKey::FeeReceiver, owner);
    instance.set(&DataKey::FeeOrder, &FeeOrder::PlatformFirst);
    instance.set(&DataKey::SaleCount, &0u64);
    bump_instance(env);
}

fn get_instance<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> Option<V> {
    bump_instance(env);
    env.storage().instance().get(key)
}

fn set_instance<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, key: &DataKey, val: &V) {
    env.storage().instance().set(key, val);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    get_instance(env, &DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    set_instance(env, &DataKey::Owner, owner);
}

pub fn get_base_token(env: &Env) -> Option<Address> {
    get_instance(env, &DataKey::BaseToken)
}

pub fn get_template(env: &Env) -> Option<BytesN<32>> {
    get_instance(env, &DataKey::Template)
}

pub fn set_template(env: &Env, template: &BytesN<32>) {
    set_instance(env, &DataKey::Template, template);
}

pub fn get_fee_bps(env: &Env) -> u32 {
    get_instance(env, &DataKey::FeeBps).unwrap_or(DEFAULT_FEE_BPS)
}

pub fn set_fee_bps(env: &Env, bps: u32) {
    set_instance(env, &DataKey::FeeBps, &bps);
}

pub fn get_fee_receiver(env: &Env) -> Option<Address> {
    get_instance(env, &DataKey::FeeReceiver)
}

pub fn set_fee_receiver(env: &Env, receiver: &Address) {
    set_instance(env, &DataKey::FeeReceiver, receiver);
}

pub fn get_fee_order(env: &Env) -> FeeOrder {
    get_instance(env, &DataKey::FeeOrder).unwrap_or(FeeOrder::PlatformFirst)
}

pub fn set_fee_order(env: &Env, order: FeeOrder) {
    set_instance(env, &DataKey::FeeOrder, &order);
}

/// Current registry sequence number (the number of sales deployed so far).
pub fn get_sale_count(env: &Env) -> u64 {
    get_instance(env, &DataKey::SaleCount).unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn get_persistent<V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn set_persistent<V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(
    env: &Env,
    key: &DataKey,
    val: &V,
) {
    env.storage().persistent().set(key, val);
    bump_persistent(env, key);
}

/// Append a new sale to the registry and persist its three entries.
/// Returns the sequence number the sale was stored under.
pub fn append_sale(env: &Env, config: &SaleConfig, info: &SaleInfo, state: &SaleState) -> u64 {
    let sequence = get_sale_count(env);
    set_persistent(env, &DataKey::SaleAt(sequence), &info.id);
    set_persistent(env, &DataKey::SaleConfig(info.id.clone()), config);
    set_persistent(env, &DataKey::SaleInfo(info.id.clone()), info);
    set_persistent(env, &DataKey::SaleState(info.id.clone()), state);
    set_instance(env, &DataKey::SaleCount, &(sequence + 1));
    sequence
}

pub fn has_sale(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::SaleConfig(id.clone()))
}

pub fn get_sale_at(env: &Env, sequence: u64) -> Option<BytesN<32>> {
    get_persistent(env, &DataKey::SaleAt(sequence))
}

/// All deployed sale ids in deployment order.
pub fn get_all_sales(env: &Env) -> Vec<BytesN<32>> {
    let mut sales = Vec::new(env);
    for sequence in 0..get_sale_count(env) {
        if let Some(id) = get_sale_at(env, sequence) {
            sales.push_back(id);
        }
    }
    sales
}

pub fn load_sale_config(env: &Env, id: &BytesN<32>) -> Option<SaleConfig> {
    get_persistent(env, &DataKey::SaleConfig(id.clone()))
}

pub fn load_sale_info(env: &Env, id: &BytesN<32>) -> Option<SaleInfo> {
    get_persistent(env, &DataKey::SaleInfo(id.clone()))
}

pub fn load_sale_state(env: &Env, id: &BytesN<32>) -> Option<SaleState> {
    get_persistent(env, &DataKey::SaleState(id.clone()))
}

/// Save only the mutable sale state.
pub fn save_sale_state(env: &Env, id: &BytesN<32>, state: &SaleState) {
    set_persistent(env, &DataKey::SaleState(id.clone()), state);
}

pub fn get_contribution(env: &Env, id: &BytesN<32>, participant: &Address) -> i128 {
    get_persistent(env, &DataKey::Contribution(id.clone(), participant.clone())).unwrap_or(0)
}

pub fn set_contribution(env: &Env, id: &BytesN<32>, participant: &Address, amount: i128) {
    set_persistent(
        env,
        &DataKey::Contribution(id.clone(), participant.clone()),
        &amount,
    );
}

pub fn get_settlement(env: &Env, id: &BytesN<32>, participant: &Address) -> Option<Settlement> {
    get_persistent(env, &DataKey::Settlement(id.clone(), participant.clone()))
}

pub fn set_settlement(env: &Env, id: &BytesN<32>, participant: &Address, settlement: &Settlement) {
    set_persistent(
        env,
        &DataKey::Settlement(id.clone(), participant.clone()),
        settlement,
    );
}

pub fn get_user_sales(env: &Env, participant: &Address) -> Vec<BytesN<32>> {
    get_persistent(env, &DataKey::UserSales(participant.clone())).unwrap_or(Vec::new(env))
}

pub fn set_user_sales(env: &Env, participant: &Address, sales: &Vec<BytesN<32>>) {
    set_persistent(env, &DataKey::UserSales(participant.clone()), sales);
}
