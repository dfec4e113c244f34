//! Ledger events for off-chain observers.
//!
//! | Topic                     | Data                   |
//! |---------------------------|------------------------|
//! | `("deployed", sale_id)`   | [`SaleDeployed`]       |
//! | `("started", sale_id)`    | [`SaleStarted`]        |
//! | `("contrib", sale_id)`    | [`ContributionAccepted`] |
//! | `("finalized", sale_id)`  | [`SaleFinalized`]      |
//! | `("liq_lock", sale_id)`   | [`LiquidityLocked`]    |
//! | `("claimed", sale_id)`    | [`TokensClaimed`]      |
//! | `("refunded", sale_id)`   | [`RefundIssued`]       |
//! | `("fee_set",)`            | `u32`                  |
//! | `("rcvr_set",)`           | `Address`              |
//! | `("order_set",)`          | [`FeeOrder`]           |
//! | `("tmpl_set",)`           | `BytesN<32>`           |
//! | `("owner_set",)`          | `(Address, Address)`   |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::types::{FeeOrder, ProceedsSplit, SaleStatus};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleDeployed {
    pub sale_id: BytesN<32>,
    pub deployer: Address,
    pub creator: Address,
    pub token: Address,
    pub soft_cap: i128,
    pub hard_cap: i128,
    pub sequence: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleStarted {
    pub sale_id: BytesN<32>,
    pub start_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionAccepted {
    pub sale_id: BytesN<32>,
    pub participant: Address,
    pub amount: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleFinalized {
    pub sale_id: BytesN<32>,
    pub status: SaleStatus,
    pub net_raised: i128,
    pub split: ProceedsSplit,
    pub finalized_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityLocked {
    pub sale_id: BytesN<32>,
    pub locker: Address,
    pub lp_token: Address,
    pub amount: i128,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimed {
    pub sale_id: BytesN<32>,
    pub participant: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub sale_id: BytesN<32>,
    pub participant: Address,
    pub amount: i128,
}

pub fn sale_deployed(env: &Env, event: SaleDeployed) {
    env.events()
        .publish((symbol_short!("deployed"), event.sale_id.clone()), event);
}

pub fn sale_started(env: &Env, sale_id: &BytesN<32>, start_time: u64) {
    env.events().publish(
        (symbol_short!("started"), sale_id.clone()),
        SaleStarted {
            sale_id: sale_id.clone(),
            start_time,
        },
    );
}

pub fn contribution_accepted(
    env: &Env,
    sale_id: &BytesN<32>,
    participant: &Address,
    amount: i128,
    total_raised: i128,
) {
    env.events().publish(
        (symbol_short!("contrib"), sale_id.clone()),
        ContributionAccepted {
            sale_id: sale_id.clone(),
            participant: participant.clone(),
            amount,
            total_raised,
        },
    );
}

pub fn sale_finalized(env: &Env, event: SaleFinalized) {
    env.events()
        .publish((symbol_short!("finalized"), event.sale_id.clone()), event);
}

pub fn liquidity_locked(env: &Env, event: LiquidityLocked) {
    env.events()
        .publish((symbol_short!("liq_lock"), event.sale_id.clone()), event);
}

pub fn tokens_claimed(env: &Env, sale_id: &BytesN<32>, participant: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claimed"), sale_id.clone()),
        TokensClaimed {
            sale_id: sale_id.clone(),
            participant: participant.clone(),
            amount,
        },
    );
}

pub fn refund_issued(env: &Env, sale_id: &BytesN<32>, participant: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refunded"), sale_id.clone()),
        RefundIssued {
            sale_id: sale_id.clone(),
            participant: participant.clone(),
            amount,
        },
    );
}

pub fn fee_set(env: &Env, bps: u32) {
    env.events().publish((symbol_short!("fee_set"),), bps);
}

pub fn fee_receiver_set(env: &Env, receiver: &Address) {
    env.events()
        .publish((symbol_short!("rcvr_set"),), receiver.clone());
}

pub fn fee_order_set(env: &Env, order: FeeOrder) {
    env.events().publish((symbol_short!("order_set"),), order);
}

pub fn template_set(env: &Env, template: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("tmpl_set"),), template.clone());
}

pub fn owner_set(env: &Env, previous: &Address, owner: &Address) {
    env.events().publish(
        (symbol_short!("owner_set"),),
        (previous.clone(), owner.clone()),
    );
}
