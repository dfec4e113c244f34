//! # Types
//!
//! Shared data structures used across all modules of the launchpad.
//!
//! ## Config / Info / State split
//!
//! A sale is stored as three ledger entries:
//!
//! - [`SaleConfig`]: supplied by the deployer, frozen at deploy time.
//! - [`SaleInfo`]: facts recorded by the factory at deploy time
//!   (identifier, sequence, escrowed inventory, token decimals).
//! - [`SaleState`]: the small mutable part, written on every contribution,
//!   refund and on finalize.
//!
//! Per-participant entries (contribution and settlement) live under their
//! own keys, see [`crate::storage`]. The public API exposes the
//! reconstructed [`Sale`] struct for convenience.
//!
//! ## Status as a Finite-State Machine
//!
//! ```text
//! Created ──► Active ──► Finalized
//!                └─────► Failed
//! ```
//!
//! `Finalized` and `Failed` are terminal.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Lifecycle status of a sale.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    /// Deployed, inventory escrowed, not yet opened.
    Created,
    /// Accepting contributions.
    Active,
    /// Soft cap reached; contributors claim tokens.
    Finalized,
    /// Soft cap missed; contributors take refunds.
    Failed,
}

impl SaleStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Finalized | SaleStatus::Failed)
    }
}

/// Order in which the platform fee and the creator fee share are taken
/// from the raised amount at finalize.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FeeOrder {
    /// Platform fee from gross, creator fee share from what is left.
    PlatformFirst,
    /// Creator fee share from gross, platform fee from what is left.
    CreatorFirst,
}

/// Deployer-supplied sale parameters. Field order is part of the public
/// interface and of the sale identifier derivation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Token being sold.
    pub token: Address,
    /// Optional secondary token. Recorded and reported, never traded;
    /// listing always pairs `token` with the base currency.
    pub secondary_token: Option<Address>,
    /// Maximum cumulative contribution per participant (base units).
    pub max_buy: i128,
    /// Minimum raise for the sale to succeed.
    pub soft_cap: i128,
    /// Maximum raise.
    pub hard_cap: i128,
    /// Tokens per unit of contributed value.
    pub price: i128,
    /// Tokens per unit of value paired with the liquidity share at listing.
    pub listing_price: i128,
    /// Timestamp until which the listed liquidity stays locked.
    pub liquidity_unlock_time: u64,
    /// Last timestamp at which contributions are accepted.
    pub sale_end_time: u64,
    /// Opaque details blob (usually JSON).
    pub metadata: String,
    /// External liquidity router.
    pub router: Address,
    /// Time-locked custody that receives the listed liquidity position. Must
    /// lock the router's LP token for `creator` until at least
    /// `liquidity_unlock_time`.
    pub liquidity_locker: Address,
    /// Receives the creator payout and may force-start the sale.
    pub creator: Address,
    /// Share of proceeds withheld from the creator payout for liquidity.
    pub creator_fee_bps: u32,
}

/// Facts fixed by the factory when the sale is deployed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleInfo {
    pub id: BytesN<32>,
    pub deployer: Address,
    /// Sale template in force when this sale was deployed.
    pub template: BytesN<32>,
    /// Registry sequence number the id was derived from.
    pub sequence: u64,
    pub created_at: u64,
    pub base_decimals: u32,
    pub token_decimals: u32,
    /// Sale tokens pulled from the deployer into escrow.
    pub tokens_deposited: i128,
}

/// Mutable sale ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleState {
    pub status: SaleStatus,
    pub start_time: Option<u64>,
    /// Sum of all contributions ever accepted.
    pub total_raised: i128,
    /// Sum of contributions paid back through refunds.
    pub total_refunded: i128,
    /// Number of distinct contributors.
    pub participants: u32,
    pub finalized_at: Option<u64>,
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            status: SaleStatus::Created,
            start_time: None,
            total_raised: 0,
            total_refunded: 0,
            participants: 0,
            finalized_at: None,
        }
    }

    /// Raised value still held for the sale.
    pub fn net_raised(&self) -> i128 {
        self.total_raised - self.total_refunded
    }
}

impl Default for SaleState {
    fn default() -> Self {
        Self::new()
    }
}

/// LP tokens a router minted for a listing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityPosition {
    pub lp_token: Address,
    pub amount: i128,
}

/// Terminal action a participant has taken on a sale. A participant holds
/// at most one settlement per sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Settlement {
    /// Sale tokens received.
    Claimed(i128),
    /// Base currency returned.
    Refunded(i128),
}

/// How the net raise of a successful sale is distributed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProceedsSplit {
    pub platform_fee: i128,
    pub liquidity: i128,
    pub creator_payout: i128,
}

/// Full on-chain representation of a sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sale {
    pub id: BytesN<32>,
    pub config: SaleConfig,
    pub info: SaleInfo,
    pub state: SaleState,
}
