//! Event types emitted by the launchpad and token locker contracts.
//!
//! These mirror `contracts/launchpad/src/events.rs` and
//! `contracts/token_locker/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A sale was deployed by the factory (`deployed`).
    SaleDeployed,
    /// A sale opened (`started`).
    SaleStarted,
    /// A participant contributed (`contrib`).
    Contribution,
    /// A sale reached its terminal outcome (`finalized`).
    SaleFinalized,
    /// LP tokens of a listing moved into the sale's locker (`liq_lock`).
    LiquidityLocked,
    /// Purchased tokens were claimed (`claimed`).
    TokensClaimed,
    /// A contribution was refunded (`refunded`).
    RefundIssued,
    FeeSet,
    FeeReceiverSet,
    FeeOrderSet,
    TemplateSet,
    OwnershipTransferred,
    /// A lock was created (`locked`).
    Locked,
    /// A lock's unlock time moved forward (`lock_ext`).
    LockExtended,
    BeneficiarySet,
    /// A foreign token was swept out of a lock (`swept`).
    Swept,
    /// The locked balance was released (`withdrawn`).
    Withdrawn,
    /// An event from a watched contract that we don't recognise.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "deployed" => Self::SaleDeployed,
            "started" => Self::SaleStarted,
            "contrib" => Self::Contribution,
            "finalized" => Self::SaleFinalized,
            "liq_lock" => Self::LiquidityLocked,
            "claimed" => Self::TokensClaimed,
            "refunded" => Self::RefundIssued,
            "fee_set" => Self::FeeSet,
            "rcvr_set" => Self::FeeReceiverSet,
            "order_set" => Self::FeeOrderSet,
            "tmpl_set" => Self::TemplateSet,
            "owner_set" => Self::OwnershipTransferred,
            "locked" => Self::Locked,
            "lock_ext" => Self::LockExtended,
            "benef_set" => Self::BeneficiarySet,
            "swept" => Self::Swept,
            "withdrawn" => Self::Withdrawn,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SaleDeployed => "sale_deployed",
            Self::SaleStarted => "sale_started",
            Self::Contribution => "contribution",
            Self::SaleFinalized => "sale_finalized",
            Self::LiquidityLocked => "liquidity_locked",
            Self::TokensClaimed => "tokens_claimed",
            Self::RefundIssued => "refund_issued",
            Self::FeeSet => "fee_set",
            Self::FeeReceiverSet => "fee_receiver_set",
            Self::FeeOrderSet => "fee_order_set",
            Self::TemplateSet => "template_set",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Locked => "locked",
            Self::LockExtended => "lock_extended",
            Self::BeneficiarySet => "beneficiary_set",
            Self::Swept => "swept",
            Self::Withdrawn => "withdrawn",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic of this event is a sale id.
    pub fn is_sale_scoped(&self) -> bool {
        matches!(
            self,
            Self::SaleDeployed
                | Self::SaleStarted
                | Self::Contribution
                | Self::SaleFinalized
                | Self::LiquidityLocked
                | Self::TokensClaimed
                | Self::RefundIssued
        )
    }
}

/// A decoded event, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadEvent {
    /// RPC event id; unique per ledger event.
    pub event_id: String,
    pub event_type: String,
    /// Lower-case hex sale id for sale-scoped events.
    pub sale_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub sale_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Normalise a sale id to 64 lower-case hex characters. Accepts an
/// optional `0x` prefix and either case.
pub fn normalize_sale_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).ok()?;
    (bytes.len() == 32).then(|| hex::encode(bytes))
}
