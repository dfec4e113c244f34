//! Sale state machine.
//!
//! Pure transition checks over [`SaleConfig`] / [`SaleState`]. Nothing here
//! touches storage or moves funds; the entry points in `lib.rs` load the
//! ledger, call into this module with the ledger timestamp, then persist and
//! transfer.

use soroban_sdk::Address;

use crate::types::{SaleConfig, SaleState, SaleStatus, Settlement};
use crate::Error;

/// Reject configs that violate the sale invariants.
pub fn validate_config(config: &SaleConfig, base_token: &Address, now: u64) -> Result<(), Error> {
    let valid = config.soft_cap > 0
        && config.soft_cap <= config.hard_cap
        && config.max_buy > 0
        && config.price > 0
        && config.listing_price >= 0
        && config.sale_end_time > now
        && config.creator_fee_bps < 10_000
        && config.token != *base_token
        && config.secondary_token.as_ref() != Some(&config.token);

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig)
    }
}

/// Move a `Created` sale to `Active`.
pub fn start(state: &mut SaleState, now: u64) -> Result<(), Error> {
    if state.status != SaleStatus::Created {
        return Err(Error::InvalidState);
    }
    state.status = SaleStatus::Active;
    state.start_time = Some(now);
    Ok(())
}

/// Apply the start condition: inventory is escrowed at deploy, so a
/// `Created` sale opens the first time it is touched. Returns `true` when
/// the sale was opened by this call.
pub fn open_if_created(state: &mut SaleState, now: u64) -> bool {
    if state.status == SaleStatus::Created {
        state.status = SaleStatus::Active;
        state.start_time = Some(now);
        true
    } else {
        false
    }
}

/// Apply a contribution to the ledger. `existing` is the participant's
/// cumulative contribution before this call. Returns the new cumulative
/// contribution.
pub fn contribute(
    config: &SaleConfig,
    state: &mut SaleState,
    existing: i128,
    settlement: Option<&Settlement>,
    amount: i128,
    now: u64,
) -> Result<i128, Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if state.status != SaleStatus::Active {
        return Err(Error::NotActive);
    }
    if now > config.sale_end_time {
        return Err(Error::SaleEnded);
    }
    if matches!(settlement, Some(Settlement::Refunded(_))) {
        return Err(Error::RefundAlreadyTaken);
    }

    let total = state
        .total_raised
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    if total > config.hard_cap {
        return Err(Error::CapExceeded);
    }
    let cumulative = existing
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    if cumulative > config.max_buy {
        return Err(Error::MaxBuyExceeded);
    }

    state.total_raised = total;
    if existing == 0 {
        state.participants += 1;
    }
    Ok(cumulative)
}

/// Decide the terminal outcome of an `Active` sale and record it.
pub fn finalize(config: &SaleConfig, state: &mut SaleState, now: u64) -> Result<SaleStatus, Error> {
    if state.status.is_terminal() {
        return Err(Error::AlreadyFinalized);
    }
    if state.status != SaleStatus::Active {
        return Err(Error::InvalidState);
    }
    // Refunded value still counts toward the hard cap, but only value that
    // stayed in the sale can close it early.
    if state.net_raised() < config.hard_cap && now <= config.sale_end_time {
        return Err(Error::TooEarly);
    }

    state.status = if state.net_raised() >= config.soft_cap {
        SaleStatus::Finalized
    } else {
        SaleStatus::Failed
    };
    state.finalized_at = Some(now);
    Ok(state.status)
}

/// Check that a participant may claim sale tokens.
pub fn check_claim(
    state: &SaleState,
    contribution: i128,
    settlement: Option<&Settlement>,
) -> Result<(), Error> {
    match settlement {
        Some(Settlement::Claimed(_)) => return Err(Error::AlreadyClaimed),
        Some(Settlement::Refunded(_)) => return Err(Error::RefundAlreadyTaken),
        None => {}
    }
    if state.status != SaleStatus::Finalized {
        return Err(Error::NotFinalized);
    }
    if contribution <= 0 {
        return Err(Error::NoContribution);
    }
    Ok(())
}

/// Check that a participant may take a refund. Refunds are open once the
/// sale failed, and as an early exit while the sale is still running.
pub fn check_refund(
    config: &SaleConfig,
    state: &SaleState,
    contribution: i128,
    settlement: Option<&Settlement>,
    now: u64,
) -> Result<(), Error> {
    match settlement {
        Some(Settlement::Refunded(_)) => return Err(Error::AlreadyRefunded),
        Some(Settlement::Claimed(_)) => return Err(Error::TokensAlreadyClaimed),
        None => {}
    }
    let open = match state.status {
        SaleStatus::Failed => true,
        SaleStatus::Active => now <= config.sale_end_time,
        SaleStatus::Created | SaleStatus::Finalized => false,
    };
    if !open {
        return Err(Error::NotFailed);
    }
    if contribution <= 0 {
        return Err(Error::NoContribution);
    }
    Ok(())
}
