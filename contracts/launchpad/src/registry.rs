//! Factory-side helpers: sale identifiers, escrow sizing, owner checks and
//! loading a sale back out of storage.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::math;
use crate::storage;
use crate::types::{SaleConfig, SaleInfo, SaleState};
use crate::Error;

/// Sale identifier: `sha256(xdr(deployer) ‖ xdr(config) ‖ sequence_be)`.
///
/// Depends only on its arguments, so a prediction made before deploying
/// matches the deployment as long as the registry sequence has not moved.
pub fn derive_sale_id(
    env: &Env,
    deployer: &Address,
    config: &SaleConfig,
    sequence: u64,
) -> BytesN<32> {
    let mut preimage = Bytes::new(env);
    preimage.append(&deployer.clone().to_xdr(env));
    preimage.append(&config.clone().to_xdr(env));
    preimage.extend_from_array(&sequence.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

/// Sale tokens the deployer escrows: full allocation at hard cap plus the
/// largest listing allotment the liquidity share can require.
pub fn required_inventory(
    config: &SaleConfig,
    base_decimals: u32,
    token_decimals: u32,
) -> Result<i128, Error> {
    let for_sale = math::tokens_claimable(
        config.hard_cap,
        config.price,
        base_decimals,
        token_decimals,
    )?;
    let for_listing = math::listing_reserve(
        config.hard_cap,
        config.creator_fee_bps,
        config.listing_price,
        base_decimals,
        token_decimals,
    )?;
    for_sale
        .checked_add(for_listing)
        .ok_or(Error::ArithmeticOverflow)
}

/// Authenticate `caller` and check it is the factory owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let owner = storage::get_owner(env).ok_or(Error::NotInitialized)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn load_sale(env: &Env, id: &BytesN<32>) -> Result<(SaleConfig, SaleInfo, SaleState), Error> {
    let config = storage::load_sale_config(env, id).ok_or(Error::SaleNotFound)?;
    let info = storage::load_sale_info(env, id).ok_or(Error::SaleNotFound)?;
    let state = storage::load_sale_state(env, id).ok_or(Error::SaleNotFound)?;
    Ok((config, info, state))
}
