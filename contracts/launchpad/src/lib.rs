//! # Launchpad Contract
//!
//! A single Soroban contract hosting the sale factory, every sale it
//! deploys, and the user-sale index.
//!
//! | Phase        | Entry Point(s)                                                  |
//! |--------------|-----------------------------------------------------------------|
//! | Bootstrap    | [`Launchpad::init`]                                             |
//! | Factory      | `deploy_sale`, `predict_sale_id`, `set_base_sale_template`, `set_fee`, `set_fee_receiver`, `set_fee_order`, `transfer_ownership` |
//! | Sale         | `force_start_sale`, `contribute`, `finalize`, `claim_tokens`, `get_refund` |
//! | Queries      | `get_all_sales`, `get_sale`, `get_state`, `get_config`, `get_sales_for`, `calculate_tokens_claimable`, ... |
//!
//! ## Architecture
//!
//! Sale transitions are decided by the pure checks in [`sale`], amounts by
//! [`math`], and persistence goes through [`storage`]. Entry points here load
//! the ledger, read the timestamp once, run the checks, write state, and only
//! then move tokens.
//!
//! A failing entry point returns an [`Error`]; the host discards every write
//! and transfer made by that invocation.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env, Vec};

mod events;
mod index;
mod liquidity;
mod math;
mod registry;
mod sale;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_support;

pub use events::{
    ContributionAccepted, LiquidityLocked, RefundIssued, SaleDeployed, SaleFinalized, SaleStarted,
    TokensClaimed,
};
pub use liquidity::{LiquidityRouter, LiquidityRouterClient, TimeLock, TimeLockClient};
pub use types::{
    FeeOrder, LiquidityPosition, ProceedsSplit, Sale, SaleConfig, SaleInfo, SaleState, SaleStatus,
    Settlement,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized   = 1,
    NotInitialized       = 2,
    InvalidConfig        = 3,
    Unauthorized         = 4,
    InvalidState         = 5,
    NotActive            = 6,
    SaleEnded            = 7,
    CapExceeded          = 8,
    MaxBuyExceeded       = 9,
    TooEarly             = 10,
    AlreadyFinalized     = 11,
    AlreadyClaimed       = 12,
    AlreadyRefunded      = 13,
    RefundAlreadyTaken   = 14,
    TokensAlreadyClaimed = 15,
    NotFinalized         = 16,
    NotFailed            = 17,
    ArithmeticOverflow   = 18,
    SaleNotFound         = 19,
    NoContribution       = 20,
    InvalidAmount        = 21,
}

#[contract]
pub struct Launchpad;

#[contractimpl]
impl Launchpad {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the factory.
    ///
    /// Must be called exactly once after deployment. The fee starts at 2%
    /// and is paid to `owner` until a receiver is set.
    pub fn init(
        env: Env,
        owner: Address,
        base_token: Address,
        template: BytesN<32>,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::init_factory(&env, &owner, &base_token, &template);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Factory administration
    // ─────────────────────────────────────────────────────────

    pub fn set_base_sale_template(
        env: Env,
        caller: Address,
        template: BytesN<32>,
    ) -> Result<(), Error> {
        registry::require_owner(&env, &caller)?;
        storage::set_template(&env, &template);
        events::template_set(&env, &template);
        Ok(())
    }

    /// Set the platform fee. `bps` must be below 10 000.
    pub fn set_fee(env: Env, caller: Address, bps: u32) -> Result<(), Error> {
        registry::require_owner(&env, &caller)?;
        if bps >= 10_000 {
            return Err(Error::InvalidConfig);
        }
        storage::set_fee_bps(&env, bps);
        events::fee_set(&env, bps);
        Ok(())
    }

    pub fn set_fee_receiver(env: Env, caller: Address, receiver: Address) -> Result<(), Error> {
        registry::require_owner(&env, &caller)?;
        storage::set_fee_receiver(&env, &receiver);
        events::fee_receiver_set(&env, &receiver);
        Ok(())
    }

    /// Choose whether the platform fee or the creator fee share is taken
    /// from gross proceeds first.
    pub fn set_fee_order(env: Env, caller: Address, order: FeeOrder) -> Result<(), Error> {
        registry::require_owner(&env, &caller)?;
        storage::set_fee_order(&env, order);
        events::fee_order_set(&env, order);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        registry::require_owner(&env, &caller)?;
        storage::set_owner(&env, &new_owner);
        events::owner_set(&env, &caller, &new_owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Factory queries
    // ─────────────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_base_token(env: Env) -> Result<Address, Error> {
        storage::get_base_token(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_base_sale_template(env: Env) -> Result<BytesN<32>, Error> {
        storage::get_template(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_fee_bps(env: Env) -> u32 {
        storage::get_fee_bps(&env)
    }

    pub fn get_fee_receiver(env: Env) -> Result<Address, Error> {
        storage::get_fee_receiver(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_fee_order(env: Env) -> FeeOrder {
        storage::get_fee_order(&env)
    }

    pub fn get_sale_count(env: Env) -> u64 {
        storage::get_sale_count(&env)
    }

    /// Every deployed sale, in deployment order.
    pub fn get_all_sales(env: Env) -> Vec<BytesN<32>> {
        storage::get_all_sales(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Deployment
    // ─────────────────────────────────────────────────────────

    /// Identifier the next `deploy_sale(deployer, config)` will assign.
    /// Reads the registry sequence and writes nothing.
    pub fn predict_sale_id(env: Env, deployer: Address, config: SaleConfig) -> BytesN<32> {
        let sequence = storage::get_sale_count(&env);
        registry::derive_sale_id(&env, &deployer, &config, sequence)
    }

    /// Deploy a new sale.
    ///
    /// Validates `config`, escrows the sale inventory from `deployer` and
    /// registers the sale in `Created`. Returns the sale identifier.
    ///
    /// When part of the proceeds goes to liquidity, `liquidity_locker` must
    /// lock the router's LP token for the creator until at least
    /// `liquidity_unlock_time`, otherwise `InvalidConfig`.
    pub fn deploy_sale(env: Env, deployer: Address, config: SaleConfig) -> Result<BytesN<32>, Error> {
        deployer.require_auth();
        let base_token = storage::get_base_token(&env).ok_or(Error::NotInitialized)?;
        let template = storage::get_template(&env).ok_or(Error::NotInitialized)?;
        let now = env.ledger().timestamp();
        sale::validate_config(&config, &base_token, now)?;
        if config.creator_fee_bps > 0 {
            liquidity::check_custody(&env, &config, &base_token)?;
        }

        let sequence = storage::get_sale_count(&env);
        let id = registry::derive_sale_id(&env, &deployer, &config, sequence);
        if storage::has_sale(&env, &id) {
            return Err(Error::InvalidConfig);
        }

        let sale_token = token::Client::new(&env, &config.token);
        let base_decimals = token::Client::new(&env, &base_token).decimals();
        let token_decimals = sale_token.decimals();
        let tokens_deposited = registry::required_inventory(&config, base_decimals, token_decimals)?;

        let info = SaleInfo {
            id: id.clone(),
            deployer: deployer.clone(),
            template,
            sequence,
            created_at: now,
            base_decimals,
            token_decimals,
            tokens_deposited,
        };
        storage::append_sale(&env, &config, &info, &SaleState::new());

        sale_token.transfer(&deployer, &env.current_contract_address(), &tokens_deposited);

        events::sale_deployed(
            &env,
            SaleDeployed {
                sale_id: id.clone(),
                deployer,
                creator: config.creator.clone(),
                token: config.token.clone(),
                soft_cap: config.soft_cap,
                hard_cap: config.hard_cap,
                sequence,
            },
        );
        Ok(id)
    }

    // ─────────────────────────────────────────────────────────
    // Sale lifecycle
    // ─────────────────────────────────────────────────────────

    /// Open a `Created` sale immediately. Creator only.
    pub fn force_start_sale(env: Env, sale_id: BytesN<32>, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let (config, _, mut state) = registry::load_sale(&env, &sale_id)?;
        if caller != config.creator {
            return Err(Error::Unauthorized);
        }
        let now = env.ledger().timestamp();
        sale::start(&mut state, now)?;
        storage::save_sale_state(&env, &sale_id, &state);
        events::sale_started(&env, &sale_id, now);
        Ok(())
    }

    /// Contribute `amount` of the base currency. Returns the participant's
    /// cumulative contribution.
    pub fn contribute(
        env: Env,
        sale_id: BytesN<32>,
        participant: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        participant.require_auth();
        let (config, _, mut state) = registry::load_sale(&env, &sale_id)?;
        let base_token = storage::get_base_token(&env).ok_or(Error::NotInitialized)?;
        let now = env.ledger().timestamp();

        let opened = sale::open_if_created(&mut state, now);
        let existing = storage::get_contribution(&env, &sale_id, &participant);
        let settlement = storage::get_settlement(&env, &sale_id, &participant);
        let cumulative = sale::contribute(
            &config,
            &mut state,
            existing,
            settlement.as_ref(),
            amount,
            now,
        )?;

        storage::set_contribution(&env, &sale_id, &participant, cumulative);
        storage::save_sale_state(&env, &sale_id, &state);
        if existing == 0 {
            index::record_participation(&env, &participant, &sale_id);
        }

        token::Client::new(&env, &base_token).transfer(
            &participant,
            &env.current_contract_address(),
            &amount,
        );

        if opened {
            events::sale_started(&env, &sale_id, now);
        }
        events::contribution_accepted(&env, &sale_id, &participant, amount, state.total_raised);
        Ok(cumulative)
    }

    /// Decide the outcome of the sale. Permissionless; callable once the
    /// hard cap is reached or the sale has ended.
    ///
    /// On success the net raise is split between the fee receiver, the
    /// liquidity router and the creator, the minted LP tokens go to the
    /// sale's locker, and unsold inventory goes back to the creator. On failure only the inventory moves; contributions stay
    /// escrowed for refunds.
    pub fn finalize(env: Env, sale_id: BytesN<32>) -> Result<SaleStatus, Error> {
        let (config, info, mut state) = registry::load_sale(&env, &sale_id)?;
        let base_token = storage::get_base_token(&env).ok_or(Error::NotInitialized)?;
        let now = env.ledger().timestamp();

        let opened = sale::open_if_created(&mut state, now);
        let status = sale::finalize(&config, &mut state, now)?;
        let net_raised = state.net_raised();
        if opened {
            events::sale_started(&env, &sale_id, now);
        }

        let (split, listing_tokens, unsold) = if status == SaleStatus::Finalized {
            let split = math::split_proceeds(
                net_raised,
                storage::get_fee_bps(&env),
                config.creator_fee_bps,
                storage::get_fee_order(&env),
            )?;
            let owed = math::tokens_claimable(
                net_raised,
                config.price,
                info.base_decimals,
                info.token_decimals,
            )?;
            let listing_tokens = math::tokens_claimable(
                split.liquidity,
                config.listing_price,
                info.base_decimals,
                info.token_decimals,
            )?;
            let unsold = info.tokens_deposited - owed - listing_tokens;
            (split, listing_tokens, unsold)
        } else {
            let split = ProceedsSplit {
                platform_fee: 0,
                liquidity: 0,
                creator_payout: 0,
            };
            (split, 0, info.tokens_deposited)
        };
        let fee_receiver = storage::get_fee_receiver(&env).ok_or(Error::NotInitialized)?;

        storage::save_sale_state(&env, &sale_id, &state);

        let here = env.current_contract_address();
        let base = token::Client::new(&env, &base_token);
        let sale_token = token::Client::new(&env, &config.token);

        if split.platform_fee > 0 {
            base.transfer(&here, &fee_receiver, &split.platform_fee);
        }
        if split.creator_payout > 0 {
            base.transfer(&here, &config.creator, &split.creator_payout);
        }
        if split.liquidity > 0 {
            base.transfer(&here, &config.router, &split.liquidity);
            if listing_tokens > 0 {
                sale_token.transfer(&here, &config.router, &listing_tokens);
            }
            let position = LiquidityRouterClient::new(&env, &config.router).add_liquidity(
                &config.token,
                &base_token,
                &listing_tokens,
                &split.liquidity,
                &here,
            );
            if position.amount > 0 {
                token::Client::new(&env, &position.lp_token).transfer(
                    &here,
                    &config.liquidity_locker,
                    &position.amount,
                );
            }
            events::liquidity_locked(
                &env,
                LiquidityLocked {
                    sale_id: sale_id.clone(),
                    locker: config.liquidity_locker.clone(),
                    lp_token: position.lp_token,
                    amount: position.amount,
                    unlock_time: config.liquidity_unlock_time,
                },
            );
        }
        if unsold > 0 {
            sale_token.transfer(&here, &config.creator, &unsold);
        }

        events::sale_finalized(
            &env,
            SaleFinalized {
                sale_id,
                status,
                net_raised,
                split,
                finalized_at: now,
            },
        );
        Ok(status)
    }

    /// Claim purchased tokens from a finalized sale. Returns the amount sent.
    pub fn claim_tokens(env: Env, sale_id: BytesN<32>, participant: Address) -> Result<i128, Error> {
        participant.require_auth();
        let (config, info, state) = registry::load_sale(&env, &sale_id)?;
        let contribution = storage::get_contribution(&env, &sale_id, &participant);
        let settlement = storage::get_settlement(&env, &sale_id, &participant);
        sale::check_claim(&state, contribution, settlement.as_ref())?;

        let amount = math::tokens_claimable(
            contribution,
            config.price,
            info.base_decimals,
            info.token_decimals,
        )?;
        storage::set_settlement(&env, &sale_id, &participant, &Settlement::Claimed(amount));

        token::Client::new(&env, &config.token).transfer(
            &env.current_contract_address(),
            &participant,
            &amount,
        );

        events::tokens_claimed(&env, &sale_id, &participant, amount);
        Ok(amount)
    }

    /// Take back a contribution from a failed sale, or exit a running sale
    /// before it ends. Returns the amount sent.
    pub fn get_refund(env: Env, sale_id: BytesN<32>, participant: Address) -> Result<i128, Error> {
        participant.require_auth();
        let (config, _, mut state) = registry::load_sale(&env, &sale_id)?;
        let base_token = storage::get_base_token(&env).ok_or(Error::NotInitialized)?;
        let now = env.ledger().timestamp();
        let contribution = storage::get_contribution(&env, &sale_id, &participant);
        let settlement = storage::get_settlement(&env, &sale_id, &participant);
        sale::check_refund(&config, &state, contribution, settlement.as_ref(), now)?;

        state.total_refunded = state
            .total_refunded
            .checked_add(contribution)
            .ok_or(Error::ArithmeticOverflow)?;
        storage::set_settlement(
            &env,
            &sale_id,
            &participant,
            &Settlement::Refunded(contribution),
        );
        storage::save_sale_state(&env, &sale_id, &state);

        token::Client::new(&env, &base_token).transfer(
            &env.current_contract_address(),
            &participant,
            &contribution,
        );

        events::refund_issued(&env, &sale_id, &participant, contribution);
        Ok(contribution)
    }

    // ─────────────────────────────────────────────────────────
    // Sale queries
    // ─────────────────────────────────────────────────────────

    /// Tokens `amount` of base currency buys in this sale. Pure.
    pub fn calculate_tokens_claimable(
        env: Env,
        sale_id: BytesN<32>,
        amount: i128,
    ) -> Result<i128, Error> {
        let (config, info, _) = registry::load_sale(&env, &sale_id)?;
        math::tokens_claimable(amount, config.price, info.base_decimals, info.token_decimals)
    }

    pub fn get_sale(env: Env, sale_id: BytesN<32>) -> Result<Sale, Error> {
        let (config, info, state) = registry::load_sale(&env, &sale_id)?;
        Ok(Sale {
            id: sale_id,
            config,
            info,
            state,
        })
    }

    pub fn get_state(env: Env, sale_id: BytesN<32>) -> Result<SaleStatus, Error> {
        storage::load_sale_state(&env, &sale_id)
            .map(|state| state.status)
            .ok_or(Error::SaleNotFound)
    }

    pub fn get_config(env: Env, sale_id: BytesN<32>) -> Result<SaleConfig, Error> {
        storage::load_sale_config(&env, &sale_id).ok_or(Error::SaleNotFound)
    }

    pub fn get_contribution(env: Env, sale_id: BytesN<32>, participant: Address) -> i128 {
        storage::get_contribution(&env, &sale_id, &participant)
    }

    pub fn get_settlement(env: Env, sale_id: BytesN<32>, participant: Address) -> Option<Settlement> {
        storage::get_settlement(&env, &sale_id, &participant)
    }

    // ─────────────────────────────────────────────────────────
    // User-sale index
    // ─────────────────────────────────────────────────────────

    /// Sales `participant` has contributed to, in first-contribution order.
    pub fn get_sales_for(env: Env, participant: Address) -> Vec<BytesN<32>> {
        index::sales_for(&env, &participant)
    }
}
