extern crate std;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short,
    testutils::{Address as _, Ledger},
    token, Address, BytesN, Env, String,
};

use token_locker::{TokenLocker, TokenLockerClient};

use crate::{Launchpad, LaunchpadClient, LiquidityPosition, SaleConfig};

/// One whole unit of a 7-decimal Stellar asset.
pub const UNIT: i128 = 10_000_000;
pub const START: u64 = 1_700_000_000;
pub const SALE_LENGTH: u64 = 6_000;

/// Arguments of the last `add_liquidity` call a [`MockRouter`] received.
/// The router mints one LP token per unit of `amount_b`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingCall {
    pub token_a: Address,
    pub token_b: Address,
    pub amount_a: i128,
    pub amount_b: i128,
    pub to: Address,
}

#[contract]
pub struct MockRouter;

#[contractimpl]
impl MockRouter {
    /// The router must be the admin of `lp_token`.
    pub fn set_lp_token(env: Env, lp_token: Address) {
        env.storage().instance().set(&symbol_short!("lp"), &lp_token);
    }

    pub fn lp_token(env: Env, _token_a: Address, _token_b: Address) -> Address {
        env.storage()
            .instance()
            .get(&symbol_short!("lp"))
            .expect("lp token not set")
    }

    pub fn add_liquidity(
        env: Env,
        token_a: Address,
        token_b: Address,
        amount_a: i128,
        amount_b: i128,
        to: Address,
    ) -> LiquidityPosition {
        let lp_token = Self::lp_token(env.clone(), token_a.clone(), token_b.clone());
        token::StellarAssetClient::new(&env, &lp_token).mint(&to, &amount_b);
        let call = ListingCall {
            token_a,
            token_b,
            amount_a,
            amount_b,
            to,
        };
        env.storage().instance().set(&symbol_short!("listing"), &call);
        LiquidityPosition {
            lp_token,
            amount: amount_b,
        }
    }

    pub fn last_listing(env: Env) -> Option<ListingCall> {
        env.storage().instance().get(&symbol_short!("listing"))
    }
}

pub struct Harness {
    pub env: Env,
    pub client: LaunchpadClient<'static>,
    pub owner: Address,
    pub creator: Address,
    pub base: token::Client<'static>,
    pub base_sac: token::StellarAssetClient<'static>,
    pub sale_token: token::Client<'static>,
    pub router: MockRouterClient<'static>,
    pub lp_token: token::Client<'static>,
    pub locker: TokenLockerClient<'static>,
}

pub fn liquidity_unlock_time() -> u64 {
    START + SALE_LENGTH + 86_400
}

pub fn template(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0x5au8; 32])
}

fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

impl Harness {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

        let contract_id = env.register(Launchpad, ());
        let client = LaunchpadClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        let creator = Address::generate(&env);
        let token_admin = Address::generate(&env);

        let base_address = create_token(&env, &token_admin);
        let sale_address = create_token(&env, &token_admin);
        client.init(&owner, &base_address, &template(&env));

        token::StellarAssetClient::new(&env, &sale_address).mint(&creator, &(1_000 * UNIT));

        let router_id = env.register(MockRouter, ());
        let router = MockRouterClient::new(&env, &router_id);
        let lp_address = create_token(&env, &router_id);
        router.set_lp_token(&lp_address);

        let locker_id = env.register(
            TokenLocker,
            (lp_address.clone(), creator.clone(), liquidity_unlock_time()),
        );

        Harness {
            base: token::Client::new(&env, &base_address),
            base_sac: token::StellarAssetClient::new(&env, &base_address),
            sale_token: token::Client::new(&env, &sale_address),
            router,
            lp_token: token::Client::new(&env, &lp_address),
            locker: TokenLockerClient::new(&env, &locker_id),
            env,
            client,
            owner,
            creator,
        }
    }

    /// softCap 3, hardCap 5, maxBuy 1, price 5, listing price 2, 20% to
    /// liquidity.
    pub fn config(&self) -> SaleConfig {
        SaleConfig {
            token: self.sale_token.address.clone(),
            secondary_token: None,
            max_buy: UNIT,
            soft_cap: 3 * UNIT,
            hard_cap: 5 * UNIT,
            price: 5,
            listing_price: 2,
            liquidity_unlock_time: liquidity_unlock_time(),
            sale_end_time: START + SALE_LENGTH,
            metadata: String::from_str(&self.env, "{\"name\":\"Test Sale\"}"),
            router: self.router.address.clone(),
            liquidity_locker: self.locker.address.clone(),
            creator: self.creator.clone(),
            creator_fee_bps: 2_000,
        }
    }

    pub fn deploy(&self, config: &SaleConfig) -> BytesN<32> {
        self.client.deploy_sale(&self.creator, config)
    }

    /// A fresh participant holding `funds` of the base currency.
    pub fn buyer(&self, funds: i128) -> Address {
        let buyer = Address::generate(&self.env);
        self.base_sac.mint(&buyer, &funds);
        buyer
    }

    pub fn buyers(&self, count: usize, funds: i128) -> std::vec::Vec<Address> {
        (0..count).map(|_| self.buyer(funds)).collect()
    }

    pub fn end_sale(&self, config: &SaleConfig) {
        self.env.ledger().set_timestamp(config.sale_end_time + 1);
    }
}
