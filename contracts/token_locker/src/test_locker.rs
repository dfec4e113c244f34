extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::{Error, LockExtended, Released, TokenLocker, TokenLockerClient};

const UNLOCK: u64 = 1_700_002_000;

struct Setup {
    env: Env,
    client: TokenLockerClient<'static>,
    beneficiary: Address,
    token: token::Client<'static>,
    spam: token::Client<'static>,
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(UNLOCK - 2_000);

    let beneficiary = Address::generate(&env);
    let admin = Address::generate(&env);
    let token = create_token(&env, &admin);
    let spam = create_token(&env, &admin);

    let contract_id = env.register(
        TokenLocker,
        (token.address.clone(), beneficiary.clone(), UNLOCK),
    );
    let client = TokenLockerClient::new(&env, &contract_id);
    token::StellarAssetClient::new(&env, &token.address).mint(&contract_id, &1_000);

    Setup {
        env,
        client,
        beneficiary,
        token,
        spam,
    }
}

#[test]
fn test_constructor_binds_lock() {
    let s = setup();
    assert_eq!(s.client.get_beneficiary(), s.beneficiary);
    assert_eq!(s.client.get_unlock_time(), UNLOCK);
    assert_eq!(s.client.get_locked_token(), s.token.address);
    assert_eq!(s.client.get_locked_balance(), 1_000);
}

#[test]
fn test_lock_actions_need_beneficiary_auth() {
    let env = Env::default();
    env.ledger().set_timestamp(UNLOCK);
    let admin = Address::generate(&env);
    let beneficiary = Address::generate(&env);
    let attacker = Address::generate(&env);
    let token = create_token(&env, &admin);

    let contract_id = env.register(
        TokenLocker,
        (token.address.clone(), beneficiary.clone(), UNLOCK),
    );
    let client = TokenLockerClient::new(&env, &contract_id);
    token::StellarAssetClient::new(&env, &token.address)
        .mock_all_auths()
        .mint(&contract_id, &1_000);

    assert!(client.try_withdraw(&attacker).is_err());
    assert!(client.try_withdraw(&beneficiary).is_err());
    assert!(client.try_transfer_beneficiary(&attacker, &attacker).is_err());
    assert!(client.try_extend_locktime(&beneficiary, &10).is_err());

    assert_eq!(client.get_beneficiary(), beneficiary);
    assert_eq!(client.get_unlock_time(), UNLOCK);
    assert_eq!(token.balance(&contract_id), 1_000);
}

#[test]
fn test_transfer_beneficiary() {
    let s = setup();
    let next = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.client.try_transfer_beneficiary(&stranger, &stranger),
        Err(Ok(Error::Unauthorized))
    );
    s.client.transfer_beneficiary(&s.beneficiary, &next);
    assert_eq!(s.client.get_beneficiary(), next);

    // The previous beneficiary lost control.
    assert_eq!(
        s.client.try_extend_locktime(&s.beneficiary, &10),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(s.client.extend_locktime(&next, &10), UNLOCK + 10);
}

#[test]
fn test_extend_locktime_only_increases() {
    let s = setup();
    assert_eq!(s.client.extend_locktime(&s.beneficiary, &1_000), UNLOCK + 1_000);
    assert_eq!(s.client.get_unlock_time(), UNLOCK + 1_000);

    assert_eq!(
        s.client.try_extend_locktime(&s.beneficiary, &0),
        Err(Ok(Error::InvalidExtension))
    );
    assert_eq!(
        s.client.try_extend_locktime(&s.beneficiary, &u64::MAX),
        Err(Ok(Error::ArithmeticOverflow))
    );
    assert_eq!(s.client.get_unlock_time(), UNLOCK + 1_000);
}

#[test]
fn test_cannot_sweep_locked_token() {
    let s = setup();
    assert_eq!(
        s.client.try_sweep(&s.beneficiary, &s.token.address),
        Err(Ok(Error::CannotSweepLockedToken))
    );
    assert_eq!(s.token.balance(&s.client.address), 1_000);
}

#[test]
fn test_sweep_other_token() {
    let s = setup();
    let holder = Address::generate(&s.env);
    let spam_sac = token::StellarAssetClient::new(&s.env, &s.spam.address);
    spam_sac.mint(&holder, &10_000);
    s.spam.transfer(&holder, &s.client.address, &10_000);

    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.client.try_sweep(&stranger, &s.spam.address),
        Err(Ok(Error::Unauthorized))
    );

    assert_eq!(s.client.sweep(&s.beneficiary, &s.spam.address), 10_000);
    assert_eq!(s.spam.balance(&s.beneficiary), 10_000);
    assert_eq!(s.spam.balance(&s.client.address), 0);
    assert_eq!(s.client.get_locked_balance(), 1_000);
}

#[test]
fn test_withdraw_after_unlock() {
    let s = setup();
    assert_eq!(
        s.client.try_withdraw(&s.beneficiary),
        Err(Ok(Error::LockNotExpired))
    );

    s.env.ledger().set_timestamp(UNLOCK - 1);
    assert_eq!(
        s.client.try_withdraw(&s.beneficiary),
        Err(Ok(Error::LockNotExpired))
    );

    s.env.ledger().set_timestamp(UNLOCK);
    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.client.try_withdraw(&stranger),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(s.client.withdraw(&s.beneficiary), 1_000);
    assert_eq!(s.token.balance(&s.beneficiary), 1_000);
    assert_eq!(s.client.get_locked_balance(), 0);
}

#[test]
fn test_extension_delays_withdraw() {
    let s = setup();
    s.client.extend_locktime(&s.beneficiary, &500);
    s.env.ledger().set_timestamp(UNLOCK + 499);
    assert_eq!(
        s.client.try_withdraw(&s.beneficiary),
        Err(Ok(Error::LockNotExpired))
    );
    s.env.ledger().set_timestamp(UNLOCK + 500);
    assert_eq!(s.client.withdraw(&s.beneficiary), 1_000);
}

#[test]
fn test_lock_extended_event() {
    let s = setup();
    s.client.extend_locktime(&s.beneficiary, &60);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, s.client.address);
    let expected_topics = vec![&s.env, symbol_short!("lock_ext").into_val(&s.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: LockExtended = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        LockExtended {
            previous: UNLOCK,
            unlock_time: UNLOCK + 60,
        }
    );
}

#[test]
fn test_withdrawn_event() {
    let s = setup();
    s.env.ledger().set_timestamp(UNLOCK);
    s.client.withdraw(&s.beneficiary);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &s.env,
        symbol_short!("withdrawn").into_val(&s.env),
        s.token.address.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Released = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        Released {
            token: s.token.address.clone(),
            to: s.beneficiary.clone(),
            amount: 1_000,
        }
    );
}
