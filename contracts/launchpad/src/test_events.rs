extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    ContributionAccepted, LiquidityLocked, RefundIssued, SaleDeployed, SaleFinalized, SaleStarted,
    TokensClaimed,
};
use crate::test_support::{liquidity_unlock_time, Harness, START, UNIT};

fn sale_topics(h: &Harness, name: Symbol, id: &BytesN<32>) -> Vec<Val> {
    vec![&h.env, name.into_val(&h.env), id.into_val(&h.env)]
}
use crate::{FeeOrder, ProceedsSplit, SaleStatus};

#[test]
fn test_sale_deployed_event() {
    let h = Harness::new();
    let config = h.config();
    let id = h.deploy(&config);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("deployed"), sale_id)
    assert_eq!(last_event.0, h.client.address);
    let expected_topics = vec![
        &h.env,
        symbol_short!("deployed").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: SaleDeployed = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        SaleDeployed {
            sale_id: id,
            deployer: h.creator.clone(),
            creator: h.creator.clone(),
            token: config.token.clone(),
            soft_cap: config.soft_cap,
            hard_cap: config.hard_cap,
            sequence: 0,
        }
    );
}

#[test]
fn test_sale_started_event() {
    let h = Harness::new();
    let id = h.deploy(&h.config());
    h.client.force_start_sale(&id, &h.creator);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &h.env,
        symbol_short!("started").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: SaleStarted = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        SaleStarted {
            sale_id: id,
            start_time: START,
        }
    );
}

#[test]
fn test_contribution_event() {
    let h = Harness::new();
    let id = h.deploy(&h.config());
    let first = h.buyer(UNIT);
    let second = h.buyer(UNIT);
    h.client.contribute(&id, &first, &UNIT);
    h.client.contribute(&id, &second, &(UNIT / 4));

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("contrib"), sale_id)
    assert_eq!(last_event.0, h.client.address);
    let expected_topics = vec![
        &h.env,
        symbol_short!("contrib").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ContributionAccepted = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        ContributionAccepted {
            sale_id: id,
            participant: second,
            amount: UNIT / 4,
            total_raised: UNIT + UNIT / 4,
        }
    );
}

#[test]
fn test_sale_finalized_event() {
    let h = Harness::new();
    let config = h.config();
    let id = h.deploy(&config);
    for b in h.buyers(3, UNIT).iter() {
        h.client.contribute(&id, b, &UNIT);
    }
    h.end_sale(&config);
    h.client.finalize(&id);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &h.env,
        symbol_short!("finalized").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: SaleFinalized = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        SaleFinalized {
            sale_id: id,
            status: SaleStatus::Finalized,
            net_raised: 3 * UNIT,
            split: ProceedsSplit {
                platform_fee: 600_000,
                liquidity: 5_880_000,
                creator_payout: 23_520_000,
            },
            finalized_at: config.sale_end_time + 1,
        }
    );
}

#[test]
fn test_liquidity_locked_event() {
    let h = Harness::new();
    let config = h.config();
    let id = h.deploy(&config);
    for b in h.buyers(3, UNIT).iter() {
        h.client.contribute(&id, b, &UNIT);
    }
    h.end_sale(&config);
    h.client.finalize(&id);

    let expected_topics = sale_topics(&h, symbol_short!("liq_lock"), &id);
    let event = h
        .env
        .events()
        .all()
        .iter()
        .find(|e| e.0 == h.client.address && e.1 == expected_topics)
        .expect("No liq_lock event");

    let event_data: LiquidityLocked = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        LiquidityLocked {
            sale_id: id,
            locker: h.locker.address.clone(),
            lp_token: h.lp_token.address.clone(),
            amount: 5_880_000,
            unlock_time: liquidity_unlock_time(),
        }
    );
}

#[test]
fn test_lazy_start_is_published_before_finalize_transfers() {
    let h = Harness::new();
    let config = h.config();
    let id = h.deploy(&config);
    h.end_sale(&config);
    h.client.finalize(&id);

    let started_topics = sale_topics(&h, symbol_short!("started"), &id);
    let finalized_topics = sale_topics(&h, symbol_short!("finalized"), &id);
    let mut started = None;
    let mut inventory_returned = None;
    let mut finalized = None;
    for (i, (contract, topics, _)) in h.env.events().all().iter().enumerate() {
        if contract == h.client.address && topics == started_topics {
            started = Some(i);
        }
        if contract == h.client.address && topics == finalized_topics {
            finalized = Some(i);
        }
        if contract == h.sale_token.address {
            inventory_returned = Some(i);
        }
    }

    let started = started.expect("No started event");
    let inventory_returned = inventory_returned.expect("No inventory transfer");
    let finalized = finalized.expect("No finalized event");
    assert!(started < inventory_returned);
    assert!(inventory_returned < finalized);
}

#[test]
fn test_failed_sale_event_has_empty_split() {
    let h = Harness::new();
    let config = h.config();
    let id = h.deploy(&config);
    let buyer = h.buyer(UNIT);
    h.client.contribute(&id, &buyer, &UNIT);
    h.end_sale(&config);
    h.client.finalize(&id);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let event_data: SaleFinalized = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(event_data.status, SaleStatus::Failed);
    assert_eq!(event_data.net_raised, UNIT);
    assert_eq!(
        event_data.split,
        ProceedsSplit {
            platform_fee: 0,
            liquidity: 0,
            creator_payout: 0,
        }
    );
}

#[test]
fn test_tokens_claimed_event() {
    let h = Harness::new();
    let mut config = h.config();
    config.max_buy = 5 * UNIT;
    let id = h.deploy(&config);
    let buyer = h.buyer(5 * UNIT);
    h.client.contribute(&id, &buyer, &(5 * UNIT));
    h.client.finalize(&id);
    h.client.claim_tokens(&id, &buyer);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("claimed"), sale_id)
    let expected_topics = vec![
        &h.env,
        symbol_short!("claimed").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TokensClaimed = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        TokensClaimed {
            sale_id: id,
            participant: buyer,
            amount: 25 * UNIT,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let h = Harness::new();
    let id = h.deploy(&h.config());
    let buyer = h.buyer(UNIT);
    h.client.contribute(&id, &buyer, &(UNIT / 2));
    h.client.get_refund(&id, &buyer);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("refunded"), sale_id)
    let expected_topics = vec![
        &h.env,
        symbol_short!("refunded").into_val(&h.env),
        id.into_val(&h.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RefundIssued = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        RefundIssued {
            sale_id: id,
            participant: buyer,
            amount: UNIT / 2,
        }
    );
}

#[test]
fn test_fee_set_event() {
    let h = Harness::new();
    h.client.set_fee(&h.owner, &350);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&h.env, symbol_short!("fee_set").into_val(&h.env)];
    assert_eq!(last_event.1, expected_topics);
    let bps: u32 = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(bps, 350);
}

#[test]
fn test_fee_order_set_event() {
    let h = Harness::new();
    h.client.set_fee_order(&h.owner, &FeeOrder::CreatorFirst);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&h.env, symbol_short!("order_set").into_val(&h.env)];
    assert_eq!(last_event.1, expected_topics);
    let order: FeeOrder = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(order, FeeOrder::CreatorFirst);
}

#[test]
fn test_ownership_event() {
    let h = Harness::new();
    let next = Address::generate(&h.env);
    h.client.transfer_ownership(&h.owner, &next);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&h.env, symbol_short!("owner_set").into_val(&h.env)];
    assert_eq!(last_event.1, expected_topics);
    let (previous, owner): (Address, Address) = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(previous, h.owner);
    assert_eq!(owner, next);
}

#[test]
fn test_template_event() {
    let h = Harness::new();
    let template = BytesN::from_array(&h.env, &[7u8; 32]);
    h.client.set_base_sale_template(&h.owner, &template);

    let all_events = h.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&h.env, symbol_short!("tmpl_set").into_val(&h.env)];
    assert_eq!(last_event.1, expected_topics);
    let data: BytesN<32> = last_event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, template);
}
