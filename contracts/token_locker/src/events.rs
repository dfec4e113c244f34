use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Locked {
    pub token: Address,
    pub beneficiary: Address,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockExtended {
    pub previous: u64,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Released {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}

pub fn locked(env: &Env, token: &Address, beneficiary: &Address, unlock_time: u64) {
    env.events().publish(
        (symbol_short!("locked"),),
        Locked {
            token: token.clone(),
            beneficiary: beneficiary.clone(),
            unlock_time,
        },
    );
}

pub fn lock_extended(env: &Env, previous: u64, unlock_time: u64) {
    env.events().publish(
        (symbol_short!("lock_ext"),),
        LockExtended {
            previous,
            unlock_time,
        },
    );
}

pub fn beneficiary_set(env: &Env, previous: &Address, beneficiary: &Address) {
    env.events().publish(
        (symbol_short!("benef_set"),),
        (previous.clone(), beneficiary.clone()),
    );
}

pub fn swept(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("swept"), token.clone()),
        Released {
            token: token.clone(),
            to: to.clone(),
            amount,
        },
    );
}

pub fn withdrawn(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), token.clone()),
        Released {
            token: token.clone(),
            to: to.clone(),
            amount,
        },
    );
}
