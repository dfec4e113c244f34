//! User-sale index: the sales each participant has contributed to.
//!
//! No contract entry point writes here. The only writer is the contribute
//! path of the sale being recorded.

use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::storage::{get_user_sales, set_user_sales};

/// Append `sale_id` to the participant's list unless it is already there.
/// Returns `true` when the list changed.
pub(crate) fn record_participation(env: &Env, participant: &Address, sale_id: &BytesN<32>) -> bool {
    let mut sales = get_user_sales(env, participant);
    if sales.contains(sale_id) {
        return false;
    }
    sales.push_back(sale_id.clone());
    set_user_sales(env, participant, &sales);
    true
}

/// Sales the participant has contributed to, in first-contribution order.
pub fn sales_for(env: &Env, participant: &Address) -> Vec<BytesN<32>> {
    get_user_sales(env, participant)
}
