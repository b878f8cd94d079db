use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Immutable oracle parameters, fixed at instantiation
#[cw_serde]
pub struct Config {
    pub base_fee: Uint128,
    pub gas_price: Uint128,
    pub wei_per_unit_link: Uint128,
}

/// A funded, owner-controlled authorization unit gating randomness requests
#[cw_serde]
pub struct Subscription {
    pub owner: Addr,
    pub balance: Uint128,
    /// Set semantics — adding an existing consumer is a no-op
    pub consumers: Vec<Addr>,
}

/// One randomness request, correlated to its fulfillment by map key
#[cw_serde]
pub struct RandomnessRequest {
    pub subscription_id: u64,
    /// Consumer contract that made the request (callback target)
    pub requester: Addr,
    pub num_words: u32,
    /// Transitions false -> true exactly once
    pub fulfilled: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Last assigned subscription id; ids start at 1
pub const SUB_COUNT: Item<u64> = Item::new("sub_count");

/// Last assigned request id; ids start at 1, never reused
pub const REQUEST_COUNT: Item<u64> = Item::new("request_count");

/// subscription_id -> Subscription
pub const SUBSCRIPTIONS: Map<u64, Subscription> = Map::new("subscriptions");

/// request_id -> RandomnessRequest (entries are never deleted)
pub const REQUESTS: Map<u64, RandomnessRequest> = Map::new("requests");
