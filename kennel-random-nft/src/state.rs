use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract-level configuration, validated once at instantiation
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub name: String,
    pub symbol: String,
    /// Native denom the mint fee is paid in
    pub denom: String,
    pub mint_fee: Uint128,
    /// Coordinator contract — the only address allowed to deliver words
    pub vrf_coordinator: Addr,
    pub subscription_id: u64,
    pub num_words: u32,
    /// Cumulative upper bounds, e.g. [5, 30, 100]; the last entry is the
    /// modulus applied to raw random words
    pub chance_table: Vec<u32>,
    /// Static token URI per tier; same length as the chance table
    pub tier_uris: Vec<String>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Next token id to assign; ids start at 0 and are never reused
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// token_id -> owner
pub const TOKEN_OWNERS: Map<u64, Addr> = Map::new("token_owners");

/// token_id -> tier (immutable after mint)
pub const TOKEN_TIERS: Map<u64, u8> = Map::new("token_tiers");

/// (tier, token_id) -> bool — reverse index for per-tier listing
pub const TIER_TOKENS: Map<(u8, u64), bool> = Map::new("tier_tokens");

/// request_id -> paying minter; never purged, the fulfillment path reads it
pub const REQUEST_MINTERS: Map<u64, Addr> = Map::new("request_minters");

/// request_id -> minted token_id; doubles as the fulfilled marker
pub const REQUEST_TOKENS: Map<u64, u64> = Map::new("request_tokens");

/// Scratch slot between dispatching the randomness request and binding the
/// coordinator-assigned id in the reply, within one transaction
pub const PENDING_MINTER: Item<Addr> = Item::new("pending_minter");
