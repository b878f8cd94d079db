use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Int256, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract-level configuration
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub name: String,
    pub symbol: String,
    /// Native denom the mint fee is paid in
    pub denom: String,
    pub mint_fee: Uint128,
    /// Price feed the token URI is re-derived against on every read
    pub price_feed: Addr,
}

/// Image data URIs, computed once from raw SVG markup at instantiation
#[cw_serde]
pub struct ImageUris {
    /// Shown while the live price is above the token's threshold
    pub bull: String,
    /// Shown at or below the threshold
    pub bear: String,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const IMAGE_URIS: Item<ImageUris> = Item::new("image_uris");

/// Next token id to assign; ids start at 0 and are never reused
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// token_id -> owner
pub const TOKEN_OWNERS: Map<u64, Addr> = Map::new("token_owners");

/// token_id -> threshold fixed at mint; the live price is compared against
/// it on every token URI read
pub const TOKEN_THRESHOLDS: Map<u64, Int256> = Map::new("token_thresholds");
