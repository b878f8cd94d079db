use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Int256, Timestamp};
use cw_storage_plus::Item;

/// Feed-reported constants, not validated further
#[cw_serde]
pub struct Config {
    /// Asset pair this feed reports, e.g. "ETH/USD"
    pub pair: String,
    pub decimals: u8,
}

/// Latest published round
#[cw_serde]
pub struct RoundData {
    pub round_id: u64,
    pub answer: Int256,
    pub started_at: Timestamp,
    pub updated_at: Timestamp,
    pub answered_in_round: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const LATEST_ROUND: Item<RoundData> = Item::new("latest_round");
