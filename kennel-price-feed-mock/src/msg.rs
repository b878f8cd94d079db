use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Int256;

use crate::state::RoundData;

#[cw_serde]
pub struct InstantiateMsg {
    pub pair: String,
    pub decimals: u8,
    pub initial_answer: Int256,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Publish a new round with the given answer. Unrestricted — this mock
    /// exists so tests can move the price.
    UpdateAnswer { answer: Int256 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(DecimalsResponse)]
    Decimals {},
    #[returns(LatestAnswerResponse)]
    LatestAnswer {},
    #[returns(RoundData)]
    LatestRoundData {},
}

#[cw_serde]
pub struct DecimalsResponse {
    pub decimals: u8,
}

#[cw_serde]
pub struct LatestAnswerResponse {
    pub answer: Int256,
}
