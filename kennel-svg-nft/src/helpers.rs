use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_string, Addr, Binary, Deps, Int256, MessageInfo, StdResult, Uint128};
use kennel_price_feed_mock::msg::{LatestAnswerResponse, QueryMsg as FeedQueryMsg};

use crate::error::ContractError;
use crate::state::CONFIG;

/// One metadata attribute, `{trait_type, value}`
#[cw_serde]
pub struct Trait {
    pub trait_type: String,
    pub value: Int256,
}

/// Token metadata document; field order is the serialized key order
#[cw_serde]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Trait>,
}

/// Wrap raw SVG markup into a base64 image data URI. Pure: identical input
/// yields byte-identical output.
pub fn svg_to_image_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        Binary::from(svg.as_bytes()).to_base64()
    )
}

/// Serialize a metadata document and wrap it into a base64 JSON data URI
pub fn build_metadata(
    name: &str,
    description: &str,
    image_uri: &str,
    attributes: Vec<Trait>,
) -> StdResult<String> {
    let metadata = Metadata {
        name: name.to_string(),
        description: description.to_string(),
        image: image_uri.to_string(),
        attributes,
    };
    let json = to_json_string(&metadata)?;
    Ok(format!(
        "data:application/json;base64,{}",
        Binary::from(json.as_bytes()).to_base64()
    ))
}

/// Read the current answer from the configured price feed
pub fn query_live_price(deps: Deps, price_feed: &Addr) -> StdResult<Int256> {
    let res: LatestAnswerResponse = deps
        .querier
        .query_wasm_smart(price_feed, &FeedQueryMsg::LatestAnswer {})?;
    Ok(res.answer)
}

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Fee gate: the attached funds must cover `required` in `denom`.
/// Checked before any state is touched.
pub fn assert_mint_fee(
    info: &MessageInfo,
    denom: &str,
    required: Uint128,
) -> Result<(), ContractError> {
    let sent = info
        .funds
        .iter()
        .filter(|coin| coin.denom == denom)
        .map(|coin| coin.amount)
        .sum::<Uint128>();
    if sent < required {
        return Err(ContractError::NotEnoughFee {
            required: required.to_string(),
            sent: sent.to_string(),
        });
    }
    Ok(())
}
