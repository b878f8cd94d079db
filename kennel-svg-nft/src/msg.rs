use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Int256, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub name: String,
    pub symbol: String,
    pub denom: String,
    pub mint_fee: Uint128,
    pub price_feed: String,
    /// Raw SVG markup for the above-threshold variant
    pub bull_svg: String,
    /// Raw SVG markup for the at-or-below-threshold variant
    pub bear_svg: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pay the mint fee and mint with a caller-chosen price threshold
    MintNft { threshold: Int256 },
    /// Transfer a token (owner only)
    TransferNft { recipient: String, token_id: u64 },
    /// Send a token to a contract with a cw721 receive hook
    SendNft {
        contract: String,
        token_id: u64,
        msg: cosmwasm_std::Binary,
    },
    /// Sweep the accumulated mint fees to the owner (owner only)
    Withdraw {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Contract configuration
    #[returns(crate::state::Config)]
    Config {},
    /// The two pre-computed image data URIs
    #[returns(crate::state::ImageUris)]
    ImageUris {},
    /// Total minted count (== next token id)
    #[returns(NumTokensResponse)]
    NumTokens {},
    /// Self-contained metadata document, re-derived from the live price on
    /// every call
    #[returns(TokenUriResponse)]
    TokenUri { token_id: u64 },
    /// Threshold fixed at mint; 0 for ids that were never minted
    #[returns(TokenThresholdResponse)]
    TokenThreshold { token_id: u64 },
    /// Live feed answer passthrough
    #[returns(StockPriceResponse)]
    StockPrice {},
    /// Pure assembler: wrap SVG markup into a base64 image data URI
    #[returns(SvgToImageUriResponse)]
    SvgToImageUri { svg: String },
    /// Owner of a minted token
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub token_uri: String,
}

#[cw_serde]
pub struct TokenThresholdResponse {
    pub threshold: Int256,
}

#[cw_serde]
pub struct StockPriceResponse {
    pub price: Int256,
}

#[cw_serde]
pub struct SvgToImageUriResponse {
    pub image_uri: String,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}
