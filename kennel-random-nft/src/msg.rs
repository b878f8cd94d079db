use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};
use kennel_vrf_mock::msg::RandomWordsCallback;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub name: String,
    pub symbol: String,
    pub denom: String,
    pub mint_fee: Uint128,
    pub vrf_coordinator: String,
    pub subscription_id: u64,
    pub num_words: u32,
    /// Cumulative upper bounds; the last entry is the modulus
    pub chance_table: Vec<u32>,
    /// One static URI per tier, same order as the chance table
    pub tier_uris: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pay the mint fee and request a randomness-assigned NFT
    RequestNft {},
    /// Randomness delivery — callable only by the configured coordinator
    RawFulfillRandomWords(RandomWordsCallback),
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
    /// Cumulative chance table
    #[returns(ChanceTableResponse)]
    ChanceTable {},
    /// Static per-tier token URIs
    #[returns(TierUrisResponse)]
    TierUris {},
    /// Total minted count (== next token id)
    #[returns(NumTokensResponse)]
    NumTokens {},
    /// Static URI configured for a tier
    #[returns(TokenUriResponse)]
    TokenUriOfTier { tier: u8 },
    /// Owner, tier and URI of a minted token
    #[returns(NftInfoResponse)]
    NftInfo { token_id: u64 },
    /// Owner of a minted token
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    /// Minter recorded for a randomness request
    #[returns(TokenRequesterResponse)]
    TokenRequester { request_id: u64 },
    /// Token minted for a fulfilled request
    #[returns(TokenOfRequestResponse)]
    TokenOfRequest { request_id: u64 },
    /// Token ids of a tier, paginated by token id
    #[returns(TokensResponse)]
    TokensOfTier {
        tier: u8,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Tier a raw random value maps to (modulus applied first)
    #[returns(TierResponse)]
    Tier { raw: Uint256 },
}

#[cw_serde]
pub struct ChanceTableResponse {
    pub chance_table: Vec<u32>,
}

#[cw_serde]
pub struct TierUrisResponse {
    pub tier_uris: Vec<String>,
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
pub struct NftInfoResponse {
    pub token_id: u64,
    pub owner: String,
    pub tier: u8,
    pub token_uri: String,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
}

#[cw_serde]
pub struct TokenRequesterResponse {
    pub requester: String,
}

#[cw_serde]
pub struct TokenOfRequestResponse {
    pub token_id: u64,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}

#[cw_serde]
pub struct TierResponse {
    pub tier: u8,
}
