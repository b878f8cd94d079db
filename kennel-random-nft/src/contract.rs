use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply, Response,
    StdError, StdResult, SubMsg, Uint256, WasmMsg,
};
use cw2::set_contract_version;
use kennel_vrf_mock::msg::{ExecuteMsg as CoordinatorExecuteMsg, RandomWordsCallback};

use crate::error::ContractError;
use crate::helpers::{
    assert_mint_fee, assert_owner, derive_tier, reduce_raw_word, reject_funds,
    validate_chance_table,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kennel-random-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

/// Reply id of the randomness request submessage
pub const VRF_REQUEST_REPLY_ID: u64 = 1;

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_chance_table(&msg.chance_table, msg.tier_uris.len())?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        name: msg.name,
        symbol: msg.symbol,
        denom: msg.denom,
        mint_fee: msg.mint_fee,
        vrf_coordinator: deps.api.addr_validate(&msg.vrf_coordinator)?,
        subscription_id: msg.subscription_id,
        num_words: msg.num_words,
        chance_table: msg.chance_table,
        tier_uris: msg.tier_uris,
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("vrf_coordinator", config.vrf_coordinator.as_str()))
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestNft {} => execute_request_nft(deps, env, info),
        ExecuteMsg::RawFulfillRandomWords(callback) => {
            execute_raw_fulfill_random_words(deps, env, info, callback)
        }
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, env, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_nft(deps, env, info, contract, token_id, msg),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::ChanceTable {} => query_chance_table(deps),
        QueryMsg::TierUris {} => query_tier_uris(deps),
        QueryMsg::NumTokens {} => query_num_tokens(deps),
        QueryMsg::TokenUriOfTier { tier } => query_token_uri_of_tier(deps, tier),
        QueryMsg::NftInfo { token_id } => query_nft_info(deps, token_id),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
        QueryMsg::TokenRequester { request_id } => query_token_requester(deps, request_id),
        QueryMsg::TokenOfRequest { request_id } => query_token_of_request(deps, request_id),
        QueryMsg::TokensOfTier {
            tier,
            start_after,
            limit,
        } => query_tokens_of_tier(deps, tier, start_after, limit),
        QueryMsg::Tier { raw } => query_tier(deps, raw),
    }
}

// ─── Execute: Requesting ────────────────────────────────────────────────────

pub fn execute_request_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // Fee gate before any state change: an underpaid request creates nothing
    assert_mint_fee(&info, &config.denom, config.mint_fee)?;

    // The coordinator assigns the request id; hold the minter until the
    // reply binds the two together within this transaction
    PENDING_MINTER.save(deps.storage, &info.sender)?;

    let request = CoordinatorExecuteMsg::RequestRandomWords {
        subscription_id: config.subscription_id,
        num_words: config.num_words,
    };
    let request_msg = WasmMsg::Execute {
        contract_addr: config.vrf_coordinator.to_string(),
        msg: to_json_binary(&request)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(request_msg, VRF_REQUEST_REPLY_ID))
        .add_attribute("action", "request_nft")
        .add_attribute("minter", info.sender.as_str()))
}

pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != VRF_REQUEST_REPLY_ID {
        return Err(ContractError::UnknownReply { id: msg.id });
    }

    let response = msg.result.into_result().map_err(StdError::generic_err)?;
    let request_id: u64 = response
        .events
        .iter()
        .filter(|event| event.ty == "wasm")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "request_id")
        .ok_or(ContractError::MissingRequestId)?
        .value
        .parse()
        .map_err(|_| ContractError::MissingRequestId)?;

    let minter = PENDING_MINTER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingMint)?;
    REQUEST_MINTERS.save(deps.storage, request_id, &minter)?;
    PENDING_MINTER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "nft_requested")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("minter", minter.as_str()))
}

// ─── Execute: Fulfillment ───────────────────────────────────────────────────

pub fn execute_raw_fulfill_random_words(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    callback: RandomWordsCallback,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.vrf_coordinator {
        return Err(ContractError::Unauthorized {
            role: "vrf coordinator".to_string(),
        });
    }

    let request_id = callback.request_id;
    let minter = REQUEST_MINTERS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRequest { request_id })?;

    // A duplicate delivery must leave the first fulfillment's mappings
    // untouched, even if the coordinator misbehaves
    if REQUEST_TOKENS.may_load(deps.storage, request_id)?.is_some() {
        return Err(ContractError::AlreadyFulfilled { request_id });
    }

    if callback.random_words.is_empty() {
        return Err(ContractError::EmptyRandomWords);
    }

    let modulus = config.chance_table[config.chance_table.len() - 1];
    let raw_value = reduce_raw_word(callback.random_words[0], modulus);
    let tier = derive_tier(raw_value, &config.chance_table);

    let token_id = TOKEN_COUNT.load(deps.storage)?;
    TOKEN_OWNERS.save(deps.storage, token_id, &minter)?;
    TOKEN_TIERS.save(deps.storage, token_id, &tier)?;
    TIER_TOKENS.save(deps.storage, (tier, token_id), &true)?;
    REQUEST_TOKENS.save(deps.storage, request_id, &token_id)?;
    TOKEN_COUNT.save(deps.storage, &(token_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "nft_fulfilled")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("minter", minter.as_str())
        .add_attribute("tier", tier.to_string())
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("raw_result", callback.random_words[0].to_string()))
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

pub fn execute_transfer_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }

    let new_owner = deps.api.addr_validate(&recipient)?;
    TOKEN_OWNERS.save(deps.storage, token_id, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", owner.as_str())
        .add_attribute("to", new_owner.as_str()))
}

pub fn execute_send_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    contract: String,
    token_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }

    // State mutation BEFORE sub-message dispatch
    let contract_addr = deps.api.addr_validate(&contract)?;
    TOKEN_OWNERS.save(deps.storage, token_id, &contract_addr)?;

    let callback = cw721::receiver::Cw721ReceiveMsg {
        sender: info.sender.to_string(),
        token_id: token_id.to_string(),
        msg,
    };
    let callback_msg = WasmMsg::Execute {
        contract_addr: contract_addr.to_string(),
        msg: to_json_binary(&callback)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback_msg)
        .add_attribute("action", "send_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", owner.as_str())
        .add_attribute("to", contract_addr.as_str()))
}

// ─── Execute: Withdrawal ────────────────────────────────────────────────────

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.denom)?;
    if balance.amount.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }

    let msg = BankMsg::Send {
        to_address: config.owner.to_string(),
        amount: vec![balance.clone()],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "withdraw")
        .add_attribute("amount", balance.amount.to_string())
        .add_attribute("recipient", config.owner.as_str()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_chance_table(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&ChanceTableResponse {
        chance_table: config.chance_table,
    })
}

pub fn query_tier_uris(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&TierUrisResponse {
        tier_uris: config.tier_uris,
    })
}

pub fn query_num_tokens(deps: Deps) -> StdResult<Binary> {
    let count = TOKEN_COUNT.load(deps.storage)?;
    to_json_binary(&NumTokensResponse { count })
}

pub fn query_token_uri_of_tier(deps: Deps, tier: u8) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let token_uri = config
        .tier_uris
        .get(tier as usize)
        .ok_or_else(|| StdError::not_found(format!("tier {}", tier)))?;
    to_json_binary(&TokenUriResponse {
        token_uri: token_uri.clone(),
    })
}

pub fn query_nft_info(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))?;
    let tier = TOKEN_TIERS.load(deps.storage, token_id)?;
    let config = CONFIG.load(deps.storage)?;
    let token_uri = config
        .tier_uris
        .get(tier as usize)
        .ok_or_else(|| StdError::not_found(format!("tier {}", tier)))?;

    to_json_binary(&NftInfoResponse {
        token_id,
        owner: owner.to_string(),
        tier,
        token_uri: token_uri.clone(),
    })
}

pub fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let owner = TOKEN_OWNERS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))?;
    to_json_binary(&OwnerOfResponse {
        owner: owner.to_string(),
    })
}

pub fn query_token_requester(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let requester = REQUEST_MINTERS
        .may_load(deps.storage, request_id)?
        .ok_or_else(|| StdError::not_found(format!("request {}", request_id)))?;
    to_json_binary(&TokenRequesterResponse {
        requester: requester.to_string(),
    })
}

pub fn query_token_of_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let token_id = REQUEST_TOKENS
        .may_load(deps.storage, request_id)?
        .ok_or_else(|| StdError::not_found(format!("request {}", request_id)))?;
    to_json_binary(&TokenOfRequestResponse { token_id })
}

pub fn query_tokens_of_tier(
    deps: Deps,
    tier: u8,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(cw_storage_plus::Bound::exclusive);

    let tokens: Vec<u64> = TIER_TOKENS
        .prefix(tier)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TokensResponse { tokens })
}

pub fn query_tier(deps: Deps, raw: Uint256) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let modulus = config.chance_table[config.chance_table.len() - 1];
    let raw_value = reduce_raw_word(raw, modulus);
    to_json_binary(&TierResponse {
        tier: derive_tier(raw_value, &config.chance_table),
    })
}
