use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Deps, DepsMut, Env, Int256, MessageInfo, Response, StdError,
    StdResult, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{
    assert_mint_fee, assert_owner, build_metadata, query_live_price, reject_funds,
    svg_to_image_uri, Trait,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kennel-svg-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed description embedded in every metadata document
pub const TOKEN_DESCRIPTION: &str = "A dynamic SVG NFT tracking a live price feed";

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        name: msg.name,
        symbol: msg.symbol,
        denom: msg.denom,
        mint_fee: msg.mint_fee,
        price_feed: deps.api.addr_validate(&msg.price_feed)?,
    };
    CONFIG.save(deps.storage, &config)?;

    // The raw markup is folded into data URIs once; reads only ever see these
    let image_uris = ImageUris {
        bull: svg_to_image_uri(&msg.bull_svg),
        bear: svg_to_image_uri(&msg.bear_svg),
    };
    IMAGE_URIS.save(deps.storage, &image_uris)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("price_feed", config.price_feed.as_str()))
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::MintNft { threshold } => execute_mint_nft(deps, env, info, threshold),
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
        QueryMsg::ImageUris {} => query_image_uris(deps),
        QueryMsg::NumTokens {} => query_num_tokens(deps),
        QueryMsg::TokenUri { token_id } => query_token_uri(deps, token_id),
        QueryMsg::TokenThreshold { token_id } => query_token_threshold(deps, token_id),
        QueryMsg::StockPrice {} => query_stock_price(deps),
        QueryMsg::SvgToImageUri { svg } => query_svg_to_image_uri(svg),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
    }
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_mint_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    threshold: Int256,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // Fee gate before any state change: an underpaid mint creates nothing
    assert_mint_fee(&info, &config.denom, config.mint_fee)?;

    let token_id = TOKEN_COUNT.load(deps.storage)?;
    TOKEN_OWNERS.save(deps.storage, token_id, &info.sender)?;
    TOKEN_THRESHOLDS.save(deps.storage, token_id, &threshold)?;
    TOKEN_COUNT.save(deps.storage, &(token_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "mint_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("threshold", threshold.to_string()))
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

pub fn query_image_uris(deps: Deps) -> StdResult<Binary> {
    let image_uris = IMAGE_URIS.load(deps.storage)?;
    to_json_binary(&image_uris)
}

pub fn query_num_tokens(deps: Deps) -> StdResult<Binary> {
    let count = TOKEN_COUNT.load(deps.storage)?;
    to_json_binary(&NumTokensResponse { count })
}

/// Assembled fresh on every call: the image variant follows the price feed,
/// so the same token can render differently as the price crosses its
/// threshold. Nothing here is cached or written back.
pub fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let threshold = TOKEN_THRESHOLDS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))?;

    let config = CONFIG.load(deps.storage)?;
    let image_uris = IMAGE_URIS.load(deps.storage)?;
    let price = query_live_price(deps, &config.price_feed)?;

    // Tie goes to the bear variant: only a strictly greater price is "above"
    let image = if price > threshold {
        image_uris.bull
    } else {
        image_uris.bear
    };

    let token_uri = build_metadata(
        &config.name,
        TOKEN_DESCRIPTION,
        &image,
        vec![Trait {
            trait_type: "stockPrice".to_string(),
            value: price,
        }],
    )?;

    to_json_binary(&TokenUriResponse { token_uri })
}

pub fn query_token_threshold(deps: Deps, token_id: u64) -> StdResult<Binary> {
    // Never-minted ids report a zero threshold rather than an error
    let threshold = TOKEN_THRESHOLDS
        .may_load(deps.storage, token_id)?
        .unwrap_or(Int256::zero());
    to_json_binary(&TokenThresholdResponse { threshold })
}

pub fn query_stock_price(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let price = query_live_price(deps, &config.price_feed)?;
    to_json_binary(&StockPriceResponse { price })
}

pub fn query_svg_to_image_uri(svg: String) -> StdResult<Binary> {
    to_json_binary(&SvgToImageUriResponse {
        image_uri: svg_to_image_uri(&svg),
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
