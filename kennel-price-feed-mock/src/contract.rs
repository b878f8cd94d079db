use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Int256, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kennel-price-feed-mock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        pair: msg.pair,
        decimals: msg.decimals,
    };
    CONFIG.save(deps.storage, &config)?;

    let round = RoundData {
        round_id: 1,
        answer: msg.initial_answer,
        started_at: env.block.time,
        updated_at: env.block.time,
        answered_in_round: 1,
    };
    LATEST_ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("pair", config.pair)
        .add_attribute("initial_answer", msg.initial_answer.to_string()))
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateAnswer { answer } => execute_update_answer(deps, env, info, answer),
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::Decimals {} => query_decimals(deps),
        QueryMsg::LatestAnswer {} => query_latest_answer(deps),
        QueryMsg::LatestRoundData {} => query_latest_round_data(deps),
    }
}

// ─── Execute ────────────────────────────────────────────────────────────────

pub fn execute_update_answer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    answer: Int256,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }

    let previous = LATEST_ROUND.load(deps.storage)?;
    let round = RoundData {
        round_id: previous.round_id + 1,
        answer,
        started_at: env.block.time,
        updated_at: env.block.time,
        answered_in_round: previous.round_id + 1,
    };
    LATEST_ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "update_answer")
        .add_attribute("round_id", round.round_id.to_string())
        .add_attribute("answer", answer.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_decimals(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&DecimalsResponse {
        decimals: config.decimals,
    })
}

pub fn query_latest_answer(deps: Deps) -> StdResult<Binary> {
    let round = LATEST_ROUND.load(deps.storage)?;
    to_json_binary(&LatestAnswerResponse {
        answer: round.answer,
    })
}

pub fn query_latest_round_data(deps: Deps) -> StdResult<Binary> {
    let round = LATEST_ROUND.load(deps.storage)?;
    to_json_binary(&round)
}
