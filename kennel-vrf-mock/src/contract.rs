use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdError, StdResult,
    Uint128, Uint256, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{derive_random_words, reject_funds};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:kennel-vrf-mock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        base_fee: msg.base_fee,
        gas_price: msg.gas_price,
        wei_per_unit_link: msg.wei_per_unit_link,
    };
    CONFIG.save(deps.storage, &config)?;
    SUB_COUNT.save(deps.storage, &0u64)?;
    REQUEST_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("base_fee", config.base_fee.to_string()))
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSubscription {} => execute_create_subscription(deps, env, info),
        ExecuteMsg::FundSubscription {
            subscription_id,
            amount,
        } => execute_fund_subscription(deps, env, info, subscription_id, amount),
        ExecuteMsg::AddConsumer {
            subscription_id,
            consumer,
        } => execute_add_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RemoveConsumer {
            subscription_id,
            consumer,
        } => execute_remove_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RequestRandomWords {
            subscription_id,
            num_words,
        } => execute_request_random_words(deps, env, info, subscription_id, num_words),
        ExecuteMsg::CancelRequest { request_id } => {
            execute_cancel_request(deps, env, info, request_id)
        }
        ExecuteMsg::FulfillRandomWords {
            request_id,
            consumer,
            words,
        } => execute_fulfill_random_words(deps, env, info, request_id, consumer, words),
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::Subscription { subscription_id } => query_subscription(deps, subscription_id),
        QueryMsg::ActiveSubscriptionIds {
            start_index,
            max_count,
        } => query_active_subscription_ids(deps, start_index, max_count),
        QueryMsg::Request { request_id } => query_request(deps, request_id),
    }
}

// ─── Execute: Subscription Registry ─────────────────────────────────────────

pub fn execute_create_subscription(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let mut count = SUB_COUNT.load(deps.storage)?;
    count += 1;

    let subscription = Subscription {
        owner: info.sender.clone(),
        balance: Uint128::zero(),
        consumers: vec![],
    };
    SUBSCRIPTIONS.save(deps.storage, count, &subscription)?;
    SUB_COUNT.save(deps.storage, &count)?;

    Ok(Response::new()
        .add_attribute("action", "create_subscription")
        .add_attribute("subscription_id", count.to_string())
        .add_attribute("owner", info.sender.as_str()))
}

pub fn execute_fund_subscription(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::UnknownSubscription { subscription_id })?;

    subscription.balance = subscription
        .balance
        .checked_add(amount)
        .map_err(StdError::from)?;
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "fund_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("balance", subscription.balance.to_string()))
}

pub fn execute_add_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::UnknownSubscription { subscription_id })?;

    if info.sender != subscription.owner {
        return Err(ContractError::Unauthorized {
            role: "subscription owner".to_string(),
        });
    }

    let consumer_addr = deps.api.addr_validate(&consumer)?;
    // Set semantics: re-adding an existing consumer is a no-op
    if !subscription.consumers.contains(&consumer_addr) {
        subscription.consumers.push(consumer_addr.clone());
        SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;
    }

    Ok(Response::new()
        .add_attribute("action", "add_consumer")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("consumer", consumer_addr.as_str()))
}

pub fn execute_remove_consumer(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _subscription_id: u64,
    _consumer: String,
) -> Result<Response, ContractError> {
    Err(ContractError::UnsupportedOperation {
        operation: "remove_consumer".to_string(),
    })
}

pub fn execute_cancel_request(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _request_id: u64,
) -> Result<Response, ContractError> {
    Err(ContractError::UnsupportedOperation {
        operation: "cancel_request".to_string(),
    })
}

// ─── Execute: Request Correlator ────────────────────────────────────────────

pub fn execute_request_random_words(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    num_words: u32,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    if num_words == 0 {
        return Err(ContractError::ZeroWords);
    }

    let subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::UnknownSubscription { subscription_id })?;

    if !subscription.consumers.contains(&info.sender) {
        return Err(ContractError::UnauthorizedConsumer {
            subscription_id,
            consumer: info.sender.to_string(),
        });
    }

    let mut count = REQUEST_COUNT.load(deps.storage)?;
    count += 1;

    let request = RandomnessRequest {
        subscription_id,
        requester: info.sender.clone(),
        num_words,
        fulfilled: false,
    };
    REQUESTS.save(deps.storage, count, &request)?;
    REQUEST_COUNT.save(deps.storage, &count)?;

    Ok(Response::new()
        .set_data(to_json_binary(&RequestRandomWordsResponse {
            request_id: count,
        })?)
        .add_attribute("action", "request_random_words")
        .add_attribute("request_id", count.to_string())
        .add_attribute("requester", info.sender.as_str()))
}

pub fn execute_fulfill_random_words(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request_id: u64,
    consumer: String,
    words: Option<Vec<Uint256>>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let mut request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRequest { request_id })?;

    if request.fulfilled {
        return Err(ContractError::AlreadyFulfilled { request_id });
    }

    let consumer_addr = deps.api.addr_validate(&consumer)?;
    if consumer_addr != request.requester {
        return Err(ContractError::WrongConsumer {
            request_id,
            consumer: consumer_addr.to_string(),
        });
    }

    let random_words = match words {
        Some(words) => {
            if words.len() != request.num_words as usize {
                return Err(ContractError::InvalidWordCount {
                    expected: request.num_words,
                    got: words.len() as u32,
                });
            }
            words
        }
        None => derive_random_words(request_id, request.num_words),
    };

    // Bill the subscription for the delivery
    let config = CONFIG.load(deps.storage)?;
    let mut subscription = SUBSCRIPTIONS.load(deps.storage, request.subscription_id)?;
    subscription.balance = subscription
        .balance
        .checked_sub(config.base_fee)
        .map_err(|_| ContractError::InsufficientBalance {
            subscription_id: request.subscription_id,
        })?;

    // Commit state before dispatching the callback: a re-entrant fulfillment
    // for the same id observes fulfilled == true and is rejected
    request.fulfilled = true;
    REQUESTS.save(deps.storage, request_id, &request)?;
    SUBSCRIPTIONS.save(deps.storage, request.subscription_id, &subscription)?;

    let callback = RandomnessConsumerExecuteMsg::RawFulfillRandomWords(RandomWordsCallback {
        request_id,
        random_words: random_words.clone(),
    });
    let callback_msg = WasmMsg::Execute {
        contract_addr: request.requester.to_string(),
        msg: to_json_binary(&callback)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback_msg)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("consumer", request.requester.as_str())
        .add_attribute("num_words", random_words.len().to_string())
        .add_attribute("first_word", random_words[0].to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_subscription(deps: Deps, subscription_id: u64) -> StdResult<Binary> {
    let subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or_else(|| StdError::not_found(format!("subscription {}", subscription_id)))?;

    to_json_binary(&SubscriptionResponse {
        owner: subscription.owner.to_string(),
        balance: subscription.balance,
        consumers: subscription
            .consumers
            .iter()
            .map(|c| c.to_string())
            .collect(),
    })
}

pub fn query_active_subscription_ids(
    deps: Deps,
    start_index: u64,
    max_count: u32,
) -> StdResult<Binary> {
    let ids: Vec<u64> = SUBSCRIPTIONS
        .keys(deps.storage, None, None, Order::Ascending)
        .skip(start_index as usize)
        .take(max_count as usize)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ActiveSubscriptionIdsResponse { ids })
}

pub fn query_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    let request = REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or_else(|| StdError::not_found(format!("request {}", request_id)))?;

    to_json_binary(&RequestResponse {
        subscription_id: request.subscription_id,
        requester: request.requester.to_string(),
        num_words: request.num_words,
        fulfilled: request.fulfilled,
    })
}
