use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{from_json, Int256, MemoryStorage, OwnedDeps};

use kennel_price_feed_mock::contract::*;
use kennel_price_feed_mock::msg::*;
use kennel_price_feed_mock::state::{Config, RoundData};

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const INITIAL_ANSWER: i128 = 200_000_000_000;

fn setup() -> Deps {
    let mut deps = mock_dependencies();
    let deployer = deps.api.addr_make("deployer");

    let msg = InstantiateMsg {
        pair: "ETH/USD".to_string(),
        decimals: 8,
        initial_answer: Int256::from(INITIAL_ANSWER),
    };
    let info = message_info(&deployer, &[]);
    instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
    deps
}

#[test]
fn test_instantiate_config() {
    let deps = setup();
    let config: Config = from_json(query_config(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(config.pair, "ETH/USD");
    assert_eq!(config.decimals, 8);

    let decimals: DecimalsResponse = from_json(query_decimals(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(decimals.decimals, 8);
}

#[test]
fn test_latest_answer() {
    let deps = setup();
    let res: LatestAnswerResponse =
        from_json(query_latest_answer(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(res.answer, Int256::from(INITIAL_ANSWER));
}

#[test]
fn test_latest_round_data_matches_answer() {
    let deps = setup();
    let round: RoundData = from_json(query_latest_round_data(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(round.round_id, 1);
    assert_eq!(round.answer, Int256::from(INITIAL_ANSWER));
    assert_eq!(round.answered_in_round, 1);
}

#[test]
fn test_update_answer_publishes_new_round() {
    let mut deps = setup();
    let anyone = deps.api.addr_make("anyone");

    let info = message_info(&anyone, &[]);
    execute_update_answer(
        deps.as_mut(),
        mock_env(),
        info,
        Int256::from(100_000_000_000i128),
    )
    .unwrap();

    let res: LatestAnswerResponse =
        from_json(query_latest_answer(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(res.answer, Int256::from(100_000_000_000i128));

    let round: RoundData = from_json(query_latest_round_data(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(round.round_id, 2);
}

#[test]
fn test_negative_answer_is_representable() {
    let mut deps = setup();
    let anyone = deps.api.addr_make("anyone");

    let info = message_info(&anyone, &[]);
    execute_update_answer(deps.as_mut(), mock_env(), info, Int256::from(-42i128)).unwrap();

    let res: LatestAnswerResponse =
        from_json(query_latest_answer(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(res.answer, Int256::from(-42i128));
}
