use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{coins, from_json, Addr, CosmosMsg, MemoryStorage, OwnedDeps, ReplyOn, Uint128, Uint256, WasmMsg};
use cw_multi_test::{App, AppResponse, BankSudo, ContractWrapper, Executor, SudoMsg};

use kennel_random_nft::contract::{self, *};
use kennel_random_nft::error::ContractError;
use kennel_random_nft::helpers::{derive_tier, reduce_raw_word, validate_chance_table};
use kennel_random_nft::msg::*;
use kennel_random_nft::state::Config;
use kennel_vrf_mock::helpers::derive_random_words;
use kennel_vrf_mock::msg::ExecuteMsg as CoordinatorExecuteMsg;
use kennel_vrf_mock::msg::InstantiateMsg as CoordinatorInstantiateMsg;

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const FEE_DENOM: &str = "aeth";
const MINT_FEE: u128 = 10_000_000_000_000_000; // 0.01 * 10^18
const BASE_FEE: u128 = 100_000_000_000_000_000;
const SUB_FUND: u128 = 100_000_000_000_000_000_000;

fn tier_uris() -> Vec<String> {
    vec![
        "ipfs://QmaVkBn2tKmjbhphU7eyztbvSQU5EXDdqRyXZtRhSGgJGo".to_string(),
        "ipfs://QmYQC5aGZu2PTH8XzbJrbDnvhj3gVs7ya33H9mqUNvST3d".to_string(),
        "ipfs://QmZYmH5iDbD6v3U2ixoVAjioSzvWJszDzYdbeCLquGSpVm".to_string(),
    ]
}

fn instantiate_msg(owner: &Addr, coordinator: &Addr) -> InstantiateMsg {
    InstantiateMsg {
        owner: owner.to_string(),
        name: "Kennel Random NFT".to_string(),
        symbol: "KRN".to_string(),
        denom: FEE_DENOM.to_string(),
        mint_fee: Uint128::new(MINT_FEE),
        vrf_coordinator: coordinator.to_string(),
        subscription_id: 1,
        num_words: 1,
        chance_table: vec![5, 30, 100],
        tier_uris: tier_uris(),
    }
}

fn setup() -> Deps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let coordinator = deps.api.addr_make("vrf-coordinator");

    let msg = instantiate_msg(&owner, &coordinator);
    let info = message_info(&owner, &[]);
    instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
    deps
}

// ─── Instantiation ──────────────────────────────────────────────────────────

#[test]
fn test_instantiate_config() {
    let deps = setup();
    let config: Config = from_json(query_config(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(config.owner, deps.api.addr_make("owner"));
    assert_eq!(config.vrf_coordinator, deps.api.addr_make("vrf-coordinator"));
    assert_eq!(config.mint_fee, Uint128::new(MINT_FEE));
    assert_eq!(config.subscription_id, 1);

    let table: ChanceTableResponse =
        from_json(query_chance_table(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(table.chance_table, vec![5, 30, 100]);

    let count: NumTokensResponse = from_json(query_num_tokens(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(count.count, 0);
}

#[test]
fn test_instantiate_rejects_bad_chance_tables() {
    let err = validate_chance_table(&[], 0).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));

    let err = validate_chance_table(&[0, 30, 100], 3).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));

    let err = validate_chance_table(&[5, 5, 100], 3).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));

    let err = validate_chance_table(&[30, 5, 100], 3).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));

    // One URI per tier
    let err = validate_chance_table(&[5, 30, 100], 2).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));

    validate_chance_table(&[5, 30, 100], 3).unwrap();
}

#[test]
fn test_instantiate_with_mismatched_uris_fails() {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make("owner");
    let coordinator = deps.api.addr_make("vrf-coordinator");

    let mut msg = instantiate_msg(&owner, &coordinator);
    msg.tier_uris.pop();
    let info = message_info(&owner, &[]);
    let err = instantiate(deps.as_mut(), mock_env(), info, msg).unwrap_err();
    assert!(matches!(err, ContractError::InvalidChanceTable { .. }));
}

// ─── Tier Derivation ────────────────────────────────────────────────────────

#[test]
fn test_tier_boundaries() {
    let deps = setup();
    let cases = [
        (0u128, 0u8),
        (4, 0),
        (5, 1),
        (29, 1),
        (30, 2),
        (99, 2),
        // Values above the modulus are reduced first
        (100, 0),
        (106, 1),
        (199, 2),
    ];
    for (raw, expected) in cases {
        let res: TierResponse =
            from_json(query_tier(deps.as_ref(), Uint256::from(raw)).unwrap()).unwrap();
        assert_eq!(res.tier, expected, "raw value {}", raw);
    }
}

#[test]
fn test_derive_tier_exhaustive_over_modulus() {
    let table = [5u32, 30, 100];
    for raw in 0..100u32 {
        let expected = if raw < 5 {
            0
        } else if raw < 30 {
            1
        } else {
            2
        };
        assert_eq!(derive_tier(raw, &table), expected, "raw value {}", raw);
    }
}

#[test]
fn test_token_uri_of_tier() {
    let deps = setup();
    let uris = tier_uris();
    for (tier, expected) in uris.iter().enumerate() {
        let res: TokenUriResponse =
            from_json(query_token_uri_of_tier(deps.as_ref(), tier as u8).unwrap()).unwrap();
        assert_eq!(&res.token_uri, expected);
    }

    assert!(query_token_uri_of_tier(deps.as_ref(), 3).is_err());
}

// ─── Requesting (local checks) ──────────────────────────────────────────────

#[test]
fn test_request_nft_underpaid_fails() {
    let mut deps = setup();
    let minter = deps.api.addr_make("minter");

    let info = message_info(&minter, &coins(MINT_FEE - 1, FEE_DENOM));
    let err = execute_request_nft(deps.as_mut(), mock_env(), info).unwrap_err();
    assert_eq!(
        err,
        ContractError::NotEnoughFee {
            required: MINT_FEE.to_string(),
            sent: (MINT_FEE - 1).to_string(),
        }
    );

    // Nothing minted, nothing pending
    let count: NumTokensResponse = from_json(query_num_tokens(deps.as_ref()).unwrap()).unwrap();
    assert_eq!(count.count, 0);
}

#[test]
fn test_request_nft_wrong_denom_fails() {
    let mut deps = setup();
    let minter = deps.api.addr_make("minter");

    let info = message_info(&minter, &coins(MINT_FEE, "uother"));
    let err = execute_request_nft(deps.as_mut(), mock_env(), info).unwrap_err();
    assert!(matches!(err, ContractError::NotEnoughFee { .. }));
}

#[test]
fn test_request_nft_dispatches_coordinator_submessage() {
    let mut deps = setup();
    let minter = deps.api.addr_make("minter");
    let coordinator = deps.api.addr_make("vrf-coordinator");

    let info = message_info(&minter, &coins(MINT_FEE, FEE_DENOM));
    let res = execute_request_nft(deps.as_mut(), mock_env(), info).unwrap();

    assert_eq!(res.messages.len(), 1);
    let submsg = &res.messages[0];
    assert_eq!(submsg.id, VRF_REQUEST_REPLY_ID);
    assert_eq!(submsg.reply_on, ReplyOn::Success);
    match &submsg.msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => {
            assert_eq!(contract_addr, coordinator.as_str());
            let request: CoordinatorExecuteMsg = from_json(msg).unwrap();
            assert_eq!(
                request,
                CoordinatorExecuteMsg::RequestRandomWords {
                    subscription_id: 1,
                    num_words: 1,
                }
            );
        }
        other => panic!("unexpected request message: {:?}", other),
    }
}

// ─── Fulfillment (local checks) ─────────────────────────────────────────────

#[test]
fn test_fulfill_from_non_coordinator_fails() {
    let mut deps = setup();
    let rando = deps.api.addr_make("rando");

    let info = message_info(&rando, &[]);
    let callback = kennel_vrf_mock::msg::RandomWordsCallback {
        request_id: 1,
        random_words: vec![Uint256::from(17u128)],
    };
    let err =
        execute_raw_fulfill_random_words(deps.as_mut(), mock_env(), info, callback).unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "vrf coordinator".to_string()
        }
    );
}

#[test]
fn test_fulfill_unknown_request_fails() {
    let mut deps = setup();
    let coordinator = deps.api.addr_make("vrf-coordinator");

    let info = message_info(&coordinator, &[]);
    let callback = kennel_vrf_mock::msg::RandomWordsCallback {
        request_id: 99,
        random_words: vec![Uint256::from(17u128)],
    };
    let err =
        execute_raw_fulfill_random_words(deps.as_mut(), mock_env(), info, callback).unwrap_err();
    assert_eq!(err, ContractError::UnknownRequest { request_id: 99 });
}

// ─── Full Flow (multi-test) ─────────────────────────────────────────────────

struct TestEnv {
    app: App,
    coordinator: Addr,
    nft: Addr,
    deployer: Addr,
    minter: Addr,
}

fn event_attr(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}

fn setup_env(add_consumer: bool) -> TestEnv {
    let mut app = App::default();
    let deployer = app.api().addr_make("deployer");
    let minter = app.api().addr_make("minter");
    app.sudo(SudoMsg::Bank(BankSudo::Mint {
        to_address: minter.to_string(),
        amount: coins(1_000_000_000_000_000_000, FEE_DENOM),
    }))
    .unwrap();

    let vrf_code = app.store_code(Box::new(ContractWrapper::new(
        kennel_vrf_mock::contract::execute,
        kennel_vrf_mock::contract::instantiate,
        kennel_vrf_mock::contract::query,
    )));
    let nft_code = app.store_code(Box::new(
        ContractWrapper::new(contract::execute, contract::instantiate, contract::query)
            .with_reply(contract::reply),
    ));

    let coordinator = app
        .instantiate_contract(
            vrf_code,
            deployer.clone(),
            &CoordinatorInstantiateMsg {
                base_fee: Uint128::new(BASE_FEE),
                gas_price: Uint128::new(1_000_000_000),
                wei_per_unit_link: Uint128::new(7_308_098_166_519_503),
            },
            &[],
            "vrf-mock",
            None,
        )
        .unwrap();

    app.execute_contract(
        deployer.clone(),
        coordinator.clone(),
        &CoordinatorExecuteMsg::CreateSubscription {},
        &[],
    )
    .unwrap();
    app.execute_contract(
        deployer.clone(),
        coordinator.clone(),
        &CoordinatorExecuteMsg::FundSubscription {
            subscription_id: 1,
            amount: Uint128::new(SUB_FUND),
        },
        &[],
    )
    .unwrap();

    let nft = app
        .instantiate_contract(
            nft_code,
            deployer.clone(),
            &instantiate_msg(&deployer, &coordinator),
            &[],
            "random-nft",
            None,
        )
        .unwrap();

    if add_consumer {
        app.execute_contract(
            deployer.clone(),
            coordinator.clone(),
            &CoordinatorExecuteMsg::AddConsumer {
                subscription_id: 1,
                consumer: nft.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    TestEnv {
        app,
        coordinator,
        nft,
        deployer,
        minter,
    }
}

fn request_nft(env: &mut TestEnv) -> u64 {
    let res = env
        .app
        .execute_contract(
            env.minter.clone(),
            env.nft.clone(),
            &ExecuteMsg::RequestNft {},
            &coins(MINT_FEE, FEE_DENOM),
        )
        .unwrap();
    event_attr(&res, "request_id").unwrap().parse().unwrap()
}

fn fulfill(env: &mut TestEnv, request_id: u64, words: Option<Vec<Uint256>>) -> AppResponse {
    env.app
        .execute_contract(
            env.deployer.clone(),
            env.coordinator.clone(),
            &CoordinatorExecuteMsg::FulfillRandomWords {
                request_id,
                consumer: env.nft.to_string(),
                words,
            },
            &[],
        )
        .unwrap()
}

#[test]
fn test_end_to_end_tiered_mint() {
    let mut env = setup_env(true);

    let request_id = request_nft(&mut env);
    assert_eq!(request_id, 1);

    // Minter recorded before fulfillment
    let requester: TokenRequesterResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.nft,
            &QueryMsg::TokenRequester { request_id },
        )
        .unwrap();
    assert_eq!(requester.requester, env.minter.to_string());

    // 117 ≡ 17 (mod 100) → tier 1
    let res = fulfill(&mut env, request_id, Some(vec![Uint256::from(117u128)]));
    assert_eq!(event_attr(&res, "tier").unwrap(), "1");
    assert_eq!(event_attr(&res, "token_id").unwrap(), "0");

    let info: NftInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NftInfo { token_id: 0 })
        .unwrap();
    assert_eq!(info.owner, env.minter.to_string());
    assert_eq!(info.tier, 1);
    assert_eq!(info.token_uri, tier_uris()[1]);

    let count: NumTokensResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NumTokens {})
        .unwrap();
    assert_eq!(count.count, 1);

    let token: TokenOfRequestResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::TokenOfRequest { request_id })
        .unwrap();
    assert_eq!(token.token_id, 0);

    let tokens: TokensResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.nft,
            &QueryMsg::TokensOfTier {
                tier: 1,
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(tokens.tokens, vec![0]);
}

#[test]
fn test_second_fulfillment_rejected_and_state_unchanged() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    fulfill(&mut env, request_id, Some(vec![Uint256::from(17u128)]));

    let err = env
        .app
        .execute_contract(
            env.deployer.clone(),
            env.coordinator.clone(),
            &CoordinatorExecuteMsg::FulfillRandomWords {
                request_id,
                consumer: env.nft.to_string(),
                words: Some(vec![Uint256::from(99u128)]),
            },
            &[],
        )
        .unwrap_err();
    let err: kennel_vrf_mock::error::ContractError = err.downcast().unwrap();
    assert_eq!(
        err,
        kennel_vrf_mock::error::ContractError::AlreadyFulfilled { request_id }
    );

    // First fulfillment's outcome stands
    let info: NftInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NftInfo { token_id: 0 })
        .unwrap();
    assert_eq!(info.tier, 1);
    let count: NumTokensResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NumTokens {})
        .unwrap();
    assert_eq!(count.count, 1);
}

#[test]
fn test_fulfill_with_derived_words_matches_derivation() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    let res = fulfill(&mut env, request_id, None);

    let expected_word = derive_random_words(request_id, 1)[0];
    assert_eq!(event_attr(&res, "raw_result").unwrap(), expected_word.to_string());

    let expected_tier = derive_tier(reduce_raw_word(expected_word, 100), &[5, 30, 100]);
    let info: NftInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NftInfo { token_id: 0 })
        .unwrap();
    assert_eq!(info.tier, expected_tier);
}

#[test]
fn test_request_without_consumer_registration_fails() {
    let mut env = setup_env(false);
    let err = env
        .app
        .execute_contract(
            env.minter.clone(),
            env.nft.clone(),
            &ExecuteMsg::RequestNft {},
            &coins(MINT_FEE, FEE_DENOM),
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("not registered"));

    // Failed request leaves no correlation state behind
    let res: Result<TokenRequesterResponse, _> = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::TokenRequester { request_id: 1 });
    assert!(res.is_err());
}

#[test]
fn test_underpaid_request_charges_nothing() {
    let mut env = setup_env(true);
    let err = env
        .app
        .execute_contract(
            env.minter.clone(),
            env.nft.clone(),
            &ExecuteMsg::RequestNft {},
            &coins(MINT_FEE - 1, FEE_DENOM),
        )
        .unwrap_err();
    let err: ContractError = err.downcast().unwrap();
    assert!(matches!(err, ContractError::NotEnoughFee { .. }));

    // Fee stayed with the minter, nothing minted
    let balance = env
        .app
        .wrap()
        .query_balance(&env.minter, FEE_DENOM)
        .unwrap();
    assert_eq!(balance.amount.u128(), 1_000_000_000_000_000_000);
    let count: NumTokensResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NumTokens {})
        .unwrap();
    assert_eq!(count.count, 0);
}

#[test]
fn test_sequential_token_ids_from_zero() {
    let mut env = setup_env(true);
    for expected_token in 0..3u64 {
        let request_id = request_nft(&mut env);
        let res = fulfill(&mut env, request_id, Some(vec![Uint256::from(50u128)]));
        assert_eq!(
            event_attr(&res, "token_id").unwrap(),
            expected_token.to_string()
        );
    }
}

// ─── Transfers ──────────────────────────────────────────────────────────────

#[test]
fn test_transfer_minted_token() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    fulfill(&mut env, request_id, Some(vec![Uint256::from(17u128)]));

    let recipient = env.app.api().addr_make("recipient");
    env.app
        .execute_contract(
            env.minter.clone(),
            env.nft.clone(),
            &ExecuteMsg::TransferNft {
                recipient: recipient.to_string(),
                token_id: 0,
            },
            &[],
        )
        .unwrap();

    let owner: OwnerOfResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::OwnerOf { token_id: 0 })
        .unwrap();
    assert_eq!(owner.owner, recipient.to_string());

    // Tier survives the transfer
    let info: NftInfoResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.nft, &QueryMsg::NftInfo { token_id: 0 })
        .unwrap();
    assert_eq!(info.tier, 1);
}

#[test]
fn test_transfer_by_non_owner_fails() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    fulfill(&mut env, request_id, Some(vec![Uint256::from(17u128)]));

    let rando = env.app.api().addr_make("rando");
    let err = env
        .app
        .execute_contract(
            rando.clone(),
            env.nft.clone(),
            &ExecuteMsg::TransferNft {
                recipient: rando.to_string(),
                token_id: 0,
            },
            &[],
        )
        .unwrap_err();
    let err: ContractError = err.downcast().unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "token owner".to_string()
        }
    );
}

// ─── Withdrawal ─────────────────────────────────────────────────────────────

#[test]
fn test_withdraw_by_non_owner_fails() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    fulfill(&mut env, request_id, Some(vec![Uint256::from(17u128)]));

    let err = env
        .app
        .execute_contract(
            env.minter.clone(),
            env.nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap_err();
    let err: ContractError = err.downcast().unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "owner".to_string()
        }
    );

    // Balance untouched
    let balance = env.app.wrap().query_balance(&env.nft, FEE_DENOM).unwrap();
    assert_eq!(balance.amount.u128(), MINT_FEE);
}

#[test]
fn test_withdraw_sweeps_balance_to_owner_once() {
    let mut env = setup_env(true);
    let request_id = request_nft(&mut env);
    fulfill(&mut env, request_id, Some(vec![Uint256::from(17u128)]));

    env.app
        .execute_contract(
            env.deployer.clone(),
            env.nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap();

    let contract_balance = env.app.wrap().query_balance(&env.nft, FEE_DENOM).unwrap();
    assert!(contract_balance.amount.is_zero());
    let owner_balance = env
        .app
        .wrap()
        .query_balance(&env.deployer, FEE_DENOM)
        .unwrap();
    assert_eq!(owner_balance.amount.u128(), MINT_FEE);

    // Nothing left for a second sweep
    let err = env
        .app
        .execute_contract(
            env.deployer.clone(),
            env.nft.clone(),
            &ExecuteMsg::Withdraw {},
            &[],
        )
        .unwrap_err();
    let err: ContractError = err.downcast().unwrap();
    assert_eq!(err, ContractError::NothingToWithdraw);
}
