use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};

#[cw_serde]
pub struct InstantiateMsg {
    pub base_fee: Uint128,
    pub gas_price: Uint128,
    pub wei_per_unit_link: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a new subscription — caller becomes owner
    CreateSubscription {},
    /// Add to a subscription's balance (ledger-only, no coin transfer)
    FundSubscription {
        subscription_id: u64,
        amount: Uint128,
    },
    /// Authorize a consumer contract against a subscription (owner only)
    AddConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Not supported — consumers cannot be removed once authorized
    RemoveConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Request random words (authorized consumer contracts only)
    RequestRandomWords {
        subscription_id: u64,
        num_words: u32,
    },
    /// Not supported — a pending request stays pending until fulfilled
    CancelRequest { request_id: u64 },
    /// Deliver a pending request: generate words (or use the supplied
    /// override) and call the consumer back
    FulfillRandomWords {
        request_id: u64,
        consumer: String,
        words: Option<Vec<Uint256>>,
    },
}

/// Payload of the fulfillment callback sent to consumer contracts
#[cw_serde]
pub struct RandomWordsCallback {
    pub request_id: u64,
    pub random_words: Vec<Uint256>,
}

/// Execute-message shape the coordinator dispatches to a consumer.
/// Consumer contracts embed the same variant in their own ExecuteMsg.
#[cw_serde]
pub enum RandomnessConsumerExecuteMsg {
    RawFulfillRandomWords(RandomWordsCallback),
}

/// Set as response data by `RequestRandomWords` so consumers can correlate
/// from a submessage reply
#[cw_serde]
pub struct RequestRandomWordsResponse {
    pub request_id: u64,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Immutable oracle parameters
    #[returns(crate::state::Config)]
    Config {},
    /// Full subscription state
    #[returns(SubscriptionResponse)]
    Subscription { subscription_id: u64 },
    /// Subscription ids in creation order, paginated
    #[returns(ActiveSubscriptionIdsResponse)]
    ActiveSubscriptionIds { start_index: u64, max_count: u32 },
    /// Stored request state
    #[returns(RequestResponse)]
    Request { request_id: u64 },
}

#[cw_serde]
pub struct SubscriptionResponse {
    pub owner: String,
    pub balance: Uint128,
    pub consumers: Vec<String>,
}

#[cw_serde]
pub struct ActiveSubscriptionIdsResponse {
    pub ids: Vec<u64>,
}

#[cw_serde]
pub struct RequestResponse {
    pub subscription_id: u64,
    pub requester: String,
    pub num_words: u32,
    pub fulfilled: bool,
}
