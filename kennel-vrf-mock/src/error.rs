use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unknown subscription: {subscription_id}")]
    UnknownSubscription { subscription_id: u64 },

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("consumer {consumer} is not registered for subscription {subscription_id}")]
    UnauthorizedConsumer {
        subscription_id: u64,
        consumer: String,
    },

    #[error("unknown request: {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("request {request_id} has already been fulfilled")]
    AlreadyFulfilled { request_id: u64 },

    #[error("consumer {consumer} does not match the requester of request {request_id}")]
    WrongConsumer { request_id: u64, consumer: String },

    #[error("subscription {subscription_id} cannot pay the fulfillment fee")]
    InsufficientBalance { subscription_id: u64 },

    #[error("requested word count must be greater than zero")]
    ZeroWords,

    #[error("override supplies {got} words but the request asked for {expected}")]
    InvalidWordCount { expected: u32, got: u32 },

    #[error("{operation} is not supported")]
    UnsupportedOperation { operation: String },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
