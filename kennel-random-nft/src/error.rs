use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("mint fee not covered: need {required}, got {sent}")]
    NotEnoughFee { required: String, sent: String },

    #[error("invalid chance table: {reason}")]
    InvalidChanceTable { reason: String },

    #[error("unknown request: {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("request {request_id} has already been fulfilled")]
    AlreadyFulfilled { request_id: u64 },

    #[error("fulfillment delivered no random words")]
    EmptyRandomWords,

    #[error("token not found: {token_id}")]
    TokenNotFound { token_id: u64 },

    #[error("randomness request reply carried no request id")]
    MissingRequestId,

    #[error("unknown reply id: {id}")]
    UnknownReply { id: u64 },

    #[error("no pending mint awaiting a request id")]
    NoPendingMint,

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
