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

    #[error("token not found: {token_id}")]
    TokenNotFound { token_id: u64 },

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
