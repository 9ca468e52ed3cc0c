use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("insufficient payment: entrance fee is {required}, sent {sent}")]
    InsufficientPayment { required: Uint128, sent: Uint128 },

    #[error("unexpected funds sent in {denom}")]
    UnexpectedFunds { denom: String },

    #[error("raffle is not open")]
    RoundNotOpen,

    #[error(
        "upkeep not needed: open={is_open}, time_passed={time_passed}, has_balance={has_balance}, has_players={has_players}"
    )]
    UpkeepNotNeeded {
        is_open: bool,
        time_passed: bool,
        has_balance: bool,
        has_players: bool,
    },

    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("prize transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("entrance fee must have a denom and a nonzero amount")]
    InvalidEntranceFee,

    #[error("fee denom {current} cannot change while the round has participants")]
    FeeDenomLocked { current: String },

    #[error("invalid request confirmations: {value} (must be between {min} and {max})")]
    InvalidConfirmations { value: u64, min: u64, max: u64 },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}
