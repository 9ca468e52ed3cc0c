use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("beacon for round {round} already exists")]
    BeaconAlreadyExists { round: u64 },

    #[error("BLS verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("beacon not found for round {round}")]
    BeaconNotFound { round: u64 },

    #[error("invalid pubkey length: expected 96 bytes, got {got}")]
    InvalidPubkeyLength { got: usize },

    #[error("invalid chain hash length: expected 32 bytes, got {got}")]
    InvalidChainHashLength { got: usize },

    #[error("period_seconds must be greater than zero")]
    InvalidPeriod,

    #[error("invalid confirmations: {value} (must be between {min} and {max})")]
    InvalidConfirmations { value: u64, min: u64, max: u64 },

    #[error("request {request_id} from {consumer} already exists")]
    RequestAlreadyExists { consumer: String, request_id: u64 },

    #[error("request {request_id} from {consumer} not found")]
    RequestNotFound { consumer: String, request_id: u64 },

    #[error("request {request_id} from {consumer} already fulfilled")]
    RequestAlreadyFulfilled { consumer: String, request_id: u64 },
}
