use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{OracleConfig, RandomnessRequest, StoredBeacon};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    /// Hex-encoded quicknet public key (96 bytes = 192 hex chars)
    pub quicknet_pubkey_hex: String,
    pub chain_hash: String,
    pub genesis_time: u64,
    pub period_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Submit a drand beacon for verification and storage. Operators only.
    SubmitBeacon {
        round: u64,
        /// Hex-encoded BLS signature (48 bytes = 96 hex chars)
        signature_hex: String,
    },
    /// Open a randomness request. The sender is the consumer that will be
    /// called back.
    RequestRandomness {
        request_id: u64,
        /// Number of drand rounds to wait past the current one
        confirmations: u64,
    },
    /// Deliver randomness for a pending request once its target beacon is
    /// stored. Anyone can call.
    FulfillRequest { consumer: String, request_id: u64 },
    /// Update operator list (admin only).
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

/// Callback sent to the consumer contract.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    FulfillRandomness {
        request_id: u64,
        random_value: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OracleConfig)]
    Config {},

    #[returns(Option<StoredBeacon>)]
    Beacon { round: u64 },

    #[returns(u64)]
    LatestRound {},

    /// drand round in progress at the current block time
    #[returns(u64)]
    CurrentRound {},

    #[returns(Option<RandomnessRequest>)]
    Request { consumer: String, request_id: u64 },
}
