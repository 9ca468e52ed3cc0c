use chance_raffle_common::types::RequestStatus;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<OracleConfig> = Item::new("config");
pub const BEACONS: Map<u64, StoredBeacon> = Map::new("beacons");
pub const LATEST_ROUND: Item<u64> = Item::new("latest_round");
/// Randomness requests keyed by (consumer contract, consumer-assigned request id)
pub const REQUESTS: Map<(&Addr, u64), RandomnessRequest> = Map::new("requests");

#[cw_serde]
pub struct OracleConfig {
    pub admin: Addr,
    pub operators: Vec<Addr>,
    /// Quicknet public key, 96 bytes (G2 point)
    pub quicknet_pubkey: Vec<u8>,
    /// Chain hash identifying the drand network, lowercase hex of 32 bytes
    pub chain_hash: String,
    /// Genesis time of the drand network (unix seconds)
    pub genesis_time: u64,
    /// Period between rounds in seconds (3 for quicknet)
    pub period_seconds: u64,
}

#[cw_serde]
pub struct StoredBeacon {
    pub round: u64,
    /// sha256(signature), 32 bytes
    pub randomness: Vec<u8>,
    /// BLS signature on G1, 48 bytes
    pub signature: Vec<u8>,
    pub submitted_at: Timestamp,
    pub submitted_by: Addr,
}

#[cw_serde]
pub struct RandomnessRequest {
    pub consumer: Addr,
    pub request_id: u64,
    /// First drand round published after the request plus the confirmations
    pub target_round: u64,
    pub status: RequestStatus,
    pub requested_at: Timestamp,
    pub fulfilled_at: Option<Timestamp>,
    pub random_value: Option<Uint128>,
}
