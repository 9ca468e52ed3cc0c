use chance_raffle_common::types::RaffleStatus;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Timestamp, Uint128};

use crate::state::{DrawState, Ledger, RaffleConfig, RoundResult};

#[cw_serde]
pub struct InstantiateMsg {
    pub randomness_oracle: String,
    pub entrance_fee: Coin,
    pub interval_seconds: u64,
    pub request_confirmations: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Enter the current round. Send at least the entrance fee in info.funds.
    Enter {},
    /// Close entry and request randomness. Anyone can call once upkeep is needed.
    RequestDraw {},
    /// Randomness callback. Randomness oracle only.
    FulfillRandomness {
        request_id: u64,
        random_value: Uint128,
    },
    /// Update configuration. Admin only, while the round is open.
    UpdateConfig {
        admin: Option<String>,
        randomness_oracle: Option<String>,
        entrance_fee: Option<Coin>,
        interval_seconds: Option<u64>,
        request_confirmations: Option<u64>,
    },
}

#[cw_serde]
pub struct UpdateConfigParams {
    pub admin: Option<String>,
    pub randomness_oracle: Option<String>,
    pub entrance_fee: Option<Coin>,
    pub interval_seconds: Option<u64>,
    pub request_confirmations: Option<u64>,
}

/// Message sent to the randomness oracle to open a request.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomness { request_id: u64, confirmations: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RaffleConfig)]
    Config {},
    /// Whether a draw may be requested right now.
    #[returns(UpkeepResponse)]
    CheckUpkeep {},
    #[returns(Coin)]
    EntranceFee {},
    #[returns(RaffleStatus)]
    RaffleState {},
    #[returns(Addr)]
    Participant { index: u32 },
    #[returns(Vec<Addr>)]
    Participants {
        start_after: Option<u32>,
        limit: Option<u32>,
    },
    #[returns(u32)]
    NumberOfPlayers {},
    #[returns(Timestamp)]
    LastDrawTime {},
    #[returns(u64)]
    Interval {},
    #[returns(Option<Addr>)]
    RecentWinner {},
    #[returns(DrawState)]
    DrawState {},
    #[returns(Ledger)]
    Ledger {},
    #[returns(Option<RoundResult>)]
    RoundResult { round_id: u64 },
    #[returns(RoundHistoryResponse)]
    RoundHistory {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct UpkeepResponse {
    pub upkeep_needed: bool,
    pub is_open: bool,
    pub time_passed: bool,
    pub has_balance: bool,
    pub has_players: bool,
}

#[cw_serde]
pub struct RoundHistoryResponse {
    pub rounds: Vec<RoundResult>,
}
