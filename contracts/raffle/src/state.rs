use chance_raffle_common::types::RaffleStatus;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<RaffleConfig> = Item::new("config");
pub const DRAW_STATE: Item<DrawState> = Item::new("draw_state");
pub const LEDGER: Item<Ledger> = Item::new("ledger");

/// Participants keyed by (round id, entry index). Entry order is the
/// order in which `enter` calls were executed.
pub const PARTICIPANTS: Map<(u64, u32), Addr> = Map::new("participants");

/// Completed rounds, keyed by round id.
pub const ROUND_RESULTS: Map<u64, RoundResult> = Map::new("round_results");

#[cw_serde]
pub struct RaffleConfig {
    pub admin: Addr,
    /// Only this address may deliver randomness
    pub randomness_oracle: Addr,
    pub entrance_fee: Coin,
    /// Minimum time between completed draws (seconds)
    pub interval_seconds: u64,
    /// How many drand rounds ahead the oracle must source randomness from
    pub request_confirmations: u64,
}

/// The round state machine.
#[cw_serde]
pub struct DrawState {
    pub status: RaffleStatus,
    /// Set when a round completes, never when a draw is requested
    pub last_draw_time: Timestamp,
    pub pending_draw: Option<PendingDraw>,
    pub next_request_id: u64,
    pub recent_winner: Option<Addr>,
    pub rounds_completed: u64,
}

/// An in-flight randomness request, consumed exactly once by the oracle callback.
#[cw_serde]
pub struct PendingDraw {
    pub request_id: u64,
    pub round_id: u64,
    pub participant_count: u32,
    pub pooled_balance: Uint128,
    pub requested_at: Timestamp,
    pub requested_by: Addr,
}

/// Participants and pooled funds of the current round.
#[cw_serde]
pub struct Ledger {
    pub round_id: u64,
    pub participant_count: u32,
    pub pooled_balance: Uint128,
}

#[cw_serde]
pub struct RoundResult {
    pub round_id: u64,
    pub request_id: u64,
    pub winner: Addr,
    pub winner_index: u32,
    pub prize: Coin,
    pub random_value: Uint128,
    pub participant_count: u32,
    pub completed_at: Timestamp,
}
