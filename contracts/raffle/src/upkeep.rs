use chance_raffle_common::types::RaffleStatus;
use cosmwasm_std::Timestamp;

use crate::error::ContractError;
use crate::msg::UpkeepResponse;
use crate::state::{DrawState, Ledger, RaffleConfig};

/// The four conditions that must all hold before a draw may be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eligibility {
    pub is_open: bool,
    pub time_passed: bool,
    pub has_balance: bool,
    pub has_players: bool,
}

impl Eligibility {
    /// Evaluate against the stored state at `now`. Reads only.
    pub fn evaluate(
        config: &RaffleConfig,
        draw_state: &DrawState,
        ledger: &Ledger,
        now: Timestamp,
    ) -> Self {
        let elapsed = now
            .seconds()
            .saturating_sub(draw_state.last_draw_time.seconds());
        Eligibility {
            is_open: draw_state.status == RaffleStatus::Open,
            time_passed: elapsed >= config.interval_seconds,
            has_balance: !ledger.pooled_balance.is_zero(),
            has_players: ledger.participant_count > 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.is_open && self.time_passed && self.has_balance && self.has_players
    }

    /// `Ok(())` when ready, otherwise `UpkeepNotNeeded` carrying every conjunct.
    pub fn ensure_ready(&self) -> Result<(), ContractError> {
        if self.is_ready() {
            return Ok(());
        }
        Err(ContractError::UpkeepNotNeeded {
            is_open: self.is_open,
            time_passed: self.time_passed,
            has_balance: self.has_balance,
            has_players: self.has_players,
        })
    }
}

impl From<Eligibility> for UpkeepResponse {
    fn from(e: Eligibility) -> Self {
        UpkeepResponse {
            upkeep_needed: e.is_ready(),
            is_open: e.is_open,
            time_passed: e.time_passed,
            has_balance: e.has_balance,
            has_players: e.has_players,
        }
    }
}
