use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::state::{Ledger, PARTICIPANTS};

impl Ledger {
    /// Empty ledger for the first round.
    pub fn new() -> Self {
        Ledger {
            round_id: 1,
            participant_count: 0,
            pooled_balance: Uint128::zero(),
        }
    }

    /// Append a participant to the current round and pool their payment.
    /// Returns the participant's entry index.
    pub fn record_entry(
        &mut self,
        storage: &mut dyn Storage,
        participant: &Addr,
        payment: Uint128,
    ) -> Result<u32, ContractError> {
        let pooled_balance = self.pooled_balance.checked_add(payment)?;
        let index = self.participant_count;
        PARTICIPANTS.save(storage, (self.round_id, index), participant)?;
        self.participant_count += 1;
        self.pooled_balance = pooled_balance;
        Ok(index)
    }

    pub fn participant(&self, storage: &dyn Storage, index: u32) -> StdResult<Addr> {
        PARTICIPANTS.load(storage, (self.round_id, index))
    }

    pub fn participants(
        &self,
        storage: &dyn Storage,
        start_after: Option<u32>,
        limit: usize,
    ) -> StdResult<Vec<Addr>> {
        PARTICIPANTS
            .prefix(self.round_id)
            .range(storage, start_after.map(Bound::exclusive), None, Order::Ascending)
            .take(limit)
            .map(|r| r.map(|(_, addr)| addr))
            .collect()
    }

    /// Clear the ledger for the next round and return the drained balance.
    ///
    /// Advancing `round_id` empties the current-round view of `PARTICIPANTS`;
    /// entries of finished rounds stay behind under their old round id.
    pub fn reset(&mut self) -> Uint128 {
        let drained = self.pooled_balance;
        self.round_id += 1;
        self.participant_count = 0;
        self.pooled_balance = Uint128::zero();
        drained
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
