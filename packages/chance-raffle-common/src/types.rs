use cosmwasm_schema::cw_serde;

/// Lifecycle of the raffle round.
///
/// `Open` accepts entries. `Calculating` is entered when a draw is
/// requested and left only when the oracle fulfills that request.
#[cw_serde]
pub enum RaffleStatus {
    Open,
    Calculating,
}

impl RaffleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleStatus::Open => "open",
            RaffleStatus::Calculating => "calculating",
        }
    }
}

/// Status of a randomness request held by the oracle.
#[cw_serde]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}
