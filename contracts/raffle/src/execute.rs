use chance_raffle_common::randomness::winner_index;
use chance_raffle_common::types::RaffleStatus;
use cosmwasm_std::{
    coin, to_json_binary, BankMsg, Coin, DepsMut, Env, Event, MessageInfo, Response, StdError,
    SubMsg, Uint128, WasmMsg,
};

use crate::error::ContractError;
use crate::msg::{OracleExecuteMsg, UpdateConfigParams};
use crate::state::{PendingDraw, RoundResult, CONFIG, DRAW_STATE, LEDGER, ROUND_RESULTS};
use crate::upkeep::Eligibility;

/// Reply id for the prize transfer sub-message.
pub const PAYOUT_REPLY_ID: u64 = 1;

pub const MIN_REQUEST_CONFIRMATIONS: u64 = 1;
pub const MAX_REQUEST_CONFIRMATIONS: u64 = 100;

pub fn validate_entrance_fee(fee: &Coin) -> Result<(), ContractError> {
    if fee.denom.is_empty() || fee.amount.is_zero() {
        return Err(ContractError::InvalidEntranceFee);
    }
    Ok(())
}

pub fn validate_request_confirmations(value: u64) -> Result<(), ContractError> {
    if !(MIN_REQUEST_CONFIRMATIONS..=MAX_REQUEST_CONFIRMATIONS).contains(&value) {
        return Err(ContractError::InvalidConfirmations {
            value,
            min: MIN_REQUEST_CONFIRMATIONS,
            max: MAX_REQUEST_CONFIRMATIONS,
        });
    }
    Ok(())
}

/// Enter the current round.
///
/// The whole amount sent in the fee denom is pooled, so overpayment is
/// added to the prize. Only the ledger changes.
pub fn enter(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let fee = &config.entrance_fee;

    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == fee.denom)
        .map(|c| c.amount)
        .unwrap_or(Uint128::zero());

    if paid < fee.amount {
        return Err(ContractError::InsufficientPayment {
            required: fee.amount,
            sent: paid,
        });
    }
    if let Some(other) = info.funds.iter().find(|c| c.denom != fee.denom) {
        return Err(ContractError::UnexpectedFunds {
            denom: other.denom.clone(),
        });
    }

    let draw_state = DRAW_STATE.load(deps.storage)?;
    if draw_state.status != RaffleStatus::Open {
        return Err(ContractError::RoundNotOpen);
    }

    let mut ledger = LEDGER.load(deps.storage)?;
    let index = ledger.record_entry(deps.storage, &info.sender, paid)?;
    LEDGER.save(deps.storage, &ledger)?;

    Ok(Response::new()
        .add_attribute("action", "enter")
        .add_attribute("participant", info.sender.to_string())
        .add_attribute("amount", paid.to_string())
        .add_event(
            Event::new("chance_raffle_enter")
                .add_attribute("participant", info.sender.to_string())
                .add_attribute("round_id", ledger.round_id.to_string())
                .add_attribute("entry_index", index.to_string())
                .add_attribute("amount", paid.to_string())
                .add_attribute("pooled_balance", ledger.pooled_balance.to_string()),
        ))
}

/// Close entry and ask the oracle for randomness. Anyone can call.
///
/// The status flips to `Calculating` and is saved before the oracle
/// message is built; while it holds, `enter` and further draw requests
/// are rejected.
pub fn request_draw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut draw_state = DRAW_STATE.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;

    Eligibility::evaluate(&config, &draw_state, &ledger, env.block.time).ensure_ready()?;

    let request_id = draw_state.next_request_id;
    draw_state.status = RaffleStatus::Calculating;
    draw_state.next_request_id += 1;
    draw_state.pending_draw = Some(PendingDraw {
        request_id,
        round_id: ledger.round_id,
        participant_count: ledger.participant_count,
        pooled_balance: ledger.pooled_balance,
        requested_at: env.block.time,
        requested_by: info.sender.clone(),
    });
    DRAW_STATE.save(deps.storage, &draw_state)?;

    let request_msg = WasmMsg::Execute {
        contract_addr: config.randomness_oracle.to_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomness {
            request_id,
            confirmations: config.request_confirmations,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(request_msg)
        .add_attribute("action", "request_draw")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("requested_by", info.sender.to_string())
        .add_event(
            Event::new("chance_draw_requested")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("status", draw_state.status.as_str())
                .add_attribute("round_id", ledger.round_id.to_string())
                .add_attribute("participant_count", ledger.participant_count.to_string())
                .add_attribute("pooled_balance", ledger.pooled_balance.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Oracle callback: pick the winner, pay out, reset the round.
///
/// 1. Only the configured oracle may call
/// 2. `request_id` must match the pending draw
/// 3. winner = participants[random_value % participant_count]
/// 4. Clear the ledger, reopen, advance the round clock
/// 5. Send the drained pool to the winner
///
/// The transfer replies on error and `reply` turns that into
/// `TransferFailed`, which reverts every change made here.
pub fn fulfill_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_value: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.randomness_oracle {
        return Err(ContractError::Unauthorized {
            reason: "only the randomness oracle can fulfill draws".to_string(),
        });
    }

    let mut draw_state = DRAW_STATE.load(deps.storage)?;
    let pending = match (&draw_state.status, &draw_state.pending_draw) {
        (RaffleStatus::Calculating, Some(pending)) if pending.request_id == request_id => {
            pending.clone()
        }
        _ => return Err(ContractError::UnknownRequest { request_id }),
    };

    let mut ledger = LEDGER.load(deps.storage)?;
    let index = winner_index(random_value, ledger.participant_count).ok_or_else(|| {
        StdError::generic_err(format!("round {} has no participants", ledger.round_id))
    })?;
    let winner = ledger.participant(deps.storage, index)?;
    let participant_count = ledger.participant_count;
    let round_id = ledger.round_id;

    let prize_amount = ledger.reset();
    LEDGER.save(deps.storage, &ledger)?;

    draw_state.status = RaffleStatus::Open;
    draw_state.last_draw_time = env.block.time;
    draw_state.pending_draw = None;
    draw_state.recent_winner = Some(winner.clone());
    draw_state.rounds_completed += 1;
    DRAW_STATE.save(deps.storage, &draw_state)?;

    let prize = coin(prize_amount.u128(), config.entrance_fee.denom.clone());
    ROUND_RESULTS.save(
        deps.storage,
        round_id,
        &RoundResult {
            round_id,
            request_id: pending.request_id,
            winner: winner.clone(),
            winner_index: index,
            prize: prize.clone(),
            random_value,
            participant_count,
            completed_at: env.block.time,
        },
    )?;

    let mut response = Response::new();
    if !prize_amount.is_zero() {
        let payout = BankMsg::Send {
            to_address: winner.to_string(),
            amount: vec![prize.clone()],
        };
        response = response.add_submessage(SubMsg::reply_on_error(payout, PAYOUT_REPLY_ID));
    }

    Ok(response
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("winner", winner.to_string())
        .add_attribute("prize", prize.to_string())
        .add_event(
            Event::new("chance_winner_picked")
                .add_attribute("winner", winner.to_string())
                .add_attribute("status", draw_state.status.as_str())
                .add_attribute("round_id", round_id.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("winner_index", index.to_string())
                .add_attribute("participant_count", participant_count.to_string())
                .add_attribute("random_value", random_value.to_string())
                .add_attribute("prize_amount", prize.amount.to_string())
                .add_attribute("prize_denom", prize.denom)
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only, and only while the round is open so
/// that the oracle or fee denom cannot change under an in-flight draw.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        admin,
        randomness_oracle,
        entrance_fee,
        interval_seconds,
        request_confirmations,
    } = params;

    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    let draw_state = DRAW_STATE.load(deps.storage)?;
    if draw_state.status != RaffleStatus::Open {
        return Err(ContractError::RoundNotOpen);
    }

    if let Some(admin) = admin {
        config.admin = deps.api.addr_validate(&admin)?;
    }
    if let Some(oracle) = randomness_oracle {
        config.randomness_oracle = deps.api.addr_validate(&oracle)?;
    }
    if let Some(fee) = entrance_fee {
        validate_entrance_fee(&fee)?;
        // Pooled funds are paid out in the fee denom
        let ledger = LEDGER.load(deps.storage)?;
        if fee.denom != config.entrance_fee.denom && ledger.participant_count > 0 {
            return Err(ContractError::FeeDenomLocked {
                current: config.entrance_fee.denom.clone(),
            });
        }
        config.entrance_fee = fee;
    }
    if let Some(interval) = interval_seconds {
        config.interval_seconds = interval;
    }
    if let Some(confirmations) = request_confirmations {
        validate_request_confirmations(confirmations)?;
        config.request_confirmations = confirmations;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
