use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{RoundHistoryResponse, UpkeepResponse};
use crate::state::{CONFIG, DRAW_STATE, LEDGER, ROUND_RESULTS};
use crate::upkeep::Eligibility;

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_check_upkeep(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let draw_state = DRAW_STATE.load(deps.storage)?;
    let ledger = LEDGER.load(deps.storage)?;
    let eligibility = Eligibility::evaluate(&config, &draw_state, &ledger, env.block.time);
    to_json_binary(&UpkeepResponse::from(eligibility))
}

pub fn query_entrance_fee(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.entrance_fee)
}

pub fn query_raffle_state(deps: Deps) -> StdResult<Binary> {
    let draw_state = DRAW_STATE.load(deps.storage)?;
    to_json_binary(&draw_state.status)
}

pub fn query_participant(deps: Deps, index: u32) -> StdResult<Binary> {
    let ledger = LEDGER.load(deps.storage)?;
    let participant = ledger.participant(deps.storage, index)?;
    to_json_binary(&participant)
}

pub fn query_participants(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(200) as usize;
    let ledger = LEDGER.load(deps.storage)?;
    let participants = ledger.participants(deps.storage, start_after, limit)?;
    to_json_binary(&participants)
}

pub fn query_number_of_players(deps: Deps) -> StdResult<Binary> {
    let ledger = LEDGER.load(deps.storage)?;
    to_json_binary(&ledger.participant_count)
}

pub fn query_last_draw_time(deps: Deps) -> StdResult<Binary> {
    let draw_state = DRAW_STATE.load(deps.storage)?;
    to_json_binary(&draw_state.last_draw_time)
}

pub fn query_interval(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config.interval_seconds)
}

pub fn query_recent_winner(deps: Deps) -> StdResult<Binary> {
    let draw_state = DRAW_STATE.load(deps.storage)?;
    to_json_binary(&draw_state.recent_winner)
}

pub fn query_draw_state(deps: Deps) -> StdResult<Binary> {
    let draw_state = DRAW_STATE.load(deps.storage)?;
    to_json_binary(&draw_state)
}

pub fn query_ledger(deps: Deps) -> StdResult<Binary> {
    let ledger = LEDGER.load(deps.storage)?;
    to_json_binary(&ledger)
}

pub fn query_round_result(deps: Deps, round_id: u64) -> StdResult<Binary> {
    let result = ROUND_RESULTS.may_load(deps.storage, round_id)?;
    to_json_binary(&result)
}

pub fn query_round_history(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let rounds: Vec<_> = ROUND_RESULTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, result)| result)
        .collect();

    to_json_binary(&RoundHistoryResponse { rounds })
}
