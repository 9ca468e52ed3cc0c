use chance_raffle_common::types::RaffleStatus;
use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
    SubMsgResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{self, PAYOUT_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, UpdateConfigParams};
use crate::query;
use crate::state::{DrawState, Ledger, RaffleConfig, CONFIG, DRAW_STATE, LEDGER};

const CONTRACT_NAME: &str = "crates.io:chance-raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_entrance_fee(&msg.entrance_fee)?;
    execute::validate_request_confirmations(msg.request_confirmations)?;

    let config = RaffleConfig {
        admin: info.sender.clone(),
        randomness_oracle: deps.api.addr_validate(&msg.randomness_oracle)?,
        entrance_fee: msg.entrance_fee,
        interval_seconds: msg.interval_seconds,
        request_confirmations: msg.request_confirmations,
    };
    CONFIG.save(deps.storage, &config)?;

    // The first interval is measured from instantiation
    let draw_state = DrawState {
        status: RaffleStatus::Open,
        last_draw_time: env.block.time,
        pending_draw: None,
        next_request_id: 1,
        recent_winner: None,
        rounds_completed: 0,
    };
    DRAW_STATE.save(deps.storage, &draw_state)?;
    LEDGER.save(deps.storage, &Ledger::new())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute("entrance_fee", config.entrance_fee.to_string())
        .add_attribute("interval_seconds", config.interval_seconds.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute::enter(deps, env, info),
        ExecuteMsg::RequestDraw {} => execute::request_draw(deps, env, info),
        ExecuteMsg::FulfillRandomness {
            request_id,
            random_value,
        } => execute::fulfill_randomness(deps, env, info, request_id, random_value),
        ExecuteMsg::UpdateConfig {
            admin,
            randomness_oracle,
            entrance_fee,
            interval_seconds,
            request_confirmations,
        } => execute::update_config(
            deps,
            env,
            info,
            UpdateConfigParams {
                admin,
                randomness_oracle,
                entrance_fee,
                interval_seconds,
                request_confirmations,
            },
        ),
    }
}

/// A failed prize transfer aborts the whole fulfillment.
#[entry_point]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        PAYOUT_REPLY_ID => match msg.result {
            SubMsgResult::Err(reason) => Err(ContractError::TransferFailed { reason }),
            SubMsgResult::Ok(_) => Ok(Response::new()),
        },
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::CheckUpkeep {} => query::query_check_upkeep(deps, env),
        QueryMsg::EntranceFee {} => query::query_entrance_fee(deps),
        QueryMsg::RaffleState {} => query::query_raffle_state(deps),
        QueryMsg::Participant { index } => query::query_participant(deps, index),
        QueryMsg::Participants { start_after, limit } => {
            query::query_participants(deps, start_after, limit)
        }
        QueryMsg::NumberOfPlayers {} => query::query_number_of_players(deps),
        QueryMsg::LastDrawTime {} => query::query_last_draw_time(deps),
        QueryMsg::Interval {} => query::query_interval(deps),
        QueryMsg::RecentWinner {} => query::query_recent_winner(deps),
        QueryMsg::DrawState {} => query::query_draw_state(deps),
        QueryMsg::Ledger {} => query::query_ledger(deps),
        QueryMsg::RoundResult { round_id } => query::query_round_result(deps, round_id),
        QueryMsg::RoundHistory { start_after, limit } => {
            query::query_round_history(deps, start_after, limit)
        }
    }
}
