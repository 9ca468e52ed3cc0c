use chance_raffle_common::randomness::derive_random_value;
use chance_raffle_common::types::RequestStatus;
use cosmwasm_std::{to_json_binary, DepsMut, Env, Event, MessageInfo, Response, WasmMsg};

use crate::error::ContractError;
use crate::msg::ConsumerExecuteMsg;
use crate::state::{RandomnessRequest, StoredBeacon, BEACONS, CONFIG, LATEST_ROUND, REQUESTS};
use crate::verify::{drand_round_at, verify_beacon};

pub const MIN_CONFIRMATIONS: u64 = 1;
pub const MAX_CONFIRMATIONS: u64 = 100;

/// Submit a drand beacon. Only operators can call this.
pub fn submit_beacon(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    round: u64,
    signature_hex: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can submit beacons".to_string(),
        });
    }

    if BEACONS.has(deps.storage, round) {
        return Err(ContractError::BeaconAlreadyExists { round });
    }

    let signature = hex::decode(&signature_hex).map_err(|_| ContractError::InvalidHex {
        field: "signature_hex".to_string(),
    })?;

    let randomness = verify_beacon(&config.quicknet_pubkey, round, &signature).map_err(|e| {
        ContractError::VerificationFailed {
            reason: e.to_string(),
        }
    })?;

    let beacon = StoredBeacon {
        round,
        randomness: randomness.to_vec(),
        signature,
        submitted_at: env.block.time,
        submitted_by: info.sender.clone(),
    };
    BEACONS.save(deps.storage, round, &beacon)?;

    let current_latest = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    if round > current_latest {
        LATEST_ROUND.save(deps.storage, &round)?;
    }

    Ok(Response::new()
        .add_attribute("action", "submit_beacon")
        .add_attribute("round", round.to_string())
        .add_attribute("submitted_by", info.sender.to_string())
        .add_event(
            Event::new("chance_beacon_submitted")
                .add_attribute("round", round.to_string())
                .add_attribute("randomness", hex::encode(randomness))
                .add_attribute("submitted_by", info.sender.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Register a randomness request for the calling contract.
///
/// The request targets a drand round that has not been produced yet, so
/// its randomness is unknown to everyone at request time.
pub fn request_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    confirmations: u64,
) -> Result<Response, ContractError> {
    if !(MIN_CONFIRMATIONS..=MAX_CONFIRMATIONS).contains(&confirmations) {
        return Err(ContractError::InvalidConfirmations {
            value: confirmations,
            min: MIN_CONFIRMATIONS,
            max: MAX_CONFIRMATIONS,
        });
    }

    let consumer = info.sender;
    if REQUESTS.has(deps.storage, (&consumer, request_id)) {
        return Err(ContractError::RequestAlreadyExists {
            consumer: consumer.to_string(),
            request_id,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let current_round = drand_round_at(
        config.genesis_time,
        config.period_seconds,
        env.block.time.seconds(),
    );
    let target_round = current_round + confirmations;

    let request = RandomnessRequest {
        consumer: consumer.clone(),
        request_id,
        target_round,
        status: RequestStatus::Pending,
        requested_at: env.block.time,
        fulfilled_at: None,
        random_value: None,
    };
    REQUESTS.save(deps.storage, (&consumer, request_id), &request)?;

    Ok(Response::new()
        .add_attribute("action", "request_randomness")
        .add_attribute("consumer", consumer.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("target_round", target_round.to_string())
        .add_event(
            Event::new("chance_randomness_requested")
                .add_attribute("consumer", consumer.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("target_round", target_round.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Deliver randomness to a consumer. Anyone can call once the target
/// beacon is stored.
///
/// The callback is a plain message: if the consumer rejects it the whole
/// transaction reverts and the request stays pending for a later retry.
pub fn fulfill_request(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    consumer: String,
    request_id: u64,
) -> Result<Response, ContractError> {
    let consumer_addr = deps.api.addr_validate(&consumer)?;

    let mut request = REQUESTS
        .may_load(deps.storage, (&consumer_addr, request_id))?
        .ok_or_else(|| ContractError::RequestNotFound {
            consumer: consumer.clone(),
            request_id,
        })?;

    if request.status != RequestStatus::Pending {
        return Err(ContractError::RequestAlreadyFulfilled {
            consumer,
            request_id,
        });
    }

    let beacon = BEACONS
        .may_load(deps.storage, request.target_round)?
        .ok_or(ContractError::BeaconNotFound {
            round: request.target_round,
        })?;

    let random_value = derive_random_value(&beacon.randomness, consumer_addr.as_str(), request_id);

    request.status = RequestStatus::Fulfilled;
    request.fulfilled_at = Some(env.block.time);
    request.random_value = Some(random_value);
    REQUESTS.save(deps.storage, (&consumer_addr, request_id), &request)?;

    let callback = WasmMsg::Execute {
        contract_addr: consumer_addr.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::FulfillRandomness {
            request_id,
            random_value,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "fulfill_request")
        .add_attribute("consumer", consumer_addr.to_string())
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("chance_randomness_fulfilled")
                .add_attribute("consumer", consumer_addr.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("drand_round", request.target_round.to_string())
                .add_attribute("random_value", random_value.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| *a != addr);
    }

    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}
