//! Integration tests for the Chance raffle.
//!
//! Both contracts run against their own `cosmwasm_std::testing` mocks. The
//! messages one contract emits are decoded and delivered to the other's
//! `execute` entry point with the emitting contract as sender, which is what
//! the chain does for a `WasmMsg::Execute`.
//!
//! Run:
//! ```bash
//! cargo test -p chance-raffle-integration-tests
//! ```

use chance_raffle::contract as raffle;
use chance_raffle::error::ContractError as RaffleError;
use chance_raffle::msg as raffle_msg;
use chance_raffle::state::{DrawState, RoundResult};
use chance_raffle_common::randomness::{derive_random_value, winner_index};
use chance_raffle_common::types::{RaffleStatus, RequestStatus};
use chance_randomness_oracle::contract as oracle;
use chance_randomness_oracle::msg as oracle_msg;
use chance_randomness_oracle::state::RandomnessRequest;
use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coin, from_json, Addr, BankMsg, CosmosMsg, Env, MemoryStorage, OwnedDeps, Response,
    Timestamp, WasmMsg,
};
use serde::de::DeserializeOwned;

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
const GENESIS_TIME: u64 = 1692803367;

/// Real quicknet test vector: round 1000
const TEST_ROUND: u64 = 1000;
const TEST_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";
const TEST_RANDOMNESS_HEX: &str =
    "fe290beca10872ef2fb164d2aa4442de4566183ec51c56ff3cd603d930e54fdd";

const FEE_DENOM: &str = "uraffle";
const ENTRANCE_FEE: u128 = 10;
const INTERVAL: u64 = 1;

// ─── Helpers ───

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

/// Seconds after quicknet genesis, so `at(2988)` falls inside round 997.
fn at(offset: u64) -> Timestamp {
    Timestamp::from_seconds(GENESIS_TIME + offset)
}

fn oracle_env(time: Timestamp) -> Env {
    let mut env = mock_env();
    env.block.time = time;
    env.contract.address = addr("oracle");
    env
}

fn raffle_env(time: Timestamp) -> Env {
    let mut env = mock_env();
    env.block.time = time;
    env
}

fn raffle_addr() -> Addr {
    mock_env().contract.address
}

struct Harness {
    oracle: Deps,
    raffle: Deps,
}

impl Harness {
    /// Oracle and raffle instantiated at `at(2900)`, three confirmations per draw.
    fn new() -> Self {
        let mut oracle_deps = mock_dependencies();
        let msg = oracle_msg::InstantiateMsg {
            operators: vec![addr("operator").to_string()],
            quicknet_pubkey_hex: QUICKNET_PK_HEX.to_string(),
            chain_hash: "52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971"
                .to_string(),
            genesis_time: GENESIS_TIME,
            period_seconds: 3,
        };
        let info = message_info(&addr("admin"), &[]);
        oracle::instantiate(oracle_deps.as_mut(), oracle_env(at(2900)), info, msg).unwrap();

        let mut raffle_deps = mock_dependencies();
        let msg = raffle_msg::InstantiateMsg {
            randomness_oracle: addr("oracle").to_string(),
            entrance_fee: coin(ENTRANCE_FEE, FEE_DENOM),
            interval_seconds: INTERVAL,
            request_confirmations: 3,
        };
        let info = message_info(&addr("admin"), &[]);
        raffle::instantiate(raffle_deps.as_mut(), raffle_env(at(2900)), info, msg).unwrap();

        Harness {
            oracle: oracle_deps,
            raffle: raffle_deps,
        }
    }

    fn enter(&mut self, player: &str, time: Timestamp) {
        let info = message_info(&addr(player), &[coin(ENTRANCE_FEE, FEE_DENOM)]);
        raffle::execute(
            self.raffle.as_mut(),
            raffle_env(time),
            info,
            raffle_msg::ExecuteMsg::Enter {},
        )
        .unwrap();
    }

    /// Request a draw and deliver the resulting oracle request.
    fn request_draw(&mut self, time: Timestamp) -> u64 {
        let info = message_info(&addr("keeper"), &[]);
        let res = raffle::execute(
            self.raffle.as_mut(),
            raffle_env(time),
            info,
            raffle_msg::ExecuteMsg::RequestDraw {},
        )
        .unwrap();

        let (target, msg): (Addr, oracle_msg::ExecuteMsg) = single_wasm_execute(&res);
        assert_eq!(target, addr("oracle"));
        let request_id = match &msg {
            oracle_msg::ExecuteMsg::RequestRandomness { request_id, .. } => *request_id,
            other => panic!("unexpected oracle message: {:?}", other),
        };

        let info = message_info(&raffle_addr(), &[]);
        oracle::execute(self.oracle.as_mut(), oracle_env(time), info, msg).unwrap();
        request_id
    }

    fn submit_beacon(&mut self) {
        let info = message_info(&addr("operator"), &[]);
        let msg = oracle_msg::ExecuteMsg::SubmitBeacon {
            round: TEST_ROUND,
            signature_hex: TEST_SIG_HEX.to_string(),
        };
        oracle::execute(self.oracle.as_mut(), oracle_env(at(2997)), info, msg).unwrap();
    }

    /// Fulfill on the oracle and return the consumer callback it emits.
    fn fulfill_on_oracle(&mut self, request_id: u64) -> raffle_msg::ExecuteMsg {
        let info = message_info(&addr("relayer"), &[]);
        let msg = oracle_msg::ExecuteMsg::FulfillRequest {
            consumer: raffle_addr().to_string(),
            request_id,
        };
        let res = oracle::execute(self.oracle.as_mut(), oracle_env(at(3000)), info, msg).unwrap();
        let (target, callback) = single_wasm_execute(&res);
        assert_eq!(target, raffle_addr());
        callback
    }

    fn deliver_callback(
        &mut self,
        callback: raffle_msg::ExecuteMsg,
    ) -> Result<Response, RaffleError> {
        self.deliver_callback_at(callback, at(3000))
    }

    fn deliver_callback_at(
        &mut self,
        callback: raffle_msg::ExecuteMsg,
        time: Timestamp,
    ) -> Result<Response, RaffleError> {
        let info = message_info(&addr("oracle"), &[]);
        raffle::execute(self.raffle.as_mut(), raffle_env(time), info, callback)
    }

    fn raffle_query<T: DeserializeOwned>(&self, msg: raffle_msg::QueryMsg) -> T {
        let res = raffle::query(self.raffle.as_ref(), raffle_env(at(3000)), msg).unwrap();
        from_json(res).unwrap()
    }
}

fn single_wasm_execute<T: DeserializeOwned>(res: &Response) -> (Addr, T) {
    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => (Addr::unchecked(contract_addr), from_json(msg).unwrap()),
        other => panic!("expected wasm execute, got {:?}", other),
    }
}

fn expected_value(request_id: u64) -> cosmwasm_std::Uint128 {
    let randomness = hex::decode(TEST_RANDOMNESS_HEX).unwrap();
    derive_random_value(&randomness, raffle_addr().as_str(), request_id)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_draw_cycle() {
    let mut h = Harness::new();
    let players = ["alice", "bob", "carol", "dave"];
    for p in players {
        h.enter(p, at(2950));
    }

    // Round 997 plus three confirmations targets the test vector round
    let request_id = h.request_draw(at(2988));
    assert_eq!(request_id, 1);

    let state: RaffleStatus = h.raffle_query(raffle_msg::QueryMsg::RaffleState {});
    assert_eq!(state, RaffleStatus::Calculating);

    let res = oracle::query(
        h.oracle.as_ref(),
        oracle_env(at(2988)),
        oracle_msg::QueryMsg::Request {
            consumer: raffle_addr().to_string(),
            request_id,
        },
    )
    .unwrap();
    let request: Option<RandomnessRequest> = from_json(res).unwrap();
    assert_eq!(request.unwrap().target_round, TEST_ROUND);

    // Late entries are rejected while calculating
    let info = message_info(&addr("eve"), &[coin(ENTRANCE_FEE, FEE_DENOM)]);
    let err = raffle::execute(
        h.raffle.as_mut(),
        raffle_env(at(2990)),
        info,
        raffle_msg::ExecuteMsg::Enter {},
    )
    .unwrap_err();
    assert!(matches!(err, RaffleError::RoundNotOpen));

    h.submit_beacon();
    let callback = h.fulfill_on_oracle(request_id);

    let random_value = expected_value(request_id);
    assert_eq!(
        callback,
        raffle_msg::ExecuteMsg::FulfillRandomness {
            request_id,
            random_value,
        }
    );

    let res = h.deliver_callback(callback).unwrap();

    let index = winner_index(random_value, players.len() as u32).unwrap();
    let winner = addr(players[index as usize]);

    assert_eq!(res.messages.len(), 1);
    match &res.messages[0].msg {
        CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
            assert_eq!(to_address, &winner.to_string());
            assert_eq!(amount, &vec![coin(4 * ENTRANCE_FEE, FEE_DENOM)]);
        }
        other => panic!("expected bank send, got {:?}", other),
    }

    let recent: Option<Addr> = h.raffle_query(raffle_msg::QueryMsg::RecentWinner {});
    assert_eq!(recent, Some(winner.clone()));

    let draw_state: DrawState = h.raffle_query(raffle_msg::QueryMsg::DrawState {});
    assert_eq!(draw_state.status, RaffleStatus::Open);
    assert_eq!(draw_state.last_draw_time, at(3000));
    assert!(draw_state.pending_draw.is_none());

    let players_now: u32 = h.raffle_query(raffle_msg::QueryMsg::NumberOfPlayers {});
    assert_eq!(players_now, 0);

    let result: Option<RoundResult> =
        h.raffle_query(raffle_msg::QueryMsg::RoundResult { round_id: 1 });
    let result = result.unwrap();
    assert_eq!(result.winner, winner);
    assert_eq!(result.winner_index, index);
    assert_eq!(result.random_value, random_value);

    let res = oracle::query(
        h.oracle.as_ref(),
        oracle_env(at(3000)),
        oracle_msg::QueryMsg::Request {
            consumer: raffle_addr().to_string(),
            request_id,
        },
    )
    .unwrap();
    let request: Option<RandomnessRequest> = from_json(res).unwrap();
    assert_eq!(request.unwrap().status, RequestStatus::Fulfilled);
}

#[test]
fn test_fulfill_waits_for_target_beacon() {
    let mut h = Harness::new();
    h.enter("alice", at(2950));
    let request_id = h.request_draw(at(2988));

    let info = message_info(&addr("relayer"), &[]);
    let msg = oracle_msg::ExecuteMsg::FulfillRequest {
        consumer: raffle_addr().to_string(),
        request_id,
    };
    let err = oracle::execute(h.oracle.as_mut(), oracle_env(at(2990)), info, msg).unwrap_err();
    assert!(matches!(
        err,
        chance_randomness_oracle::error::ContractError::BeaconNotFound { round: TEST_ROUND }
    ));

    let state: RaffleStatus = h.raffle_query(raffle_msg::QueryMsg::RaffleState {});
    assert_eq!(state, RaffleStatus::Calculating);
}

#[test]
fn test_consecutive_rounds_use_fresh_request_ids() {
    let mut h = Harness::new();
    h.enter("alice", at(2950));
    h.enter("bob", at(2950));
    let first = h.request_draw(at(2988));
    h.submit_beacon();
    let callback = h.fulfill_on_oracle(first);
    h.deliver_callback_at(callback, at(2988)).unwrap();

    // Round two opens at the fulfill time
    h.enter("carol", at(2988));
    let ledger: chance_raffle::state::Ledger = h.raffle_query(raffle_msg::QueryMsg::Ledger {});
    assert_eq!(ledger.round_id, 2);
    assert_eq!(ledger.participant_count, 1);

    // Still inside drand round 997, so the routed request also targets round 1000
    let second = h.request_draw(at(2989));
    assert_eq!(second, 2);

    let res = oracle::query(
        h.oracle.as_ref(),
        oracle_env(at(2989)),
        oracle_msg::QueryMsg::Request {
            consumer: raffle_addr().to_string(),
            request_id: second,
        },
    )
    .unwrap();
    let request: Option<RandomnessRequest> = from_json(res).unwrap();
    let request = request.unwrap();
    assert_eq!(request.target_round, TEST_ROUND);
    assert_eq!(request.status, RequestStatus::Pending);

    let callback = h.fulfill_on_oracle(second);
    assert_eq!(
        callback,
        raffle_msg::ExecuteMsg::FulfillRandomness {
            request_id: second,
            random_value: expected_value(second),
        }
    );
    h.deliver_callback(callback).unwrap();

    let recent: Option<Addr> = h.raffle_query(raffle_msg::QueryMsg::RecentWinner {});
    assert_eq!(recent, Some(addr("carol")));

    let history: raffle_msg::RoundHistoryResponse =
        h.raffle_query(raffle_msg::QueryMsg::RoundHistory {
            start_after: None,
            limit: None,
        });
    assert_eq!(history.rounds.len(), 2);
    assert_eq!(history.rounds[0].request_id, first);
    assert_eq!(history.rounds[1].request_id, second);
    assert_ne!(history.rounds[0].random_value, history.rounds[1].random_value);
}

#[test]
fn test_replayed_callback_is_rejected() {
    let mut h = Harness::new();
    h.enter("alice", at(2950));
    h.enter("bob", at(2950));
    let request_id = h.request_draw(at(2988));
    h.submit_beacon();
    let callback = h.fulfill_on_oracle(request_id);

    // Only the configured oracle may deliver randomness
    let info = message_info(&addr("mallory"), &[]);
    let err = raffle::execute(
        h.raffle.as_mut(),
        raffle_env(at(3000)),
        info,
        callback.clone(),
    )
    .unwrap_err();
    assert!(matches!(err, RaffleError::Unauthorized { .. }));

    h.deliver_callback(callback.clone()).unwrap();
    let rounds_before: DrawState = h.raffle_query(raffle_msg::QueryMsg::DrawState {});

    let err = h.deliver_callback(callback).unwrap_err();
    assert!(matches!(err, RaffleError::UnknownRequest { request_id: 1 }));

    let rounds_after: DrawState = h.raffle_query(raffle_msg::QueryMsg::DrawState {});
    assert_eq!(rounds_before, rounds_after);
}
