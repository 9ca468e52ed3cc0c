use cosmwasm_std::Uint128;
use sha2::{Digest, Sha256};

/// Derive the random value delivered to a consumer from a verified beacon.
///
/// `value = uint128(sha256( beacon_randomness || consumer || request_id_be )[0..16])`
///
/// Mixing in the consumer address and request id keeps two requests that
/// target the same drand round from receiving the same value.
pub fn derive_random_value(beacon_randomness: &[u8], consumer: &str, request_id: u64) -> Uint128 {
    let mut hasher = Sha256::new();
    hasher.update(beacon_randomness);
    hasher.update(consumer.as_bytes());
    hasher.update(request_id.to_be_bytes());
    let digest: [u8; 32] = hasher.finalize().into();

    let mut value_bytes = [0u8; 16];
    value_bytes.copy_from_slice(&digest[0..16]);
    Uint128::new(u128::from_be_bytes(value_bytes))
}

/// Map a random value onto a participant index.
///
/// Returns `None` when there are no participants.
pub fn winner_index(random_value: Uint128, participant_count: u32) -> Option<u32> {
    if participant_count == 0 {
        return None;
    }
    let index = random_value.u128() % u128::from(participant_count);
    // index < participant_count, which fits in u32
    Some(index as u32)
}
