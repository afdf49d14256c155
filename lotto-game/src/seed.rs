//! Deterministic per-attempt seeds derived from one user-visible seed.
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::DRAW_STREAM_TAG;
use crate::draw::RandomDraw;

/// Seed for the draw stream of attempt `attempt` (zero-based).
///
/// HMAC-SHA256 keyed by `user_seed` keeps the streams of different attempts
/// independent while a single seed still replays the whole session.
#[must_use]
pub fn derive_attempt_seed(user_seed: u64, attempt: u32) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(DRAW_STREAM_TAG);
    mac.update(&attempt.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Reproducible draw source for one attempt of a seeded session.
#[must_use]
pub fn attempt_draws(user_seed: u64, attempt: u32) -> RandomDraw {
    RandomDraw::from_seed(derive_attempt_seed(user_seed, attempt))
}
