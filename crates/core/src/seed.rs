//! Run seeds: the single value an authority distributes so that every peer's
//! generation stream becomes identical.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::SeedError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(u64);

static ENTROPY_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

impl Seed {
    pub fn from_u64(value: u64) -> Self {
        Seed(value)
    }

    /// Parse an operator-supplied seed. Plain integers are taken verbatim so
    /// a numeric seed printed on one peer can be retyped on another; any
    /// other non-empty phrase is digested down to 64 bits.
    pub fn parse(raw: &str) -> Result<Self, SeedError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SeedError::EmptyPhrase);
        }
        if let Ok(numeric) = trimmed.parse::<u64>() {
            return Ok(Seed(numeric));
        }
        Ok(Seed(xxh3_64(trimmed.as_bytes())))
    }

    /// Non-deterministic seed for provisional or single-peer generation.
    /// Never use this for a floor that peers must agree on.
    pub fn from_entropy() -> Self {
        let now_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0_u128, |duration| duration.as_nanos());
        let pid = u64::from(std::process::id());
        let counter = ENTROPY_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

        let entropy = (now_nanos as u64)
            ^ ((now_nanos >> 64) as u64)
            ^ pid.rotate_left(17)
            ^ counter.rotate_left(7);

        Seed(mix_seed(entropy))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
