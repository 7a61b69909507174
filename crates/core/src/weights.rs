//! Weighted selection over opaque content keys.

use crate::rng::DeterministicRng;

/// One selectable key with its floor-dependent weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightedKey {
    pub key: &'static str,
    pub weight: u32,
    pub min_floor: u32,
    pub weight_per_floor: u32,
}

impl WeightedKey {
    /// Available from floor 1 with a depth-independent weight.
    pub const fn flat(key: &'static str, weight: u32) -> Self {
        Self { key, weight, min_floor: 1, weight_per_floor: 0 }
    }

    /// Locked until `min_floor`, then ramping by `weight_per_floor` each
    /// floor past it.
    pub const fn ramped(key: &'static str, weight: u32, min_floor: u32, weight_per_floor: u32) -> Self {
        Self { key, weight, min_floor, weight_per_floor }
    }

    fn effective_weight(&self, floor: u32) -> u32 {
        if floor < self.min_floor {
            return 0;
        }
        self.weight.saturating_add(self.weight_per_floor.saturating_mul(floor - self.min_floor))
    }
}

/// Pick one key for `floor`. Consumes exactly one draw from `rng` whenever
/// any entry carries weight at this floor; that single-draw discipline keeps
/// peer streams aligned no matter which key wins. A zero effective total
/// answers `None` without drawing — a content-table configuration fault that
/// is identical on every peer.
pub fn pick_weighted(
    floor: u32,
    entries: &[WeightedKey],
    rng: &mut DeterministicRng,
) -> Option<&'static str> {
    let total: u32 = entries.iter().map(|entry| entry.effective_weight(floor)).sum();
    if total == 0 {
        return None;
    }
    let threshold = rng.range(0, total as i32) as u32;
    let mut cumulative = 0_u32;
    for entry in entries {
        cumulative += entry.effective_weight(floor);
        if cumulative > threshold {
            return Some(entry.key);
        }
    }
    None
}
