//! Deterministic floor-graph domain split into coherent submodules.

pub mod minimap;
pub mod model;

mod generator;
mod navigate;

#[cfg(test)]
mod test_support;

pub use generator::{GenerationOverrides, MAX_GRID_HEIGHT, MAX_GRID_WIDTH, grid_height, grid_width};
pub use minimap::{MinimapCell, MinimapGrid};
pub use model::{Connections, FloorMap, RoomNode};

use crate::rng::DeterministicRng;
use crate::seed::Seed;
use crate::types::GenerationError;

/// Convenience: build the stream from `seed` and generate one floor.
pub fn generate_floor(seed: Seed, floor: u32) -> Result<FloorMap, GenerationError> {
    let mut rng = DeterministicRng::new(seed);
    FloorMap::generate(floor, &mut rng)
}
