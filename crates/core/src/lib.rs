pub mod content;
pub mod floor;
pub mod rng;
pub mod seed;
pub mod sync;
pub mod types;
pub mod weights;

pub use floor::{FloorMap, GenerationOverrides, MinimapCell, MinimapGrid, RoomNode, generate_floor};
pub use rng::DeterministicRng;
pub use seed::Seed;
pub use sync::{LockstepSession, SeedAnnouncement, SyncEvent};
pub use types::*;
