//! Floor-graph construction.
//!
//! Every random decision flows through the caller-supplied stream in a fixed
//! order: boss row, guaranteed-path detours, branch coins, then per-room
//! content in raster order. Any change to the draw sequence here is a
//! cross-peer compatibility break, so the consumption points are locked by
//! draw-count parity tests.

use std::collections::{BTreeSet, VecDeque};

use crate::content::{ENEMY_WEIGHTS, TEMPLATE_WEIGHTS};
use crate::rng::DeterministicRng;
use crate::types::{Direction, GenerationError, Pos, RoomKind};
use crate::weights::pick_weighted;

use super::model::{Connections, FloorMap, RoomNode};

pub const MAX_GRID_WIDTH: usize = 10;
pub const MAX_GRID_HEIGHT: usize = 6;

const VERTICAL_DETOUR_CHANCE: f64 = 0.3;
const BRANCH_COIN_CHANCE: f64 = 0.5;
const BRANCH_BUDGET_RATIO: f64 = 0.3;
const MIN_ENEMIES_PER_ROOM: i32 = 3;
const MAX_ENEMIES_PER_ROOM_EXCLUSIVE: i32 = 6;

/// Difficulty scales grid extent up to a hard cap.
pub fn grid_width(floor: u32) -> usize {
    ((3 + floor) as usize).min(MAX_GRID_WIDTH)
}

pub fn grid_height(floor: u32) -> usize {
    ((2 + floor / 2) as usize).min(MAX_GRID_HEIGHT)
}

/// One-shot choices an authority fixes before the deterministic stream
/// starts. Peers receive them inside the seed announcement and apply them
/// identically; the corresponding draws still happen, so the stream is
/// byte-for-byte the same whether or not an override is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationOverrides {
    /// Replaces the start room's drawn template.
    pub first_template: Option<&'static str>,
}

impl FloorMap {
    /// Build the floor graph for `floor` from the shared stream.
    pub fn generate(floor: u32, rng: &mut DeterministicRng) -> Result<FloorMap, GenerationError> {
        Self::generate_with_overrides(floor, rng, &GenerationOverrides::default())
    }

    pub fn generate_with_overrides(
        floor: u32,
        rng: &mut DeterministicRng,
        overrides: &GenerationOverrides,
    ) -> Result<FloorMap, GenerationError> {
        let width = grid_width(floor);
        let height = grid_height(floor);

        let start_pos = Pos { y: (height / 2) as i32, x: 0 };
        let boss_row = if height > 1 { rng.range(0, height as i32) } else { 0 };
        let boss_pos = Pos { y: boss_row, x: (width - 1) as i32 };

        let mut map = FloorMap {
            floor,
            width,
            height,
            grid: vec![None; width * height],
            start_pos,
            boss_pos,
            current_pos: start_pos,
        };

        map.place_room(start_pos, RoomKind::Start);
        carve_guaranteed_path(&mut map, rng);
        grow_branches(&mut map, rng);
        derive_connections(&mut map);
        assign_content(&mut map, rng, overrides);

        if !boss_reachable(&map) {
            return Err(GenerationError::BossUnreachable { floor, start: start_pos, boss: boss_pos });
        }

        map.mark_visited(start_pos.x, start_pos.y);
        Ok(map)
    }

    fn place_room(&mut self, pos: Pos, kind: RoomKind) {
        let index = self.index(pos);
        self.grid[index] = Some(RoomNode::new(pos, kind));
    }
}

/// Greedy walk from start to boss. Rightward steps dominate; while the rows
/// still differ a 0.3 draw may substitute one vertical step toward the boss
/// row. The detour draw happens only when the rows differ. Once the boss
/// column is reached the walk turns purely vertical with no further draws.
/// This plants at least one valid path before any validation runs.
fn carve_guaranteed_path(map: &mut FloorMap, rng: &mut DeterministicRng) {
    let boss = map.boss_pos;
    let mut cursor = map.start_pos;

    while cursor.x < boss.x {
        if cursor.y != boss.y && rng.chance(VERTICAL_DETOUR_CHANCE) {
            cursor.y += (boss.y - cursor.y).signum();
        } else {
            cursor.x += 1;
        }
        place_path_room(map, cursor);
    }
    while cursor.y != boss.y {
        cursor.y += (boss.y - cursor.y).signum();
        place_path_room(map, cursor);
    }
}

fn place_path_room(map: &mut FloorMap, pos: Pos) {
    if map.room_at(pos).is_some() {
        return;
    }
    let kind = if pos == map.boss_pos { RoomKind::Boss } else { RoomKind::Combat };
    map.place_room(pos, kind);
}

/// Raster scan (`x` outer, `y` inner) over interior columns. A still-empty
/// cell with a placed left neighbor flips one 0.5 coin; the coin is flipped
/// even when the branch budget is already spent, because skipping it would
/// shift every later draw and desync peers. Branches attach only via the
/// left-neighbor test, preserving forward-only flow.
fn grow_branches(map: &mut FloorMap, rng: &mut DeterministicRng) {
    let budget = (BRANCH_BUDGET_RATIO * (map.width * map.height) as f64) as usize;
    let mut placed = 0_usize;

    for x in 1..map.width - 1 {
        for y in 0..map.height {
            let pos = Pos { y: y as i32, x: x as i32 };
            if map.room_at(pos).is_some() {
                continue;
            }
            if map.room_at(Pos { y: pos.y, x: pos.x - 1 }).is_none() {
                continue;
            }
            if rng.chance(BRANCH_COIN_CHANCE) && placed < budget {
                map.place_room(pos, RoomKind::Combat);
                placed += 1;
            }
        }
    }
}

/// Connections mirror physical adjacency exactly: `right`/`up`/`down` are
/// true iff a room exists in that neighboring cell. `left` is never modeled.
fn derive_connections(map: &mut FloorMap) {
    for y in 0..map.height as i32 {
        for x in 0..map.width as i32 {
            let pos = Pos { y, x };
            if map.room_at(pos).is_none() {
                continue;
            }
            let connections = Connections {
                up: map.room_at(Pos { y: y - 1, x }).is_some(),
                down: map.room_at(Pos { y: y + 1, x }).is_some(),
                right: map.room_at(Pos { y, x: x + 1 }).is_some(),
            };
            if let Some(room) = map.room_at_mut(pos) {
                room.connections = connections;
            }
        }
    }
}

/// Content assignment in the same raster order as the branch scan. Every
/// non-boss room draws a template; every combat room then draws an enemy
/// count in `[3, 6)` followed by that many weighted enemy picks. Template
/// before enemies, rooms in raster order — the ordering is load-bearing.
fn assign_content(map: &mut FloorMap, rng: &mut DeterministicRng, overrides: &GenerationOverrides) {
    let floor = map.floor;
    for x in 0..map.width {
        for y in 0..map.height {
            let pos = Pos { y: y as i32, x: x as i32 };
            let Some(kind) = map.room_at(pos).map(|room| room.kind) else {
                continue;
            };
            if kind == RoomKind::Boss {
                continue;
            }

            let mut template = pick_weighted(floor, TEMPLATE_WEIGHTS, rng);
            if kind == RoomKind::Start && overrides.first_template.is_some() {
                template = overrides.first_template;
            }

            let enemies = if kind == RoomKind::Combat {
                let count = rng.range(MIN_ENEMIES_PER_ROOM, MAX_ENEMIES_PER_ROOM_EXCLUSIVE);
                (0..count).filter_map(|_| pick_weighted(floor, ENEMY_WEIGHTS, rng)).collect()
            } else {
                Vec::new()
            };

            if let Some(room) = map.room_at_mut(pos) {
                room.template = template;
                room.enemies = enemies;
            }
        }
    }
}

/// BFS from start over declared `up`/`down`/`right` connections.
fn boss_reachable(map: &FloorMap) -> bool {
    let mut open = VecDeque::from([map.start_pos]);
    let mut seen = BTreeSet::from([map.start_pos]);

    while let Some(pos) = open.pop_front() {
        if pos == map.boss_pos {
            return true;
        }
        let Some(room) = map.room_at(pos) else {
            continue;
        };
        for direction in Direction::ALL {
            if !room.connections.allows(direction) {
                continue;
            }
            let next = direction.step(pos);
            if map.room_at(next).is_none() || !seen.insert(next) {
                continue;
            }
            open.push_back(next);
        }
    }

    false
}
