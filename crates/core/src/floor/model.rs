//! Room-graph data model for one generated floor.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Direction, Pos, RoomKind};

/// One-directional connection flags. `left` is intentionally absent; the
/// graph only flows forward or laterally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Connections {
    pub up: bool,
    pub down: bool,
    pub right: bool,
}

impl Connections {
    pub fn allows(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }

    fn as_bits(self) -> u8 {
        u8::from(self.up) | (u8::from(self.down) << 1) | (u8::from(self.right) << 2)
    }
}

/// One grid cell of the dungeon graph.
///
/// `pos` and `kind` are fixed at placement; `template` and `enemies` are
/// assigned exactly once at the end of generation; `visited` flips true the
/// first time the cursor enters; `cleared` is flipped by the encounter layer
/// once the room's objectives are done.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomNode {
    pub pos: Pos,
    pub kind: RoomKind,
    pub template: Option<&'static str>,
    pub enemies: Vec<&'static str>,
    pub connections: Connections,
    pub visited: bool,
    pub cleared: bool,
}

impl RoomNode {
    pub(super) fn new(pos: Pos, kind: RoomKind) -> Self {
        Self {
            pos,
            kind,
            template: None,
            enemies: Vec::new(),
            connections: Connections::default(),
            visited: false,
            cleared: false,
        }
    }
}

/// The generated floor plus its live navigation cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorMap {
    pub(super) floor: u32,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) grid: Vec<Option<RoomNode>>,
    pub(super) start_pos: Pos,
    pub(super) boss_pos: Pos,
    pub(super) current_pos: Pos,
}

impl FloorMap {
    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start_pos(&self) -> Pos {
        self.start_pos
    }

    pub fn boss_pos(&self) -> Pos {
        self.boss_pos
    }

    pub fn current_pos(&self) -> Pos {
        self.current_pos
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds and empty cells both answer `None`; a query outside the
    /// grid is a normal silent case, never an error.
    pub fn room_at(&self, pos: Pos) -> Option<&RoomNode> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.grid[self.index(pos)].as_ref()
    }

    pub(super) fn room_at_mut(&mut self, pos: Pos) -> Option<&mut RoomNode> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.grid[index].as_mut()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomNode> {
        self.grid.iter().flatten()
    }

    pub fn total_rooms(&self) -> usize {
        self.grid.iter().flatten().count()
    }

    pub fn visited_count(&self) -> usize {
        self.grid.iter().flatten().filter(|room| room.visited).count()
    }

    /// Canonical byte encoding of everything peers must agree on: extents,
    /// room kinds, connections, and content assignments. Navigation state
    /// (cursor, visited, cleared) is deliberately excluded — it is per-peer,
    /// not replicated.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.floor.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.start_pos.y.to_le_bytes());
        bytes.extend(self.start_pos.x.to_le_bytes());
        bytes.extend(self.boss_pos.y.to_le_bytes());
        bytes.extend(self.boss_pos.x.to_le_bytes());

        for cell in &self.grid {
            let Some(room) = cell else {
                bytes.push(0);
                continue;
            };
            bytes.push(match room.kind {
                RoomKind::Start => 1,
                RoomKind::Combat => 2,
                RoomKind::Boss => 3,
            });
            bytes.push(room.connections.as_bits());
            push_key(&mut bytes, room.template.unwrap_or(""));
            bytes.extend((room.enemies.len() as u32).to_le_bytes());
            for enemy in &room.enemies {
                push_key(&mut bytes, enemy);
            }
        }

        bytes
    }

    /// xxh3 of `canonical_bytes`; the cheap agreement check peers exchange
    /// after generating instead of diffing whole grids.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub(super) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

fn push_key(bytes: &mut Vec<u8>, key: &str) {
    bytes.extend((key.len() as u32).to_le_bytes());
    bytes.extend(key.as_bytes());
}
