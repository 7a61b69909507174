//! Read-only minimap projection of floor state.
//!
//! The projection is a pure function of the floor, recomputed on demand; it
//! never mutates or caches. Reveal adjacency is 4-directional and includes
//! the otherwise unmodeled left direction — display is allowed to look
//! backward even though movement is not.

use crate::types::{Pos, RoomKind};

use super::model::FloorMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinimapCell {
    /// No room in this cell.
    Empty,
    /// A room exists but nothing nearby has been visited.
    Hidden,
    /// Unvisited room adjacent to a visited one.
    Revealed,
    Visited,
    /// Visited boss rooms get a distinct marker.
    VisitedBoss,
    /// The cursor.
    Current,
}

impl MinimapCell {
    fn as_byte(self) -> u8 {
        match self {
            MinimapCell::Empty => 0,
            MinimapCell::Hidden => 1,
            MinimapCell::Revealed => 2,
            MinimapCell::Visited => 3,
            MinimapCell::VisitedBoss => 4,
            MinimapCell::Current => 5,
        }
    }

    fn glyph(self) -> char {
        match self {
            MinimapCell::Empty => ' ',
            MinimapCell::Hidden => '#',
            MinimapCell::Revealed => '?',
            MinimapCell::Visited => '.',
            MinimapCell::VisitedBoss => 'B',
            MinimapCell::Current => '@',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimapGrid {
    width: usize,
    height: usize,
    cells: Vec<MinimapCell>,
}

impl MinimapGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[MinimapCell] {
        &self.cells
    }

    /// Out-of-range queries answer `Empty`, matching the floor's silent
    /// out-of-bounds behavior.
    pub fn cell_at(&self, pos: Pos) -> MinimapCell {
        if pos.x < 0 || pos.y < 0 || (pos.x as usize) >= self.width || (pos.y as usize) >= self.height
        {
            return MinimapCell::Empty;
        }
        self.cells[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    /// Byte-exact encoding used by replication tests to compare projections
    /// across peers.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.cells.iter().map(|cell| cell.as_byte()));
        bytes
    }

    pub fn render(&self) -> String {
        let mut text = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                text.push(self.cells[y * self.width + x].glyph());
            }
            text.push('\n');
        }
        text
    }
}

impl FloorMap {
    pub fn minimap_grid(&self) -> MinimapGrid {
        let mut cells = Vec::with_capacity(self.width() * self.height());
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                cells.push(self.project_cell(Pos { y, x }));
            }
        }
        MinimapGrid { width: self.width(), height: self.height(), cells }
    }

    fn project_cell(&self, pos: Pos) -> MinimapCell {
        let Some(room) = self.room_at(pos) else {
            return MinimapCell::Empty;
        };
        if pos == self.current_pos() {
            return MinimapCell::Current;
        }
        if room.visited {
            return if room.kind == RoomKind::Boss {
                MinimapCell::VisitedBoss
            } else {
                MinimapCell::Visited
            };
        }
        if self.adjacent_to_visited(pos) {
            return MinimapCell::Revealed;
        }
        MinimapCell::Hidden
    }

    fn adjacent_to_visited(&self, pos: Pos) -> bool {
        let neighbors = [
            Pos { y: pos.y - 1, x: pos.x },
            Pos { y: pos.y + 1, x: pos.x },
            Pos { y: pos.y, x: pos.x + 1 },
            Pos { y: pos.y, x: pos.x - 1 },
        ];
        neighbors
            .into_iter()
            .any(|neighbor| self.room_at(neighbor).is_some_and(|room| room.visited))
    }

    /// Human-readable grid and connection table. Non-authoritative; for
    /// debugging only.
    pub fn dump_grid(&self) -> String {
        let mut text = String::new();
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let glyph = match self.room_at(Pos { y, x }).map(|room| room.kind) {
                    None => '.',
                    Some(RoomKind::Start) => 'S',
                    Some(RoomKind::Combat) => 'C',
                    Some(RoomKind::Boss) => 'B',
                };
                text.push(glyph);
                text.push(' ');
            }
            text.push('\n');
        }
        for room in self.rooms() {
            let connections = room.connections;
            text.push_str(&format!(
                "({},{}) {:?} up={} down={} right={} template={} enemies={}\n",
                room.pos.x,
                room.pos.y,
                room.kind,
                connections.up,
                connections.down,
                connections.right,
                room.template.unwrap_or("-"),
                room.enemies.len(),
            ));
        }
        text
    }
}
