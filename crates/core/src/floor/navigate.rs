//! Live navigation over a generated floor: a forward-only cursor that marks
//! rooms visited as the party enters them.

use crate::types::{Direction, Pos};

use super::model::{FloorMap, RoomNode};

impl FloorMap {
    pub fn current_room(&self) -> &RoomNode {
        // Generation initializes the cursor on the start room and move_to
        // only ever lands on existing rooms.
        self.room_at(self.current_pos).expect("cursor references a placed room")
    }

    /// Exits usable from the current room, in fixed `[Up, Down, Right]`
    /// order: neighbors with a declared connection that are not yet visited.
    /// A connection into a visited room stays valid internally but is
    /// excluded here — one-shot forward exploration without edge removal.
    pub fn available_exits(&self) -> Vec<(Direction, Pos)> {
        let room = self.current_room();
        let mut exits = Vec::new();
        for direction in Direction::ALL {
            if !room.connections.allows(direction) {
                continue;
            }
            let next = direction.step(self.current_pos);
            if let Some(neighbor) = self.room_at(next)
                && !neighbor.visited
            {
                exits.push((direction, next));
            }
        }
        exits
    }

    /// Returns `false` with no mutation when the current room lacks the
    /// connection or no room exists at the destination. Callers are expected
    /// to offer only `available_exits`, so a `false` here is a checkable
    /// precondition failure, not an exceptional state.
    pub fn move_to(&mut self, direction: Direction) -> bool {
        if !self.current_room().connections.allows(direction) {
            return false;
        }
        let next = direction.step(self.current_pos);
        if self.room_at(next).is_none() {
            return false;
        }
        self.current_pos = next;
        self.mark_visited(next.x, next.y);
        true
    }

    /// Idempotent; silently ignores positions without a room.
    pub fn mark_visited(&mut self, x: i32, y: i32) {
        if let Some(room) = self.room_at_mut(Pos { y, x }) {
            room.visited = true;
        }
    }

    /// Idempotent; silently ignores positions without a room. Flipped by the
    /// encounter layer once a room's objectives are complete.
    pub fn mark_cleared(&mut self, x: i32, y: i32) {
        if let Some(room) = self.room_at_mut(Pos { y, x }) {
            room.cleared = true;
        }
    }
}
