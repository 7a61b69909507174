//! Hand-built floor fixtures for navigation and projection tests.

use crate::types::{Pos, RoomKind};

use super::model::{Connections, FloorMap, RoomNode};

/// A 3x2 floor with a known shape:
///
/// ```text
///   S - C - B
///       |
///       C
/// ```
///
/// Start at (0,0), combat at (1,0) and (1,1), boss at (2,0). Connections are
/// derived by hand to mirror adjacency; the cursor starts on the visited
/// start room, exactly as generation leaves a real floor.
pub(super) fn manual_floor() -> FloorMap {
    let width = 3;
    let height = 2;
    let mut grid: Vec<Option<RoomNode>> = vec![None; width * height];

    let place = |grid: &mut Vec<Option<RoomNode>>, x: i32, y: i32, kind, connections| {
        let pos = Pos { y, x };
        let mut room = RoomNode::new(pos, kind);
        room.connections = connections;
        grid[(y as usize) * width + (x as usize)] = Some(room);
    };

    place(
        &mut grid,
        0,
        0,
        RoomKind::Start,
        Connections { up: false, down: false, right: true },
    );
    place(
        &mut grid,
        1,
        0,
        RoomKind::Combat,
        Connections { up: false, down: true, right: true },
    );
    place(
        &mut grid,
        1,
        1,
        RoomKind::Combat,
        Connections { up: true, down: false, right: false },
    );
    place(
        &mut grid,
        2,
        0,
        RoomKind::Boss,
        Connections { up: false, down: false, right: false },
    );

    let start_pos = Pos { y: 0, x: 0 };
    let mut map = FloorMap {
        floor: 1,
        width,
        height,
        grid,
        start_pos,
        boss_pos: Pos { y: 0, x: 2 },
        current_pos: start_pos,
    };
    map.mark_visited(0, 0);
    map
}
