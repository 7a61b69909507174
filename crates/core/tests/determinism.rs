//! Cross-instance replication tests: two independently driven generations
//! from the same inputs must agree byte-for-byte and draw-for-draw.

use delve_core::content::keys;
use delve_core::floor::{grid_height, grid_width};
use delve_core::{
    DeterministicRng, Direction, FloorMap, GenerationOverrides, Seed, generate_floor,
};
use proptest::prelude::*;

fn generate_counted(seed: Seed, floor: u32) -> (FloorMap, u64) {
    let mut rng = DeterministicRng::new(seed);
    let map = FloorMap::generate(floor, &mut rng).expect("generation should succeed");
    (map, rng.draws())
}

#[test]
fn independent_instances_agree_on_bytes_fingerprints_and_draw_counts() {
    for (seed, floor) in [(12_345_u64, 1_u32), (12_345, 4), (98_765, 7), (1, 10)] {
        let (left, left_draws) = generate_counted(Seed::from_u64(seed), floor);
        let (right, right_draws) = generate_counted(Seed::from_u64(seed), floor);

        assert_eq!(
            left.canonical_bytes(),
            right.canonical_bytes(),
            "seed={seed}, floor={floor}: canonical bytes diverged"
        );
        assert_eq!(left.fingerprint(), right.fingerprint());
        assert_eq!(
            left_draws, right_draws,
            "seed={seed}, floor={floor}: peers consumed different draw counts"
        );
    }
}

#[test]
fn different_seeds_produce_different_floors() {
    let (left, _) = generate_counted(Seed::from_u64(123), 3);
    let (right, _) = generate_counted(Seed::from_u64(456), 3);
    assert_ne!(
        left.fingerprint(),
        right.fingerprint(),
        "different seeds should essentially never collide on a whole floor"
    );
}

#[test]
fn string_seeded_instances_share_minimap_projections_exactly() {
    let seed = Seed::parse("abc123").expect("phrase seed should parse");

    let left = generate_floor(seed, 3).expect("generation should succeed");
    let right = generate_floor(seed, 3).expect("generation should succeed");

    assert_eq!(
        left.minimap_grid().canonical_bytes(),
        right.minimap_grid().canonical_bytes(),
        "independently constructed peers must render identical minimaps"
    );
}

#[test]
fn floor_one_seed_42_scenario() {
    let map = generate_floor(Seed::from_u64(42), 1).expect("generation should succeed");

    assert_eq!(map.width(), 4);
    assert_eq!(map.height(), grid_height(1));
    assert_eq!(map.start_pos().x, 0);
    assert_eq!(map.start_pos().y, (map.height() / 2) as i32);
    assert_eq!(map.boss_pos().x, 3, "boss column is width - 1");

    // Validation already ran inside generate(); reaching this point means the
    // BFS from start found the boss.
    assert!(map.room_at(map.boss_pos()).is_some());
}

#[test]
fn start_room_exits_are_exactly_its_connected_unvisited_neighbors() {
    let map = generate_floor(Seed::from_u64(42), 1).expect("generation should succeed");
    let exits = map.available_exits();

    assert!(!exits.is_empty(), "the guaranteed path always leaves the start room somewhere to go");
    for (direction, pos) in &exits {
        assert!(map.current_room().connections.allows(*direction));
        let neighbor = map.room_at(*pos).expect("exit target must exist");
        assert!(!neighbor.visited);
    }
}

#[test]
fn rejected_moves_leave_the_visited_set_unchanged() {
    let mut map = generate_floor(Seed::from_u64(42), 1).expect("generation should succeed");

    let blocked: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| !map.current_room().connections.allows(*direction))
        .collect();

    let visited_before = map.visited_count();
    let cursor_before = map.current_pos();
    for direction in blocked {
        assert!(!map.move_to(direction));
    }
    assert_eq!(map.visited_count(), visited_before);
    assert_eq!(map.current_pos(), cursor_before);
}

#[test]
fn clearing_the_boss_preserves_connections_and_visited_state() {
    let mut map = generate_floor(Seed::from_u64(7), 2).expect("generation should succeed");
    let boss = map.boss_pos();
    let before = map.room_at(boss).expect("boss room exists").clone();

    map.mark_cleared(boss.x, boss.y);

    let after = map.room_at(boss).expect("boss room exists");
    assert!(after.cleared);
    assert_eq!(after.connections, before.connections);
    assert_eq!(after.visited, before.visited);
}

#[test]
fn overrides_do_not_perturb_the_draw_sequence() {
    let seed = Seed::from_u64(555);

    let mut plain_rng = DeterministicRng::new(seed);
    let plain = FloorMap::generate(4, &mut plain_rng).expect("generation should succeed");

    let overrides = GenerationOverrides { first_template: Some(keys::TEMPLATE_STONE_HALL) };
    let mut overridden_rng = DeterministicRng::new(seed);
    let overridden = FloorMap::generate_with_overrides(4, &mut overridden_rng, &overrides)
        .expect("generation should succeed");

    assert_eq!(
        plain_rng.draws(),
        overridden_rng.draws(),
        "a pre-seed override must replace a drawn value, not skip the draw"
    );
    // Everything apart from the start room's template is identical.
    assert_eq!(plain.boss_pos(), overridden.boss_pos());
    assert_eq!(plain.total_rooms(), overridden.total_rooms());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]
    #[test]
    fn replication_holds_for_arbitrary_seeds_and_floors(
        seed in any::<u64>(),
        floor in 1_u32..=12
    ) {
        let (left, left_draws) = generate_counted(Seed::from_u64(seed), floor);
        let (right, right_draws) = generate_counted(Seed::from_u64(seed), floor);

        prop_assert_eq!(left.canonical_bytes(), right.canonical_bytes());
        prop_assert_eq!(left_draws, right_draws);
        prop_assert_eq!(
            left.minimap_grid().canonical_bytes(),
            right.minimap_grid().canonical_bytes()
        );
    }

    #[test]
    fn exits_never_point_at_visited_rooms_during_a_walk(
        seed in any::<u64>(),
        floor in 1_u32..=8,
        picks in proptest::collection::vec(any::<u8>(), 0..32)
    ) {
        let mut map = generate_floor(Seed::from_u64(seed), floor)
            .expect("generation should succeed");

        for pick in picks {
            let exits = map.available_exits();
            for (_, pos) in &exits {
                let neighbor = map.room_at(*pos).expect("exit target must exist");
                prop_assert!(
                    !neighbor.visited,
                    "seed={}, floor={}: exit into visited room",
                    seed,
                    floor
                );
            }
            let Some((direction, target)) =
                exits.get(usize::from(pick) % exits.len().max(1)).copied()
            else {
                break;
            };
            prop_assert!(map.move_to(direction));
            prop_assert_eq!(map.current_pos(), target);
        }

        prop_assert_eq!(map.width(), grid_width(floor));
    }
}
