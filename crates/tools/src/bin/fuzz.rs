use anyhow::Result;
use clap::Parser;
use delve_core::{Direction, Seed, generate_floor};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Random forward exploration across many generated floors, asserting the
/// navigation invariants at every step.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Starting navigation fuzz on seed {} for {} runs...", args.seed, args.runs);

    let mut driver = ChaCha8Rng::seed_from_u64(args.seed);
    for run in 0..args.runs {
        let floor_seed = Seed::from_u64(driver.next_u64());
        let floor = 1 + (driver.next_u64() % 10) as u32;
        let mut map = generate_floor(floor_seed, floor)
            .map_err(|e| anyhow::anyhow!("run {run}: generation failed: {e:?}"))?;

        loop {
            let exits = map.available_exits();
            for (direction, pos) in &exits {
                let neighbor = map.room_at(*pos).expect("fuzz: exit target must exist");
                assert!(!neighbor.visited, "run {run}: exit offered into a visited room");
                assert!(
                    map.current_room().connections.allows(*direction),
                    "run {run}: exit offered without a declared connection"
                );
            }

            // Probe a blocked direction before moving on; it must be a no-op.
            let blocked = Direction::ALL
                .into_iter()
                .find(|direction| !map.current_room().connections.allows(*direction));
            if let Some(direction) = blocked {
                let cursor_before = map.current_pos();
                let visited_before = map.visited_count();
                assert!(!map.move_to(direction), "run {run}: blocked move succeeded");
                assert_eq!(map.current_pos(), cursor_before);
                assert_eq!(map.visited_count(), visited_before);
            }

            let Some(&(direction, target)) =
                exits.get(driver.next_u64() as usize % exits.len().max(1))
            else {
                break;
            };
            let visited_before = map.visited_count();
            assert!(map.move_to(direction), "run {run}: offered exit was not traversable");
            assert_eq!(map.current_pos(), target);
            assert_eq!(map.visited_count(), visited_before + 1);
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
