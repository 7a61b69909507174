use anyhow::Result;
use clap::Parser;
use delve_core::{DeterministicRng, FloorMap, Seed};

/// Generate a dungeon floor from a seed and print its projections.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed as an integer or an arbitrary phrase. Omitted: fresh entropy,
    /// printed so the floor can be regenerated on another peer.
    #[arg(short, long)]
    seed: Option<String>,
    /// Floor number; drives grid size and difficulty.
    #[arg(short, long, default_value_t = 1)]
    floor: u32,
    /// Emit machine-readable JSON instead of the terminal views.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = match &args.seed {
        Some(raw) => Seed::parse(raw).map_err(|e| anyhow::anyhow!("invalid seed: {e:?}"))?,
        None => Seed::from_entropy(),
    };

    let mut rng = DeterministicRng::new(seed);
    let map = FloorMap::generate(args.floor, &mut rng)
        .map_err(|e| anyhow::anyhow!("floor generation failed: {e:?}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&floor_summary(&map, seed, rng.draws()))?);
        return Ok(());
    }

    println!("seed {} | floor {} | {}x{} grid | {} rooms | {} draws", seed.value(), map.floor(), map.width(), map.height(), map.total_rooms(), rng.draws());
    println!("fingerprint {:016x}", map.fingerprint());
    println!();
    println!("{}", map.minimap_grid().render());
    println!("{}", map.dump_grid());
    Ok(())
}

fn floor_summary(map: &FloorMap, seed: Seed, draws: u64) -> serde_json::Value {
    let rooms: Vec<serde_json::Value> = map
        .rooms()
        .map(|room| {
            serde_json::json!({
                "x": room.pos.x,
                "y": room.pos.y,
                "kind": format!("{:?}", room.kind),
                "template": room.template,
                "enemies": room.enemies,
                "up": room.connections.up,
                "down": room.connections.down,
                "right": room.connections.right,
            })
        })
        .collect();

    serde_json::json!({
        "seed": seed.value(),
        "floor": map.floor(),
        "width": map.width(),
        "height": map.height(),
        "fingerprint": format!("{:016x}", map.fingerprint()),
        "draws": draws,
        "total_rooms": map.total_rooms(),
        "start": { "x": map.start_pos().x, "y": map.start_pos().y },
        "boss": { "x": map.boss_pos().x, "y": map.boss_pos().y },
        "rooms": rooms,
    })
}
