use anyhow::{Result, bail};
use clap::Parser;
use delve_core::{DeterministicRng, FloorMap, LockstepSession, Seed, SeedAnnouncement};

/// Simulate an authority plus N peers and verify bit-identical replication
/// on every floor: canonical bytes, fingerprints, minimap projections, and
/// RNG draw counts must all agree.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 4)]
    peers: usize,
    #[arg(short, long, default_value_t = 10)]
    floors: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Checking lockstep parity for seed {} across {} peers...", args.seed, args.peers);

    for floor in 1..=args.floors {
        let seed = Seed::from_u64(args.seed);

        let mut authority_rng = DeterministicRng::new(seed);
        let reference = FloorMap::generate(floor, &mut authority_rng)
            .map_err(|e| anyhow::anyhow!("authority generation failed: {e:?}"))?;

        for peer in 0..args.peers {
            let mut peer_rng = DeterministicRng::new(seed);
            let replica = FloorMap::generate(floor, &mut peer_rng)
                .map_err(|e| anyhow::anyhow!("peer {peer} generation failed: {e:?}"))?;

            if replica.canonical_bytes() != reference.canonical_bytes() {
                bail!("floor {floor}: peer {peer} diverged from the authority's room graph");
            }
            if replica.fingerprint() != reference.fingerprint() {
                bail!("floor {floor}: peer {peer} fingerprint mismatch");
            }
            if replica.minimap_grid().canonical_bytes()
                != reference.minimap_grid().canonical_bytes()
            {
                bail!("floor {floor}: peer {peer} minimap projection mismatch");
            }
            if peer_rng.draws() != authority_rng.draws() {
                bail!(
                    "floor {floor}: peer {peer} consumed {} draws, authority {}",
                    peer_rng.draws(),
                    authority_rng.draws()
                );
            }
        }

        // Same agreement must hold through the session layer, provisional
        // peers included.
        let announcement = SeedAnnouncement::new(seed, floor);
        let mut late_peer = LockstepSession::provisional(floor)
            .map_err(|e| anyhow::anyhow!("provisional generation failed: {e:?}"))?;
        late_peer
            .adopt(&announcement)
            .map_err(|e| anyhow::anyhow!("announcement adoption failed: {e:?}"))?;
        if late_peer.fingerprint() != reference.fingerprint() {
            bail!("floor {floor}: adopted session diverged from the authority");
        }

        println!(
            "floor {floor}: {} rooms, {} draws, fingerprint {:016x} — {} peers agree",
            reference.total_rooms(),
            authority_rng.draws(),
            reference.fingerprint(),
            args.peers
        );
    }

    println!("Lockstep parity check completed successfully.");
    Ok(())
}
