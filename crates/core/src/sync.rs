//! Lockstep seed replication: the authority ships a seed announcement and
//! every peer regenerates the floor locally. No room graph, template, or
//! enemy pool ever crosses the wire — only the seed and the one-shot choices
//! fixed before the deterministic stream starts.

use serde::{Deserialize, Serialize};

use crate::content;
use crate::floor::{FloorMap, GenerationOverrides};
use crate::rng::DeterministicRng;
use crate::seed::Seed;
use crate::types::GenerationError;

/// Everything the authority transmits before trusted generation begins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAnnouncement {
    pub seed: Seed,
    pub floor: u32,
    /// Pre-seed one-shot choice: the start room's template, picked by the
    /// authority ahead of the stream. Carried by name so the wire shape does
    /// not depend on compiled-in key identity.
    pub first_template: Option<String>,
}

impl SeedAnnouncement {
    pub fn new(seed: Seed, floor: u32) -> Self {
        Self { seed, floor, first_template: None }
    }
}

/// Observable session history, recorded as values for the embedding game
/// loop to surface; the core itself never prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    ProvisionalGenerated { floor: u32 },
    ProvisionalDiscarded,
    AuthoritativeAdopted { floor: u32, fingerprint: u64 },
    UnknownFirstTemplate { name: String },
}

/// One peer's view of the current floor plus where its seed came from.
///
/// A peer whose clock runs ahead of the authoritative announcement may hold
/// a provisional floor built from local entropy; `adopt` discards it wholly
/// and regenerates. Cross-peer consistency comes entirely from identical
/// inputs and algorithms — sessions share no state.
pub struct LockstepSession {
    map: FloorMap,
    authoritative: bool,
    events: Vec<SyncEvent>,
}

impl LockstepSession {
    /// Placeholder floor from local entropy. Must never produce
    /// gameplay-visible, unrecoverable effects before `adopt` replaces it.
    pub fn provisional(floor: u32) -> Result<Self, GenerationError> {
        let mut rng = DeterministicRng::new(Seed::from_entropy());
        let map = FloorMap::generate(floor, &mut rng)?;
        Ok(Self {
            map,
            authoritative: false,
            events: vec![SyncEvent::ProvisionalGenerated { floor }],
        })
    }

    /// Peer that waited for the announcement before generating anything.
    pub fn from_announcement(announcement: &SeedAnnouncement) -> Result<Self, GenerationError> {
        let mut events = Vec::new();
        let map = generate_from_announcement(announcement, &mut events)?;
        events.push(SyncEvent::AuthoritativeAdopted {
            floor: announcement.floor,
            fingerprint: map.fingerprint(),
        });
        Ok(Self { map, authoritative: true, events })
    }

    /// Regenerate from the authority's announcement, discarding any
    /// provisional floor entirely. The only recovery path for a provisional
    /// map is exactly this full regeneration.
    pub fn adopt(&mut self, announcement: &SeedAnnouncement) -> Result<(), GenerationError> {
        let map = generate_from_announcement(announcement, &mut self.events)?;
        if !self.authoritative {
            self.events.push(SyncEvent::ProvisionalDiscarded);
        }
        self.map = map;
        self.authoritative = true;
        self.events.push(SyncEvent::AuthoritativeAdopted {
            floor: announcement.floor,
            fingerprint: self.map.fingerprint(),
        });
        Ok(())
    }

    pub fn map(&self) -> &FloorMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut FloorMap {
        &mut self.map
    }

    pub fn fingerprint(&self) -> u64 {
        self.map.fingerprint()
    }

    /// Only authoritative floors may be trusted for gameplay.
    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }
}

fn generate_from_announcement(
    announcement: &SeedAnnouncement,
    events: &mut Vec<SyncEvent>,
) -> Result<FloorMap, GenerationError> {
    let mut overrides = GenerationOverrides::default();
    if let Some(name) = &announcement.first_template {
        match content::template_key(name) {
            Some(key) => overrides.first_template = Some(key),
            None => events.push(SyncEvent::UnknownFirstTemplate { name: name.clone() }),
        }
    }
    let mut rng = DeterministicRng::new(announcement.seed);
    FloorMap::generate_with_overrides(announcement.floor, &mut rng, &overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;

    #[test]
    fn peers_adopting_the_same_announcement_agree_exactly() {
        let announcement = SeedAnnouncement::new(Seed::from_u64(31_337), 3);

        let host = LockstepSession::from_announcement(&announcement)
            .expect("authoritative generation should succeed");
        let remote = LockstepSession::from_announcement(&announcement)
            .expect("authoritative generation should succeed");

        assert_eq!(host.fingerprint(), remote.fingerprint());
        assert_eq!(host.map().canonical_bytes(), remote.map().canonical_bytes());
    }

    #[test]
    fn adopt_discards_the_provisional_floor() {
        let announcement = SeedAnnouncement::new(Seed::from_u64(2_024), 2);
        let reference = LockstepSession::from_announcement(&announcement)
            .expect("authoritative generation should succeed");

        let mut peer = LockstepSession::provisional(2).expect("provisional generation succeeds");
        assert!(!peer.is_authoritative());

        peer.adopt(&announcement).expect("adoption should succeed");
        assert!(peer.is_authoritative());
        assert_eq!(peer.fingerprint(), reference.fingerprint());
        assert!(peer.events().contains(&SyncEvent::ProvisionalDiscarded));
    }

    #[test]
    fn announced_first_template_lands_on_every_peer_identically() {
        let mut announcement = SeedAnnouncement::new(Seed::from_u64(808), 4);
        announcement.first_template = Some(keys::TEMPLATE_FLOODED_CELLS.to_string());

        let host = LockstepSession::from_announcement(&announcement)
            .expect("authoritative generation should succeed");
        let remote = LockstepSession::from_announcement(&announcement)
            .expect("authoritative generation should succeed");

        let start = host.map().start_pos();
        let host_start = host.map().room_at(start).expect("start room exists");
        assert_eq!(host_start.template, Some(keys::TEMPLATE_FLOODED_CELLS));
        assert_eq!(host.fingerprint(), remote.fingerprint());
    }

    #[test]
    fn unknown_announced_template_is_ignored_with_an_event() {
        let mut announcement = SeedAnnouncement::new(Seed::from_u64(99), 2);
        announcement.first_template = Some("template_gilded_vault".to_string());

        let mut peer = LockstepSession::provisional(2).expect("provisional generation succeeds");
        peer.adopt(&announcement).expect("adoption should succeed");

        assert!(
            peer.events()
                .iter()
                .any(|event| matches!(event, SyncEvent::UnknownFirstTemplate { name } if name == "template_gilded_vault"))
        );
        // The floor still matches a peer that never saw the bogus name.
        let reference =
            LockstepSession::from_announcement(&SeedAnnouncement::new(Seed::from_u64(99), 2))
                .expect("authoritative generation should succeed");
        assert_eq!(peer.fingerprint(), reference.fingerprint());
    }

    #[test]
    fn announcement_round_trips_through_json() {
        let mut announcement = SeedAnnouncement::new(Seed::from_u64(7_777), 5);
        announcement.first_template = Some(keys::TEMPLATE_STONE_HALL.to_string());

        let encoded = serde_json::to_string(&announcement).expect("announcement serializes");
        let decoded: SeedAnnouncement =
            serde_json::from_str(&encoded).expect("announcement deserializes");
        assert_eq!(decoded, announcement);
    }
}
