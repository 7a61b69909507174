//! Shipped content tables: opaque room-template handles and enemy-type keys
//! with their per-floor selection weights. The floor graph stores these keys
//! but never interprets them; spawn and layout logic downstream does.

use crate::weights::WeightedKey;

pub mod keys {
    pub const TEMPLATE_STONE_HALL: &str = "template_stone_hall";
    pub const TEMPLATE_COLLAPSED_GALLERY: &str = "template_collapsed_gallery";
    pub const TEMPLATE_FLOODED_CELLS: &str = "template_flooded_cells";
    pub const TEMPLATE_FUNGAL_GROTTO: &str = "template_fungal_grotto";
    pub const TEMPLATE_BONE_OSSUARY: &str = "template_bone_ossuary";

    pub const ENEMY_RUST_RAT: &str = "enemy_rust_rat";
    pub const ENEMY_GRAVE_SPIDER: &str = "enemy_grave_spider";
    pub const ENEMY_HOLLOW_SENTRY: &str = "enemy_hollow_sentry";
    pub const ENEMY_PLAGUE_ACOLYTE: &str = "enemy_plague_acolyte";
    pub const ENEMY_MARROW_GOLEM: &str = "enemy_marrow_golem";
    pub const ENEMY_VOID_WRAITH: &str = "enemy_void_wraith";
}

/// Room-template pool. Variety is mostly cosmetic, so weights stay flat; the
/// two showpiece templates are held back from the first floors.
pub const TEMPLATE_WEIGHTS: &[WeightedKey] = &[
    WeightedKey::flat(keys::TEMPLATE_STONE_HALL, 30),
    WeightedKey::flat(keys::TEMPLATE_COLLAPSED_GALLERY, 25),
    WeightedKey::flat(keys::TEMPLATE_FLOODED_CELLS, 20),
    WeightedKey::ramped(keys::TEMPLATE_FUNGAL_GROTTO, 15, 2, 0),
    WeightedKey::ramped(keys::TEMPLATE_BONE_OSSUARY, 10, 3, 0),
];

/// Enemy pool. Early floors lean on fodder; tougher types unlock with depth
/// and ramp so deep floors skew dangerous.
pub const ENEMY_WEIGHTS: &[WeightedKey] = &[
    WeightedKey::flat(keys::ENEMY_RUST_RAT, 40),
    WeightedKey::flat(keys::ENEMY_GRAVE_SPIDER, 30),
    WeightedKey::ramped(keys::ENEMY_HOLLOW_SENTRY, 20, 2, 5),
    WeightedKey::ramped(keys::ENEMY_PLAGUE_ACOLYTE, 12, 3, 6),
    WeightedKey::ramped(keys::ENEMY_MARROW_GOLEM, 8, 4, 8),
    WeightedKey::ramped(keys::ENEMY_VOID_WRAITH, 4, 5, 10),
];

/// Resolve an announced template name against the shipped pool.
pub fn template_key(name: &str) -> Option<&'static str> {
    TEMPLATE_WEIGHTS.iter().map(|entry| entry.key).find(|key| *key == name)
}
