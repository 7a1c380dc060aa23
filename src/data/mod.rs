//! Static catalog records: abilities, modifiers, passives and slot limits.

pub mod ability;
pub mod loader;
pub mod modifier;
pub mod passive;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use ability::{
    AbilityDefinition, AbilityKey, DamageElement, DamageProfile, DotEffect, Hit, Mechanic, Resource,
    TargetShape, WEAPON_CATEGORY,
};
pub use modifier::{Modifier, ModifierTarget};
pub use passive::{BonusEffect, BonusEntry, BonusRule, PassiveDefinition, StatType};

/// Slot limits a build must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConstraints {
    pub max_abilities: usize,
    pub max_modifiers: usize,
    pub max_category_lines: usize,
    pub max_weapon_lines: usize,
}

impl Default for BuildConstraints {
    fn default() -> Self {
        Self {
            // Two bars of five, ultimates excluded.
            max_abilities: 10,
            max_modifiers: 3,
            max_category_lines: 3,
            max_weapon_lines: 2,
        }
    }
}

/// Everything the optimizer reads, loaded once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
    #[serde(default)]
    pub passives: Vec<PassiveDefinition>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub constraints: BuildConstraints,
}
