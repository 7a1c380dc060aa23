use serde::{Deserialize, Serialize};

/// When a passive bonus entry counts toward a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusRule {
    OnceIfLinePresent,
    OnceIfSlotted,
    PerSlottedAbility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    CriticalChance,
    CriticalDamage,
    DamageDone,
    Duration,
    MaxResource,
    #[serde(other)]
    Other,
}

/// Either a stat bump (`{stat: critical_chance, value: 0.02}`) or a named buff
/// (`{buff: minor-berserk}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BonusEffect {
    Stat { stat: StatType, value: f64 },
    Buff { buff: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub rule: BonusRule,
    pub effect: BonusEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveDefinition {
    pub name: String,
    pub line: String,
    #[serde(default)]
    pub bonuses: Vec<BonusEntry>,
}
