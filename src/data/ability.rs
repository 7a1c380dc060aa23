use serde::{Deserialize, Serialize};

/// Category name shared by all weapon lines; every other category is a class.
pub const WEAPON_CATEGORY: &str = "weapon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetShape {
    Single,
    Aoe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Magicka,
    Stamina,
    Health,
    Ultimate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageElement {
    Physical,
    Magic,
    Fire,
    Frost,
    Shock,
    Poison,
    Disease,
    Bleed,
    Oblivion,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanic {
    Channeled,
    Dot,
    Instant,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub value: f64,
    #[serde(default)]
    pub delay: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotEffect {
    pub value: f64,
    pub duration: f64,
    /// Seconds between ticks; a single tick over the full duration when absent.
    #[serde(default)]
    pub interval: Option<f64>,
    /// Fractional growth per tick, applied to `value`.
    #[serde(default)]
    pub increase_per_tick: Option<f64>,
    #[serde(default)]
    pub flat_increase_per_tick: Option<f64>,
    #[serde(default)]
    pub delay: Option<f64>,
    #[serde(default)]
    pub ignores_modifier: bool,
}

impl DotEffect {
    pub fn tick_interval(&self) -> f64 {
        match self.interval {
            Some(interval) if interval > 0.0 => interval,
            _ => self.duration,
        }
    }

    pub fn tick_count(&self) -> u32 {
        let interval = self.tick_interval();
        if interval <= 0.0 || self.duration <= 0.0 {
            return 0;
        }
        (self.duration / interval).floor() as u32
    }

    /// Raw value of tick `index` (0-based), before modifiers.
    pub fn tick_value(&self, index: u32) -> f64 {
        let i = f64::from(index);
        self.value * (1.0 + i * self.increase_per_tick.unwrap_or(0.0))
            + i * self.flat_increase_per_tick.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageProfile {
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default)]
    pub dots: Vec<DotEffect>,
}

impl DamageProfile {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.dots.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub name: String,
    /// Shared by every morph of the same ability; at most one per build.
    pub base_ability: String,
    pub category: String,
    pub line: String,
    #[serde(default)]
    pub damage: DamageProfile,
    pub element: DamageElement,
    pub target: TargetShape,
    pub resource: Resource,
    #[serde(default)]
    pub channel_time: Option<f64>,
}

/// Identifies one ability across catalog copies; names alone may repeat between lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityKey {
    pub name: String,
    pub base_ability: String,
    pub line: String,
}

impl AbilityDefinition {
    pub fn key(&self) -> AbilityKey {
        AbilityKey {
            name: self.name.clone(),
            base_ability: self.base_ability.clone(),
            line: self.line.clone(),
        }
    }

    pub fn matches_key(&self, key: &AbilityKey) -> bool {
        self.name == key.name && self.base_ability == key.base_ability && self.line == key.line
    }

    /// True for the un-morphed version of an ability.
    pub fn is_base(&self) -> bool {
        self.name == self.base_ability
    }

    pub fn is_ultimate(&self) -> bool {
        self.resource == Resource::Ultimate
    }

    pub fn is_weapon(&self) -> bool {
        self.category == WEAPON_CATEGORY
    }

    pub fn mechanic(&self) -> Mechanic {
        if self.channel_time.is_some() {
            Mechanic::Channeled
        } else if !self.damage.dots.is_empty() {
            Mechanic::Dot
        } else if self.damage.hits.iter().any(|hit| hit.value != 0.0) {
            Mechanic::Instant
        } else {
            Mechanic::Unknown
        }
    }

    /// Active time in seconds: longest DoT (including its delay), else channel time.
    pub fn duration(&self) -> f64 {
        let longest_dot = self
            .damage
            .dots
            .iter()
            .map(|dot| dot.duration + dot.delay.unwrap_or(0.0))
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))));
        longest_dot.or(self.channel_time).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ability(damage: DamageProfile, channel_time: Option<f64>) -> AbilityDefinition {
        AbilityDefinition {
            name: "Crystal Fragments".to_string(),
            base_ability: "Crystal Shard".to_string(),
            category: "sorcerer".to_string(),
            line: "dark-magic".to_string(),
            damage,
            element: DamageElement::Magic,
            target: TargetShape::Single,
            resource: Resource::Magicka,
            channel_time,
        }
    }

    fn dot(duration: f64, delay: Option<f64>) -> DotEffect {
        DotEffect {
            value: 10.0,
            duration,
            interval: None,
            increase_per_tick: None,
            flat_increase_per_tick: None,
            delay,
            ignores_modifier: false,
        }
    }

    #[test]
    fn mechanic_prefers_channel_then_dot_then_instant() {
        let hit = Hit { value: 5.0, delay: None };
        let channeled = ability(
            DamageProfile { hits: vec![hit.clone()], dots: vec![dot(4.0, None)] },
            Some(2.0),
        );
        assert_eq!(channeled.mechanic(), Mechanic::Channeled);

        let dotted = ability(
            DamageProfile { hits: vec![hit.clone()], dots: vec![dot(4.0, None)] },
            None,
        );
        assert_eq!(dotted.mechanic(), Mechanic::Dot);

        let instant = ability(DamageProfile { hits: vec![hit], dots: vec![] }, None);
        assert_eq!(instant.mechanic(), Mechanic::Instant);

        let zero = ability(
            DamageProfile { hits: vec![Hit { value: 0.0, delay: None }], dots: vec![] },
            None,
        );
        assert_eq!(zero.mechanic(), Mechanic::Unknown);
    }

    #[test]
    fn duration_uses_longest_delayed_dot() {
        let a = ability(
            DamageProfile { hits: vec![], dots: vec![dot(10.0, Some(1.0)), dot(8.0, Some(4.0))] },
            Some(3.0),
        );
        assert_eq!(a.duration(), 12.0);
    }

    #[test]
    fn duration_falls_back_to_channel_then_zero() {
        assert_eq!(ability(DamageProfile::default(), Some(3.0)).duration(), 3.0);
        assert_eq!(ability(DamageProfile::default(), None).duration(), 0.0);
    }

    #[test]
    fn missing_interval_means_one_tick() {
        let d = dot(10.0, None);
        assert_eq!(d.tick_count(), 1);
        assert_eq!(d.tick_interval(), 10.0);
    }

    #[test]
    fn ticks_escalate_by_percentage_and_flat_amount() {
        let d = DotEffect {
            increase_per_tick: Some(0.5),
            flat_increase_per_tick: Some(2.0),
            interval: Some(1.0),
            ..dot(3.0, None)
        };
        assert_eq!(d.tick_count(), 3);
        assert_eq!(d.tick_value(0), 10.0);
        assert_eq!(d.tick_value(2), 10.0 * 2.0 + 4.0);
    }

    #[test]
    fn deserializes_unknown_resource_as_other() {
        let r: Resource = serde_json::from_str("\"werewolf\"").expect("resource");
        assert_eq!(r, Resource::Other);
    }
}
