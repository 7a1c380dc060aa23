//! Expected damage uplift from passives, given how many abilities each line has slotted.

use crate::config::ScoringSettings;
use crate::data::{BonusEffect, BonusEntry, BonusRule, PassiveDefinition, StatType};

/// Slotted ability count per line for one build. Small, so a flat list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCounts<'a> {
    counts: Vec<(&'a str, u32)>,
}

impl<'a> LineCounts<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::new();
        for line in lines {
            counts.increment(line);
        }
        counts
    }

    pub fn increment(&mut self, line: &'a str) {
        match self.counts.iter_mut().find(|(l, _)| *l == line) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((line, 1)),
        }
    }

    pub fn get(&self, line: &str) -> u32 {
        self.counts
            .iter()
            .find(|(l, _)| *l == line)
            .map_or(0, |(_, count)| *count)
    }
}

/// Sum of expected damage fractions granted by `passives`.
pub fn passive_uplift<'p, I>(passives: I, counts: &LineCounts<'_>, settings: &ScoringSettings) -> f64
where
    I: IntoIterator<Item = &'p PassiveDefinition>,
{
    passives
        .into_iter()
        .map(|passive| {
            let count = counts.get(&passive.line);
            passive
                .bonuses
                .iter()
                .map(|entry| entry_uplift(entry, count, settings))
                .sum::<f64>()
        })
        .sum()
}

fn entry_uplift(entry: &BonusEntry, count: u32, settings: &ScoringSettings) -> f64 {
    if count == 0 {
        return 0.0;
    }
    match &entry.effect {
        BonusEffect::Buff { buff } => match settings.buffs.get(buff) {
            Some(value) => *value,
            None => {
                tracing::trace!(buff = %buff, "no expected value for buff");
                0.0
            }
        },
        BonusEffect::Stat { stat, value } => {
            let applied = match entry.rule {
                BonusRule::OnceIfLinePresent | BonusRule::OnceIfSlotted => *value,
                BonusRule::PerSlottedAbility => *value * f64::from(count),
            };
            stat_to_damage(*stat, applied, settings)
        }
    }
}

/// Converts a stat bump into an expected damage fraction.
pub fn stat_to_damage(stat: StatType, value: f64, settings: &ScoringSettings) -> f64 {
    match stat {
        StatType::CriticalChance => value * (1.0 + settings.baseline_crit_damage),
        StatType::CriticalDamage => settings.baseline_crit_chance * value,
        StatType::DamageDone => value,
        StatType::Duration | StatType::MaxResource | StatType::Other => 0.0,
    }
}
