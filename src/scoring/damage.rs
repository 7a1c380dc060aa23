//! Damage per activation cycle for a single ability.
//!
//! Hits scale with `direct` modifiers, DoT ticks with `dot` modifiers, and both
//! with the modifiers matching the ability's target shape. Critical and
//! off-balance modifiers are carried but never scale a hit here.

use crate::data::{AbilityDefinition, DotEffect, Modifier, ModifierTarget};
use crate::scoring::stacking::ModifierStacking;

pub fn score<'a, I>(ability: &AbilityDefinition, modifiers: I) -> f64
where
    I: IntoIterator<Item = &'a Modifier>,
{
    score_with_stacking(ability, &ModifierStacking::from_modifiers(modifiers))
}

/// Same as [score] with modifier sums already aggregated.
pub fn score_with_stacking(ability: &AbilityDefinition, stacking: &ModifierStacking) -> f64 {
    let shape = ModifierTarget::from(ability.target);

    let direct = stacking.multiplier(&[ModifierTarget::Direct, shape]);
    let hits: f64 = ability
        .damage
        .hits
        .iter()
        .map(|hit| hit.value * direct)
        .sum();

    let dot_multiplier = stacking.multiplier(&[ModifierTarget::Dot, shape]);
    let dots: f64 = ability
        .damage
        .dots
        .iter()
        .map(|dot| dot_damage(dot, dot_multiplier))
        .sum();

    hits + dots
}

fn dot_damage(dot: &DotEffect, multiplier: f64) -> f64 {
    let multiplier = if dot.ignores_modifier { 1.0 } else { multiplier };
    (0..dot.tick_count())
        .map(|tick| dot.tick_value(tick) * multiplier)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DamageElement, DamageProfile, Hit, Resource, TargetShape};

    fn ability(target: TargetShape, hits: &[f64], dots: Vec<DotEffect>) -> AbilityDefinition {
        AbilityDefinition {
            name: "Puncturing Sweeps".to_string(),
            base_ability: "Puncture".to_string(),
            category: "templar".to_string(),
            line: "aedric-spear".to_string(),
            damage: DamageProfile {
                hits: hits.iter().map(|&value| Hit { value, delay: None }).collect(),
                dots,
            },
            element: DamageElement::Magic,
            target,
            resource: Resource::Magicka,
            channel_time: None,
        }
    }

    fn dot(value: f64, duration: f64, interval: Option<f64>) -> DotEffect {
        DotEffect {
            value,
            duration,
            interval,
            increase_per_tick: None,
            flat_increase_per_tick: None,
            delay: None,
            ignores_modifier: false,
        }
    }

    fn modifier(value: f64, max_level: u32, affects: ModifierTarget) -> Modifier {
        Modifier {
            name: "m".to_string(),
            value,
            max_level,
            affects,
        }
    }

    #[test]
    fn hits_sum_and_scale_with_direct_and_shape_modifiers() {
        let a = ability(TargetShape::Aoe, &[100.0, 200.0], vec![]);
        let mods = [
            modifier(0.1, 1, ModifierTarget::Direct),
            modifier(0.2, 1, ModifierTarget::Aoe),
            modifier(0.5, 1, ModifierTarget::Dot),
            modifier(0.5, 1, ModifierTarget::Critical),
        ];
        assert!((score(&a, &mods) - 390.0).abs() < 1e-9);
    }

    #[test]
    fn dot_ticks_scale_with_dot_and_shape_modifiers() {
        let a = ability(TargetShape::Single, &[], vec![dot(100.0, 10.0, Some(5.0))]);
        let mods = [
            modifier(0.1, 1, ModifierTarget::Dot),
            modifier(0.1, 1, ModifierTarget::Single),
            modifier(1.0, 1, ModifierTarget::Direct),
        ];
        assert!((score(&a, &mods) - 240.0).abs() < 1e-9);
    }

    #[test]
    fn ignoring_dot_uses_raw_ticks() {
        let mut d = dot(100.0, 10.0, Some(5.0));
        d.ignores_modifier = true;
        let a = ability(TargetShape::Single, &[], vec![d]);
        let mods = [modifier(0.5, 2, ModifierTarget::Dot)];
        assert_eq!(score(&a, &mods), 200.0);
    }

    #[test]
    fn escalating_dot_sums_every_tick() {
        let d = DotEffect {
            increase_per_tick: Some(0.1),
            flat_increase_per_tick: Some(5.0),
            ..dot(100.0, 4.0, Some(1.0))
        };
        let a = ability(TargetShape::Single, &[], vec![d]);
        // 100, 115, 130, 145
        assert!((score(&a, &[]) - 490.0).abs() < 1e-9);
    }

    #[test]
    fn empty_profile_scores_exactly_zero() {
        let a = ability(TargetShape::Single, &[], vec![]);
        assert_eq!(score(&a, &[modifier(0.3, 3, ModifierTarget::Direct)]), 0.0);
    }
}
