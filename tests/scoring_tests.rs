use skillforge::config::ScoringSettings;
use skillforge::data::{
    AbilityDefinition, BonusEffect, BonusEntry, BonusRule, BuildConstraints, DamageElement,
    DamageProfile, DotEffect, Hit, Modifier, ModifierTarget, PassiveDefinition, Resource,
    StatType, TargetShape,
};
use skillforge::optimizer::build::Build;
use skillforge::scoring::{passive_uplift, score, LineCounts};

fn ability(target: TargetShape, damage: DamageProfile) -> AbilityDefinition {
    AbilityDefinition {
        name: "Rapid Strikes".to_string(),
        base_ability: "Flurry".to_string(),
        category: "weapon".to_string(),
        line: "dual-wield".to_string(),
        damage,
        element: DamageElement::Physical,
        target,
        resource: Resource::Stamina,
        channel_time: None,
    }
}

fn single_hit(value: f64) -> AbilityDefinition {
    ability(
        TargetShape::Single,
        DamageProfile {
            hits: vec![Hit { value, delay: None }],
            dots: vec![],
        },
    )
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
        name: format!("{affects:?} x{max_level}"),
        value,
        max_level,
        affects,
    }
}

#[test]
fn off_shape_modifier_leaves_hit_unchanged() {
    let hit = single_hit(1000.0);
    let aoe = modifier(0.1, 1, ModifierTarget::Aoe);
    assert_eq!(score(&hit, [&aoe]), 1000.0);
}

#[test]
fn direct_modifier_stacks_to_max_level() {
    let hit = single_hit(1000.0);
    let aoe = modifier(0.1, 1, ModifierTarget::Aoe);
    let direct = modifier(0.05, 2, ModifierTarget::Direct);
    assert!((score(&hit, [&aoe, &direct]) - 1100.0).abs() < 1e-9);
}

#[test]
fn dot_ticks_follow_interval_or_fall_back_to_one_tick() {
    let ticking = ability(
        TargetShape::Single,
        DamageProfile {
            hits: vec![],
            dots: vec![dot(100.0, 10.0, Some(5.0))],
        },
    );
    assert_eq!(score(&ticking, []), 200.0);

    let single_tick = ability(
        TargetShape::Single,
        DamageProfile {
            hits: vec![],
            dots: vec![dot(100.0, 10.0, None)],
        },
    );
    assert_eq!(score(&single_tick, []), 100.0);
}

#[test]
fn growing_dot_uses_per_tick_increase() {
    let mut growing = dot(100.0, 3.0, Some(1.0));
    growing.increase_per_tick = Some(0.5);
    growing.flat_increase_per_tick = Some(10.0);
    let ability = ability(
        TargetShape::Aoe,
        DamageProfile {
            hits: vec![],
            dots: vec![growing],
        },
    );
    // Ticks: 100, 150 + 10, 200 + 20.
    assert!((score(&ability, []) - 480.0).abs() < 1e-9);
}

#[test]
fn modifier_exempt_dot_ignores_matching_modifiers() {
    let mut raw = dot(100.0, 2.0, Some(1.0));
    raw.ignores_modifier = true;
    let ability = ability(
        TargetShape::Single,
        DamageProfile {
            hits: vec![Hit { value: 50.0, delay: None }],
            dots: vec![raw],
        },
    );
    let dot_mod = modifier(0.5, 1, ModifierTarget::Dot);
    assert_eq!(score(&ability, [&dot_mod]), 250.0);
}

#[test]
fn score_never_decreases_with_matching_modifiers() {
    let ability = ability(
        TargetShape::Aoe,
        DamageProfile {
            hits: vec![Hit { value: 800.0, delay: None }],
            dots: vec![dot(120.0, 8.0, Some(2.0))],
        },
    );
    let mut modifiers: Vec<Modifier> = Vec::new();
    let mut last = score(&ability, &modifiers);
    for (value, affects) in [
        (0.1, ModifierTarget::Direct),
        (0.0, ModifierTarget::Dot),
        (0.2, ModifierTarget::Aoe),
        (0.3, ModifierTarget::Critical),
        (0.15, ModifierTarget::Dot),
    ] {
        modifiers.push(modifier(value, 1, affects));
        let next = score(&ability, &modifiers);
        assert!(next >= last, "{next} < {last} after adding {affects:?}");
        last = next;
    }
}

#[test]
fn stat_and_buff_passives_convert_to_damage_fractions() {
    let settings = ScoringSettings::default();
    let passives = [
        PassiveDefinition {
            name: "Expert Mage".to_string(),
            line: "storm-calling".to_string(),
            bonuses: vec![BonusEntry {
                rule: BonusRule::PerSlottedAbility,
                effect: BonusEffect::Stat {
                    stat: StatType::CriticalChance,
                    value: 0.02,
                },
            }],
        },
        PassiveDefinition {
            name: "Exploitation".to_string(),
            line: "dark-magic".to_string(),
            bonuses: vec![BonusEntry {
                rule: BonusRule::OnceIfSlotted,
                effect: BonusEffect::Buff {
                    buff: "major-berserk".to_string(),
                },
            }],
        },
        PassiveDefinition {
            name: "Unused".to_string(),
            line: "daedric-summoning".to_string(),
            bonuses: vec![BonusEntry {
                rule: BonusRule::OnceIfLinePresent,
                effect: BonusEffect::Stat {
                    stat: StatType::DamageDone,
                    value: 1.0,
                },
            }],
        },
    ];
    let counts = LineCounts::from_lines(["storm-calling", "storm-calling", "dark-magic"]);
    let uplift = passive_uplift(&passives, &counts, &settings);
    // 2 abilities * 0.02 * (1 + 0.5) + 0.10
    assert!((uplift - (0.06 + 0.10)).abs() < 1e-12);
}

#[test]
fn build_total_is_sum_of_cached_ability_scores() {
    let settings = ScoringSettings::default();
    let first = single_hit(1000.0);
    let mut second = single_hit(400.0);
    second.name = "Whirling Blades".to_string();
    second.base_ability = "Whirlwind".to_string();
    let passive = PassiveDefinition {
        name: "Twin Blade and Blunt".to_string(),
        line: "dual-wield".to_string(),
        bonuses: vec![BonusEntry {
            rule: BonusRule::PerSlottedAbility,
            effect: BonusEffect::Stat {
                stat: StatType::DamageDone,
                value: 0.05,
            },
        }],
    };
    let direct = modifier(0.1, 1, ModifierTarget::Direct);
    let build = Build::new(
        vec![&first, &second],
        vec![&direct],
        &[&passive],
        &BuildConstraints::default(),
        &settings,
    )
    .expect("valid build");

    let expected = (1000.0 + 400.0) * 1.1 * 1.1;
    assert!((build.total_score() - expected).abs() < 1e-9);
    assert_eq!(build.total_score(), build.ability_scores().iter().sum::<f64>());
}
