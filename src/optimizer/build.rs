//! The build aggregate: one constraint-checked selection with its score cached.

use serde::{Deserialize, Serialize};

use crate::catalog::AbilityCatalog;
use crate::config::ScoringSettings;
use crate::data::{AbilityDefinition, AbilityKey, BuildConstraints, Modifier, PassiveDefinition};
use crate::error::BuildError;
use crate::scoring::{passive_uplift, score_with_stacking, LineCounts, ModifierStacking};

/// A validated selection of abilities, modifiers and passives.
///
/// Scoring happens once, in the constructor; nothing mutates a build afterwards.
#[derive(Debug, Clone)]
pub struct Build<'a> {
    abilities: Vec<&'a AbilityDefinition>,
    modifiers: Vec<&'a Modifier>,
    passives: Vec<&'a PassiveDefinition>,
    category_lines: Vec<&'a str>,
    weapon_lines: Vec<&'a str>,
    ability_scores: Vec<f64>,
    passive_uplift: f64,
    total_score: f64,
}

/// Plain-data view of a build, safe to send between threads or print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub abilities: Vec<String>,
    /// Full identity of each entry in `abilities`, same order.
    pub ability_keys: Vec<AbilityKey>,
    pub modifiers: Vec<String>,
    pub passives: Vec<String>,
    pub category_lines: Vec<String>,
    pub weapon_lines: Vec<String>,
    pub total_score: f64,
}

impl<'a> Build<'a> {
    /// Builds from an explicit passive set.
    pub fn new(
        abilities: Vec<&'a AbilityDefinition>,
        modifiers: Vec<&'a Modifier>,
        passives: &[&'a PassiveDefinition],
        constraints: &BuildConstraints,
        scoring: &ScoringSettings,
    ) -> Result<Self, BuildError> {
        let stacking = ModifierStacking::from_modifiers(modifiers.iter().copied());
        Self::with_stacking(abilities, modifiers, &stacking, passives, constraints, scoring)
    }

    /// Like [Build::new], reusing a stacking table already summed for `modifiers`.
    pub fn with_stacking(
        abilities: Vec<&'a AbilityDefinition>,
        modifiers: Vec<&'a Modifier>,
        stacking: &ModifierStacking,
        passives: &[&'a PassiveDefinition],
        constraints: &BuildConstraints,
        scoring: &ScoringSettings,
    ) -> Result<Self, BuildError> {
        let mut category_lines: Vec<&'a str> = Vec::new();
        let mut weapon_lines: Vec<&'a str> = Vec::new();
        for ability in &abilities {
            let lines = if ability.is_weapon() {
                &mut weapon_lines
            } else {
                &mut category_lines
            };
            if !lines.contains(&ability.line.as_str()) {
                lines.push(&ability.line);
            }
        }

        validate(&abilities, &modifiers, &category_lines, &weapon_lines, constraints)?;

        let counts = LineCounts::from_lines(abilities.iter().map(|a| a.line.as_str()));
        let uplift = passive_uplift(passives.iter().copied(), &counts, scoring);
        let ability_scores: Vec<f64> = abilities
            .iter()
            .map(|ability| score_with_stacking(ability, stacking) * (1.0 + uplift))
            .collect();
        let total_score = ability_scores.iter().sum();

        Ok(Self {
            abilities,
            modifiers,
            passives: passives.to_vec(),
            category_lines,
            weapon_lines,
            ability_scores,
            passive_uplift: uplift,
            total_score,
        })
    }

    /// Builds with the passives of every line the abilities come from.
    pub fn with_implied_passives(
        abilities: Vec<&'a AbilityDefinition>,
        modifiers: Vec<&'a Modifier>,
        catalog: &'a AbilityCatalog,
        constraints: &BuildConstraints,
        scoring: &ScoringSettings,
    ) -> Result<Self, BuildError> {
        let mut lines: Vec<&str> = abilities.iter().map(|a| a.line.as_str()).collect();
        lines.dedup();
        let passives = catalog.passives_for_lines(&lines);
        Self::new(abilities, modifiers, &passives, constraints, scoring)
    }

    pub fn abilities(&self) -> &[&'a AbilityDefinition] {
        &self.abilities
    }

    pub fn modifiers(&self) -> &[&'a Modifier] {
        &self.modifiers
    }

    pub fn passives(&self) -> &[&'a PassiveDefinition] {
        &self.passives
    }

    pub fn category_lines(&self) -> &[&'a str] {
        &self.category_lines
    }

    pub fn weapon_lines(&self) -> &[&'a str] {
        &self.weapon_lines
    }

    /// Score per ability, parallel to [Build::abilities].
    pub fn ability_scores(&self) -> &[f64] {
        &self.ability_scores
    }

    pub fn passive_uplift(&self) -> f64 {
        self.passive_uplift
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Strictly higher total than `other`, or than zero when there is no other build.
    pub fn is_better_than(&self, other: Option<&Build<'_>>) -> bool {
        self.total_score > other.map_or(0.0, Build::total_score)
    }

    pub fn summary(&self) -> BuildSummary {
        BuildSummary {
            abilities: self.abilities.iter().map(|a| a.name.clone()).collect(),
            ability_keys: self.abilities.iter().map(|a| a.key()).collect(),
            modifiers: self.modifiers.iter().map(|m| m.name.clone()).collect(),
            passives: self.passives.iter().map(|p| p.name.clone()).collect(),
            category_lines: self.category_lines.iter().map(|l| l.to_string()).collect(),
            weapon_lines: self.weapon_lines.iter().map(|l| l.to_string()).collect(),
            total_score: self.total_score,
        }
    }
}

fn validate(
    abilities: &[&AbilityDefinition],
    modifiers: &[&Modifier],
    category_lines: &[&str],
    weapon_lines: &[&str],
    constraints: &BuildConstraints,
) -> Result<(), BuildError> {
    if abilities.len() > constraints.max_abilities {
        return Err(BuildError::TooManyAbilities {
            count: abilities.len(),
            max: constraints.max_abilities,
        });
    }
    if modifiers.len() > constraints.max_modifiers {
        return Err(BuildError::TooManyModifiers {
            count: modifiers.len(),
            max: constraints.max_modifiers,
        });
    }
    if category_lines.len() > constraints.max_category_lines {
        return Err(BuildError::TooManyCategoryLines {
            count: category_lines.len(),
            max: constraints.max_category_lines,
        });
    }
    if weapon_lines.len() > constraints.max_weapon_lines {
        return Err(BuildError::TooManyWeaponLines {
            count: weapon_lines.len(),
            max: constraints.max_weapon_lines,
        });
    }
    for (i, ability) in abilities.iter().enumerate() {
        if abilities[..i]
            .iter()
            .any(|earlier| earlier.base_ability == ability.base_ability)
        {
            return Err(BuildError::DuplicateMorph(ability.base_ability.clone()));
        }
    }
    Ok(())
}
