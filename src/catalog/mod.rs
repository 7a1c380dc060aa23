//! Read-only index over the static ability and passive collections.
//!
//! Lines are kept in an ordered map so every enumeration built on top of the
//! catalog visits them in the same order on every run.

use std::collections::BTreeMap;

use crate::data::{AbilityDefinition, AbilityKey, PassiveDefinition, WEAPON_CATEGORY};
use crate::error::DataError;

/// Which abilities [AbilityCatalog::abilities_in_line] leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbilityFilter {
    /// Drop the un-morphed version (name equals base ability).
    pub exclude_base: bool,
    pub exclude_ultimate: bool,
    /// Drop abilities with neither hits nor DoTs.
    pub exclude_non_damaging: bool,
}

impl AbilityFilter {
    pub const NONE: Self = Self {
        exclude_base: false,
        exclude_ultimate: false,
        exclude_non_damaging: false,
    };

    /// The filter every search uses: slottable, morphed, damaging abilities.
    pub const SEARCH: Self = Self {
        exclude_base: true,
        exclude_ultimate: true,
        exclude_non_damaging: true,
    };

    pub fn accepts(&self, ability: &AbilityDefinition) -> bool {
        !(self.exclude_base && ability.is_base()
            || self.exclude_ultimate && ability.is_ultimate()
            || self.exclude_non_damaging && ability.damage.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct AbilityCatalog {
    abilities: Vec<AbilityDefinition>,
    passives: Vec<PassiveDefinition>,
    /// line -> indices into `abilities`, in catalog order.
    by_line: BTreeMap<String, Vec<usize>>,
    line_category: BTreeMap<String, String>,
}

impl AbilityCatalog {
    pub fn new(abilities: Vec<AbilityDefinition>, passives: Vec<PassiveDefinition>) -> Self {
        let mut by_line: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut line_category = BTreeMap::new();
        for (index, ability) in abilities.iter().enumerate() {
            by_line.entry(ability.line.clone()).or_default().push(index);
            line_category
                .entry(ability.line.clone())
                .or_insert_with(|| ability.category.clone());
        }
        Self {
            abilities,
            passives,
            by_line,
            line_category,
        }
    }

    pub fn abilities(&self) -> &[AbilityDefinition] {
        &self.abilities
    }

    pub fn passives(&self) -> &[PassiveDefinition] {
        &self.passives
    }

    pub fn ability_by_key(&self, key: &AbilityKey) -> Option<&AbilityDefinition> {
        self.abilities.iter().find(|ability| ability.matches_key(key))
    }

    /// Look an ability up by display name, refusing names shared by several abilities.
    pub fn ability_named(&self, name: &str) -> Result<&AbilityDefinition, DataError> {
        let mut matches = self.abilities.iter().filter(|ability| ability.name == name);
        let Some(first) = matches.next() else {
            return Err(DataError::UnknownAbility(name.to_string()));
        };
        let others: Vec<&AbilityDefinition> = matches.collect();
        if others.is_empty() {
            return Ok(first);
        }
        Err(DataError::AmbiguousAbility {
            name: name.to_string(),
            lines: std::iter::once(first)
                .chain(others)
                .map(|ability| ability.line.clone())
                .collect(),
        })
    }

    pub fn abilities_in_line(&self, line: &str, filter: AbilityFilter) -> Vec<&AbilityDefinition> {
        self.by_line
            .get(line)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.abilities[i])
                    .filter(|ability| filter.accepts(ability))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn category_of(&self, line: &str) -> Option<&str> {
        self.line_category.get(line).map(String::as_str)
    }

    /// Class lines, in line-name order.
    pub fn category_lines(&self) -> Vec<&str> {
        self.line_category
            .iter()
            .filter(|(_, category)| category.as_str() != WEAPON_CATEGORY)
            .map(|(line, _)| line.as_str())
            .collect()
    }

    pub fn weapon_lines(&self) -> Vec<&str> {
        self.line_category
            .iter()
            .filter(|(_, category)| category.as_str() == WEAPON_CATEGORY)
            .map(|(line, _)| line.as_str())
            .collect()
    }

    /// Passives attached to any of `lines`, in catalog order.
    pub fn passives_for_lines(&self, lines: &[&str]) -> Vec<&PassiveDefinition> {
        self.passives
            .iter()
            .filter(|passive| lines.contains(&passive.line.as_str()))
            .collect()
    }
}
