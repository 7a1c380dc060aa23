//! The search space: which lines can be combined, and how many candidates that yields.

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityCatalog, AbilityFilter};
use crate::combinatorics::{combination_count, combinations, grouped_combination_count};
use crate::data::{AbilityDefinition, BuildConstraints};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    pub line: String,
    pub category: String,
}

/// The line dimensions of a search, as plain data so workers can own a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpace {
    pub category_lines: Vec<CategoryLine>,
    pub weapon_lines: Vec<String>,
}

impl LineSpace {
    pub fn from_catalog(catalog: &AbilityCatalog) -> Self {
        let category_lines = catalog
            .category_lines()
            .into_iter()
            .map(|line| CategoryLine {
                line: line.to_string(),
                category: catalog.category_of(line).unwrap_or_default().to_string(),
            })
            .collect();
        let weapon_lines = catalog
            .weapon_lines()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            category_lines,
            weapon_lines,
        }
    }

    /// Every line selection a search visits, lazily and in enumeration order.
    ///
    /// Category-line sets must contain a line of `required_category` when one is given.
    pub fn selections<'a>(
        &'a self,
        constraints: &BuildConstraints,
        required_category: Option<&'a str>,
    ) -> impl Iterator<Item = LineSelection> + 'a {
        let weapon_size = constraints.max_weapon_lines;
        combinations(&self.category_lines, constraints.max_category_lines)
            .filter(move |set| {
                required_category.map_or(true, |required| {
                    set.iter().any(|line| line.category == required)
                })
            })
            .flat_map(move |set| {
                let category_lines: Vec<String> = set.into_iter().map(|c| c.line).collect();
                combinations(&self.weapon_lines, weapon_size).map(move |weapon_lines| {
                    LineSelection {
                        category_lines: category_lines.clone(),
                        weapon_lines,
                    }
                })
            })
    }
}

/// The category and weapon lines of one outer iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub category_lines: Vec<String>,
    pub weapon_lines: Vec<String>,
}

impl LineSelection {
    pub fn lines(&self) -> Vec<&str> {
        self.category_lines
            .iter()
            .chain(&self.weapon_lines)
            .map(String::as_str)
            .collect()
    }

    /// Slottable abilities of the selected lines, category lines first.
    pub fn ability_pool<'c>(&self, catalog: &'c AbilityCatalog) -> Vec<&'c AbilityDefinition> {
        self.lines()
            .into_iter()
            .flat_map(|line| catalog.abilities_in_line(line, AbilityFilter::SEARCH))
            .collect()
    }
}

/// Morph-group sizes of `pool`, one entry per distinct base ability.
pub fn morph_group_sizes(pool: &[&AbilityDefinition]) -> Vec<usize> {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for ability in pool {
        match groups.iter_mut().find(|(base, _)| *base == ability.base_ability) {
            Some((_, size)) => *size += 1,
            None => groups.push((&ability.base_ability, 1)),
        }
    }
    groups.into_iter().map(|(_, size)| size).collect()
}

/// Candidates in one modifier set's worth of line selections.
pub fn candidates_per_modifier_set(
    catalog: &AbilityCatalog,
    lines: &LineSpace,
    constraints: &BuildConstraints,
    required_category: Option<&str>,
) -> u128 {
    lines
        .selections(constraints, required_category)
        .map(|selection| {
            let pool = selection.ability_pool(catalog);
            grouped_combination_count(&morph_group_sizes(&pool), constraints.max_abilities)
        })
        .fold(0u128, u128::saturating_add)
}

/// Total candidate count: modifier sets × ability selections, saturating.
pub fn estimate_search_space(
    catalog: &AbilityCatalog,
    lines: &LineSpace,
    constraints: &BuildConstraints,
    required_category: Option<&str>,
    free_modifiers: usize,
    open_modifier_slots: usize,
) -> u128 {
    let modifier_sets = combination_count(free_modifiers, open_modifier_slots);
    modifier_sets.saturating_mul(candidates_per_modifier_set(
        catalog,
        lines,
        constraints,
        required_category,
    ))
}
