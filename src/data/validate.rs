//! Catalog sanity checks run before a search. Errors describe data the scoring
//! model cannot use; warnings describe data it will silently ignore.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::ScoringSettings;
use crate::data::{AbilityDefinition, BonusEffect, GameData, StatType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_game_data(data: &GameData, scoring: &ScoringSettings) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_names = HashSet::new();
    let mut line_categories: HashMap<&str, &str> = HashMap::new();

    for (index, ability) in data.abilities.iter().enumerate() {
        let context = format!("abilities[{index}] '{}'", ability.name);
        if ability.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "missing non-empty 'name'");
        } else if !seen_names.insert(ability.name.as_str()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate ability name '{}'", ability.name),
            );
        }
        if ability.base_ability.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                "missing non-empty 'base_ability'",
            );
        }
        match line_categories.get(ability.line.as_str()) {
            Some(category) if *category != ability.category => report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "line '{}' already belongs to category '{category}', not '{}'",
                    ability.line, ability.category
                ),
            ),
            Some(_) => {}
            None => {
                line_categories.insert(&ability.line, &ability.category);
            }
        }
        validate_damage(&mut report, &context, ability);
    }

    let known_lines: HashSet<&str> = data.abilities.iter().map(|a| a.line.as_str()).collect();
    for (index, passive) in data.passives.iter().enumerate() {
        let context = format!("passives[{index}] '{}'", passive.name);
        if !known_lines.contains(passive.line.as_str()) {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                format!("line '{}' has no abilities; passive never applies", passive.line),
            );
        }
        for (entry_index, entry) in passive.bonuses.iter().enumerate() {
            let entry_context = format!("{context}.bonuses[{entry_index}]");
            match &entry.effect {
                BonusEffect::Stat { stat, .. } => match stat {
                    StatType::Duration | StatType::MaxResource => report.push(
                        ValidationSeverity::Info,
                        entry_context,
                        "non-damage stat is ignored by the scoring model",
                    ),
                    StatType::Other => report.push(
                        ValidationSeverity::Warning,
                        entry_context,
                        "unrecognized stat type contributes nothing",
                    ),
                    _ => {}
                },
                BonusEffect::Buff { buff } => {
                    if !scoring.buffs.contains_key(buff) {
                        report.push(
                            ValidationSeverity::Warning,
                            entry_context,
                            format!("buff '{buff}' has no expected value configured"),
                        );
                    }
                }
            }
        }
    }

    let mut seen_modifiers = HashSet::new();
    for (index, modifier) in data.modifiers.iter().enumerate() {
        let context = format!("modifiers[{index}] '{}'", modifier.name);
        if !seen_modifiers.insert(modifier.name.as_str()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate modifier name '{}'", modifier.name),
            );
        }
        if modifier.max_level == 0 {
            report.push(
                ValidationSeverity::Warning,
                context,
                "max_level 0 makes the modifier a no-op",
            );
        }
    }

    let c = &data.constraints;
    if c.max_abilities == 0 {
        report.push(
            ValidationSeverity::Warning,
            "constraints",
            "max_abilities is 0; the only build is the empty one",
        );
    }
    if data.modifiers.len() < c.max_modifiers {
        report.push(
            ValidationSeverity::Error,
            "constraints",
            format!(
                "max_modifiers {} exceeds the {} modifiers available",
                c.max_modifiers,
                data.modifiers.len()
            ),
        );
    }

    report
}

fn validate_damage(report: &mut ValidationReport, context: &str, ability: &AbilityDefinition) {
    for (index, hit) in ability.damage.hits.iter().enumerate() {
        if hit.value < 0.0 {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.damage.hits[{index}]"),
                format!("negative hit value {}", hit.value),
            );
        }
    }
    for (index, dot) in ability.damage.dots.iter().enumerate() {
        let dot_context = format!("{context}.damage.dots[{index}]");
        if dot.duration <= 0.0 {
            report.push(
                ValidationSeverity::Error,
                dot_context.clone(),
                format!("non-positive duration {}", dot.duration),
            );
        }
        if let Some(interval) = dot.interval {
            if interval <= 0.0 {
                report.push(
                    ValidationSeverity::Error,
                    dot_context.clone(),
                    format!("non-positive interval {interval}; treated as one tick"),
                );
            } else if interval > dot.duration {
                report.push(
                    ValidationSeverity::Warning,
                    dot_context,
                    format!("interval {interval} exceeds duration {}; no ticks", dot.duration),
                );
            }
        }
    }
    if ability.damage.is_empty() && !ability.is_ultimate() {
        report.push(
            ValidationSeverity::Info,
            context.to_string(),
            "no damage profile; excluded from searches",
        );
    }
}
