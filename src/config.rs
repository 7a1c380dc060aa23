//! Runtime settings: scoring baselines, buff table and search tuning.
//!
//! Read from an optional YAML file, then overridden by environment variables:
//! `SKILLFORGE_CONFIG` (file path), `SKILLFORGE_DATA`, `SKILLFORGE_WORKERS`,
//! `SKILLFORGE_PROGRESS_INTERVAL`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::DEFAULT_CATALOG_PATH;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "skillforge.yaml";

/// Assumptions used to turn stat passives into expected damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub baseline_crit_chance: f64,
    pub baseline_crit_damage: f64,
    /// Expected damage fraction granted by each named buff.
    pub buffs: BTreeMap<String, f64>,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let buffs = [
            ("minor-berserk", 0.05),
            ("major-berserk", 0.10),
            ("minor-slayer", 0.05),
            ("major-slayer", 0.10),
            // Crit damage buffs weighted by the baseline crit chance.
            ("minor-force", 0.05),
            ("major-force", 0.10),
            // Crit chance buffs weighted by (1 + baseline crit damage).
            ("minor-savagery", 0.0986),
            ("major-savagery", 0.1972),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
        Self {
            baseline_crit_chance: 0.5,
            baseline_crit_damage: 0.5,
            buffs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: String,
    pub scoring: ScoringSettings,
    /// Evaluations between progress events.
    pub progress_interval: u64,
    /// Worker threads for the parallel path; 0 uses every core.
    pub workers: usize,
    /// Modifier combinations per worker request; 0 splits evenly across workers.
    /// Every request carries its own copy of the searchable abilities and passives.
    pub batch_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_CATALOG_PATH.to_string(),
            scoring: ScoringSettings::default(),
            progress_interval: 100_000,
            workers: 0,
            batch_size: 0,
        }
    }
}

impl Settings {
    /// File from `SKILLFORGE_CONFIG` (or `skillforge.yaml` when present), then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var("SKILLFORGE_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let mut settings = if explicit.is_some() || Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_env(|key| env::var(key).ok())?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SKILLFORGE_DATA") {
            self.data_path = path;
        }
        if let Some(raw) = lookup("SKILLFORGE_WORKERS") {
            self.workers = parse_env("SKILLFORGE_WORKERS", raw)?;
        }
        if let Some(raw) = lookup("SKILLFORGE_PROGRESS_INTERVAL") {
            self.progress_interval = parse_env("SKILLFORGE_PROGRESS_INTERVAL", raw)?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value: raw })
}
