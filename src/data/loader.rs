//! Load the game catalog from YAML or JSON. Format is picked by file extension;
//! anything that is not `.json` is read as YAML.

use std::fs;
use std::path::Path;

use crate::data::GameData;
use crate::error::DataError;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.yaml";

pub fn load_game_data(path: impl AsRef<Path>) -> Result<GameData, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let data = if is_json {
        parse_json(&raw)?
    } else {
        parse_yaml(&raw)?
    };
    tracing::debug!(
        path = %path.display(),
        abilities = data.abilities.len(),
        passives = data.passives.len(),
        modifiers = data.modifiers.len(),
        "loaded catalog"
    );
    Ok(data)
}

pub fn parse_yaml(raw: &str) -> Result<GameData, DataError> {
    Ok(serde_yaml::from_str(raw)?)
}

pub fn parse_json(raw: &str) -> Result<GameData, DataError> {
    Ok(serde_json::from_str(raw)?)
}
