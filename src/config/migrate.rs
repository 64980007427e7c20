//! Config-file upgrades: detect keys missing from an older `gymdesk.conf`
//! and write them back with their defaults.

use crate::errors::AppResult;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every config file should carry, with the value written when absent.
fn expected_keys() -> Vec<(&'static str, Value)> {
    vec![
        (
            "database",
            Value::String(super::Config::database_file().to_string_lossy().to_string()),
        ),
        (
            "default_payment_method",
            Value::String(super::default_payment_method()),
        ),
        ("currency_symbol", Value::String(super::default_currency_symbol())),
        ("checkin_source", Value::String(super::default_checkin_source())),
        (
            "list_limit",
            Value::Number((super::default_list_limit() as u64).into()),
        ),
    ]
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)?;
    Ok(yaml.as_mapping().cloned().unwrap_or_default())
}

/// Keys absent from the config file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;

    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::String(k.to_string())))
        .map(|(k, _)| k)
        .collect())
}

/// Add the missing keys with defaults. Existing values are never touched.
/// Returns the keys that were added.
pub fn add_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    for (key, default) in expected_keys() {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
