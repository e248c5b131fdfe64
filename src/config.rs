//! TOML configuration: initial operator field values and link settings.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::time::Duration;

use crate::constants::{DEFAULT_LINK_NAME, DEFAULT_SCAN_TIMEOUT_SECS};
use crate::error::ConfigError;
use crate::fields::FieldStore;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommanderConfig {
    pub fields: BTreeMap<String, FieldValue>,
    pub link: LinkConfig,
}

/// Field values may be written as TOML strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
}

impl FieldValue {
    pub fn text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub name: String,
    pub scan_timeout_secs: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            name: DEFAULT_LINK_NAME.to_string(),
            scan_timeout_secs: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

impl LinkConfig {
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}

impl CommanderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply a `NAME=VALUE` override. The value is kept as raw text.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (name, value) = assignment
            .split_once('=')
            .filter(|(name, _)| !name.is_empty())
            .ok_or_else(|| ConfigError::BadOverride(assignment.to_string()))?;
        self.fields
            .insert(name.to_string(), FieldValue::Text(value.to_string()));
        Ok(())
    }

    pub fn field_store(&self) -> FieldStore {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.text()))
            .collect()
    }
}
