// src/config.rs

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::SettingsError;

/// Knobs shared by exact lookups and weighted averages.
///
/// Every field has a default, so a settings file only needs the keys it
/// overrides:
///
/// ```yaml
/// value_column: price
/// even_weight: 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Column holding the answer; every other column is a key column.
    value_column: String,
    /// Weight applied to an even matched value. Never zero.
    even_weight: u32,
    /// Weight applied to an odd matched value. Never zero.
    odd_weight: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            value_column: "value".to_string(),
            even_weight: 20,
            odd_weight: 10,
        }
    }
}

impl Settings {
    /// Checked constructor; both weights must be non-zero so that a matched
    /// row always contributes to the weighted average.
    pub fn new(
        value_column: impl Into<String>,
        even_weight: u32,
        odd_weight: u32,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            value_column: value_column.into(),
            even_weight,
            odd_weight,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn even_weight(&self) -> u32 {
        self.even_weight
    }

    pub fn odd_weight(&self) -> u32 {
        self.odd_weight
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a YAML file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Weight for a matched value, chosen by its parity.
    pub fn weight_for(&self, value: i64) -> u32 {
        if value % 2 == 0 {
            self.even_weight
        } else {
            self.odd_weight
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.even_weight == 0 {
            return Err(SettingsError::ZeroWeight {
                field: "even_weight",
            });
        }
        if self.odd_weight == 0 {
            return Err(SettingsError::ZeroWeight { field: "odd_weight" });
        }
        Ok(())
    }
}
