// src/config.rs
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Whether unmapped codes, zero divisors and unknown labels fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Apply fallback labels and let missing values propagate as nulls.
    #[default]
    Lenient,
    /// Fail on the first row that cannot be mapped or divided.
    Strict,
}

/// What to do with rows that have a null in a column later steps consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullRowPolicy {
    #[default]
    Keep,
    /// Drop them after deduplication, before categorical recoding.
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub key_column: String,
    pub target_column: String,
    /// Name of the derived total-months-delinquent column.
    pub delinquency_column: String,
    pub strictness: Strictness,
    pub null_rows: NullRowPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            key_column: "customer_id".into(),
            target_column: "default_oct".into(),
            delinquency_column: "tmd".into(),
            strictness: Strictness::Lenient,
            null_rows: NullRowPolicy::Keep,
        }
    }
}

impl PipelineConfig {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }

    /// Read a YAML config; keys left out keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
