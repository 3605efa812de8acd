use std::{fs, path::Path};

use anyhow::Context as _;
use blockfall_engine::Rules;
use serde::{Deserialize, Serialize};

/// Settings read from the `--config` TOML file.
///
/// ```toml
/// [rules]
/// points_per_level = 500
/// min_drop_interval_ms = 50
/// ```
///
/// Missing tables and keys keep their defaults; unknown keys are rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rules: Rules,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML")?;
        config.rules.validate()?;
        Ok(config)
    }
}
