//! Configuration management for alfa
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (ALFA_* prefix, `__` between sections)
//! 2. alfa.local.toml (gitignored, local overrides)
//! 3. alfa.toml (git-tracked, project config)
//! 4. ~/.config/alfa/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use alfa_condition::DEFAULT_MAX_PASSES;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::{ConfigLayer, Paths};

/// Main alfa configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlfaConfig {
    pub simplify: SimplifyConfig,
    pub enforcement: EnforcementConfig,
}

/// Condition simplification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Upper bound on simplification passes before the last result is returned.
    pub max_passes: usize,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Enforcement front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// Emit an audit event for every enforced decision.
    pub audit: bool,
    /// What a `NotApplicable` decision turns into.
    pub not_applicable: NotApplicableEffect,
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            audit: true,
            not_applicable: NotApplicableEffect::Deny,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotApplicableEffect {
    #[default]
    Deny,
    Allow,
}

impl AlfaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Read a single TOML file, without merging any other source.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simplify.max_passes == 0 {
            return Err(ConfigError::InvalidSetting {
                setting: "simplify.max_passes",
                reason: "at least one pass is required".to_string(),
            });
        }
        Ok(())
    }
}
