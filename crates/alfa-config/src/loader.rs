//! Configuration loader with multi-source merging

use crate::{AlfaConfig, Paths};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "ALFA".to_string(),
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "ALFA")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<AlfaConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = AlfaConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2-4. User, project and local files, lowest precedence first
        for (_, file) in Paths::for_project(&self.project_dir).existing_layers() {
            builder = builder.add_source(toml_file(file));
        }

        // 5. Environment variables (ALFA_SIMPLIFY__MAX_PASSES=20)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let alfa_config: AlfaConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        alfa_config.validate()?;

        Ok(alfa_config)
    }

    /// Load configuration or return defaults if loading fails
    pub fn load_or_default(self) -> AlfaConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: PathBuf) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path)
        .required(false)
        .format(config::FileFormat::Toml)
}
