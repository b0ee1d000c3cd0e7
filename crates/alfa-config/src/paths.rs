//! Where the file-backed configuration layers live.
//!
//! Layers are listed from lowest to highest precedence. Environment variables
//! sit above every file and are added by the loader.

use crate::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// A file-backed configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Per-user defaults shared by every project.
    User,
    /// Engine settings checked in next to the policies (`alfa.toml`).
    Project,
    /// Untracked overrides of the project file (`alfa.local.toml`).
    Local,
}

impl ConfigLayer {
    /// Every layer, lowest precedence first.
    pub const ALL: [ConfigLayer; 3] = [Self::User, Self::Project, Self::Local];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::User => "config.toml",
            Self::Project => "alfa.toml",
            Self::Local => "alfa.local.toml",
        }
    }
}

/// Layer locations for one project directory.
#[derive(Debug, Clone)]
pub struct Paths {
    user_dir: Option<PathBuf>,
    project_dir: PathBuf,
}

impl Paths {
    /// Resolves the per-user directory (`~/.config/alfa` on Linux) once.
    pub fn for_project(project_dir: impl AsRef<Path>) -> Self {
        Self {
            user_dir: ProjectDirs::from("com", "lemmsh", "alfa")
                .map(|dirs| dirs.config_dir().to_path_buf()),
            project_dir: project_dir.as_ref().to_path_buf(),
        }
    }

    pub fn user_config_dir(&self) -> Result<&Path, ConfigError> {
        self.user_dir.as_deref().ok_or(ConfigError::NoUserConfigDir)
    }

    pub fn layer_file(&self, layer: ConfigLayer) -> Result<PathBuf, ConfigError> {
        let dir = match layer {
            ConfigLayer::User => self.user_config_dir()?,
            ConfigLayer::Project | ConfigLayer::Local => self.project_dir.as_path(),
        };
        Ok(dir.join(layer.file_name()))
    }

    /// Layer files present on disk, lowest precedence first.
    ///
    /// Without a per-user directory the user layer is skipped.
    pub fn existing_layers(&self) -> Vec<(ConfigLayer, PathBuf)> {
        ConfigLayer::ALL
            .into_iter()
            .filter_map(|layer| self.layer_file(layer).ok().map(|file| (layer, file)))
            .filter(|(_, file)| file.is_file())
            .collect()
    }
}
