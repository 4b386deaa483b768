// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management
//!
//! Handles loading and saving settings from ~/.languagemodels/settings.json.
//! Every field is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::env::{EnvSource, ProcessEnv, HOME_VAR};

/// Namespace that publishes the catalog's converted models
pub const DEFAULT_NAMESPACE: &str = "jncraton";

/// Artifact hub endpoint
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Settings structure, stored in settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Budget as a size tier or size string (below the environment in precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// License filter pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Pinned instruct model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruct_model: Option<String>,

    /// Owner namespace for artifact downloads
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Artifact hub base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Where downloaded artifacts are kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Replacement catalog (TOML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: None,
            license: None,
            instruct_model: None,
            namespace: default_namespace(),
            endpoint: default_endpoint(),
            cache_dir: None,
            catalog: None,
        }
    }
}

impl Settings {
    /// Get the settings home directory ($LANGUAGEMODELS_HOME or ~/.languagemodels).
    pub fn home() -> PathBuf {
        Self::home_in(&ProcessEnv)
    }

    /// Settings home resolved against a specific environment.
    pub fn home_in(env: &dyn EnvSource) -> PathBuf {
        if let Some(home) = env.non_empty(HOME_VAR) {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".languagemodels")
    }

    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::home().join("settings.json")
    }

    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory for downloaded artifacts.
    pub fn artifact_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        dirs::cache_dir()
            .unwrap_or_else(Self::home)
            .join("languagemodels")
    }
}
