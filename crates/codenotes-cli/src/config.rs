//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use codenotes_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    /// Notes store used when neither `--store` nor `CODENOTES_STORE` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    /// Editor command for `edit` and `goto --open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            store_path: None,
            editor: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codenotes").join(CONFIG_FILE_NAME))
}

impl CliConfig {
    /// Load from the default location; no config directory means defaults
    pub fn load() -> Result<Self, String> {
        default_config_path().map_or_else(|| Ok(Self::default()), |path| Self::load_from_path(&path))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()
            .ok_or_else(|| "Failed to resolve CLI config directory".to_string())?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    pub fn editor(&self) -> Option<String> {
        normalize_text_option(self.editor.clone())
    }

    fn normalize(&mut self) {
        self.editor = normalize_text_option(self.editor.take());
        self.store_path = self
            .store_path
            .take()
            .filter(|path| !path.as_os_str().is_empty());
    }
}
