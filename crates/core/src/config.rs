use crate::error::{DeclscopeError, Result};
use crate::locate::SearchOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_DIR_NAME: &str = ".declscope";
pub const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_HISTORY_SIZE: usize = 500;
const DEFAULT_CONTEXT_LINES: usize = 3;

/// Settings handed to a view when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Options for free-text searches.
    pub search: SearchOptions,
    /// Where logs and shell history live.
    pub data_dir: PathBuf,
    pub history_size: usize,
    /// Lines shown around a highlighted span.
    pub context_lines: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            data_dir: default_data_dir(),
            history_size: DEFAULT_HISTORY_SIZE,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl ViewerConfig {
    /// `~/.declscope/config.json`.
    pub fn default_path() -> PathBuf {
        default_data_dir().join(CONFIG_FILE_NAME)
    }

    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DeclscopeError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("shell").join("history")
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
