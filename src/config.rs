use crate::app::types::EditMode;
use crate::model::buffer::DEFAULT_WINDOW_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Size of the cache window over the edited file, in bytes
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    /// Editor behavior settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Custom keybindings (overrides for the built-in defaults)
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}

/// Editor behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Edit mode the session starts in ("hex" or "ascii")
    #[serde(default)]
    pub default_edit_mode: EditMode,

    /// Size of the search input, in bytes (one byte is reserved)
    #[serde(default = "default_max_search_length")]
    pub max_search_length: usize,

    /// Show the status bar on the last terminal row
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

fn default_max_search_length() -> usize {
    64
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_edit_mode: EditMode::default(),
            max_search_length: default_max_search_length(),
            show_status_bar: true,
        }
    }
}

/// Keybinding definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keybinding {
    /// Key name (e.g., "a", "Enter", "F1")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "find_next", "move_left")
    pub action: String,

    /// Context the binding applies to ("normal" or "prompt"), normal if absent
    #[serde(default)]
    pub when: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
            editor: EditorConfig::default(),
            keybindings: vec![],
        }
    }
}

impl Config {
    /// Get the default config file path
    #[cfg(feature = "runtime")]
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("fresh-hex").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    #[cfg(feature = "runtime")]
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file
    ///
    /// Missing fields take their default values; the result is validated.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "window_capacity must be greater than 0".to_string(),
            ));
        }

        // One byte of the search input is reserved
        if self.editor.max_search_length < 2 {
            return Err(ConfigError::ValidationError(
                "max_search_length must be at least 2".to_string(),
            ));
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if binding.action.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding action cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
