// Application settings
// Loaded from ~/.config/pressroom/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ConfigError;

/// Gemini REST endpoint used when none is configured
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// AI provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AIProvider {
    /// Generation disabled; articles are composed by hand
    None,
    /// Google Gemini with search grounding
    #[default]
    Gemini,
}

impl AIProvider {
    /// Returns true if generation is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self, AIProvider::None)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AIProvider::None => "none",
            AIProvider::Gemini => "gemini",
        }
    }

    /// Returns the default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            AIProvider::None => "",
            AIProvider::Gemini => "gemini-3-flash-preview",
        }
    }

    pub fn needs_api_key(&self) -> bool {
        matches!(self, AIProvider::Gemini)
    }
}

/// AI-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AISettings {
    /// Selected AI provider
    pub provider: AIProvider,

    /// Model identifier (provider-specific)
    pub model: String,

    /// API base URL
    pub endpoint: Option<String>,

    /// Request timeout for a single generation call
    pub timeout_secs: u64,

    /// Attach the search tool so the article cites live sources
    pub grounding: bool,
}

impl Default for AISettings {
    fn default() -> Self {
        Self {
            provider: AIProvider::Gemini,
            model: String::new(), // Empty = use provider default
            endpoint: None,
            timeout_secs: 60,
            grounding: true,
        }
    }
}

impl AISettings {
    /// Get the effective model (user-specified or provider default)
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    pub fn effective_endpoint(&self) -> &str {
        match self.endpoint.as_deref() {
            Some(e) if !e.trim().is_empty() => e.trim_end_matches('/'),
            _ => DEFAULT_GEMINI_ENDPOINT,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Canvas
    #[serde(rename = "canvas.lockOnPreview")]
    pub lock_on_preview: bool,

    // AI
    #[serde(rename = "ai", default)]
    pub ai: AISettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lock_on_preview: true,
            ai: AISettings::default(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Lock the canvas while the final edition is shown
    "canvas.lockOnPreview": true,

    // Article generation
    // Provider options: "none", "gemini"
    // API keys are stored in the system keychain or PRESSROOM_GEMINI_KEY, not in this file
    "ai": {
        "provider": "gemini",
        "model": "",
        "timeout_secs": 60,
        "grounding": true
    }
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pressroom");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            if let Err(e) = Self::create_default_file(&path) {
                log::warn!("{}", e);
            }
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Read and parse a settings file. Lines starting with `//` are comments.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(serde_json::from_str(&cleaned)?)
    }

    /// Write the commented default settings file
    pub fn create_default_file(path: &Path) -> Result<(), ConfigError> {
        ensure_parent(path)?;
        fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

fn ensure_parent(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
