// AI configuration and secrets management
//
// API keys are looked up in:
// 1. System keychain (preferred)
// 2. Environment variables (fallback for CI/headless)
//
// Keys are NEVER stored in settings.json

use std::env;
use std::time::Duration;

use crate::settings::{AIProvider, AISettings, Settings};

/// Service name for keychain storage
#[cfg(feature = "keychain")]
const KEYCHAIN_SERVICE: &str = "pressroom";

/// Last-resort variable checked after the provider-specific one
pub const FALLBACK_KEY_VAR: &str = "API_KEY";

/// Source of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Key retrieved from system keychain
    Keychain,
    /// Key retrieved from environment variable
    Environment,
    /// No key found
    None,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Keychain => "keychain",
            KeySource::Environment => "environment",
            KeySource::None => "none",
        }
    }
}

/// Result of key lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLookup {
    pub key: Option<String>,
    pub source: KeySource,
}

impl KeyLookup {
    fn missing() -> Self {
        Self { key: None, source: KeySource::None }
    }
}

/// Get the environment variable name for a provider
pub fn env_var_name(provider: &str) -> String {
    format!("PRESSROOM_{}_KEY", provider.to_uppercase())
}

/// Get the keychain account name for a provider
#[cfg(feature = "keychain")]
fn keychain_account(provider: &str) -> String {
    format!("ai/{}", provider.to_lowercase())
}

/// Get an API key for the specified provider
///
/// Checks in order:
/// 1. System keychain
/// 2. PRESSROOM_<PROVIDER>_KEY
/// 3. API_KEY
pub fn get_api_key(provider: &str) -> KeyLookup {
    #[cfg(feature = "keychain")]
    {
        if let Ok(entry) = keyring::Entry::new(KEYCHAIN_SERVICE, &keychain_account(provider)) {
            if let Ok(key) = entry.get_password() {
                return KeyLookup {
                    key: Some(key),
                    source: KeySource::Keychain,
                };
            }
        }
    }

    key_from_env(provider, |name| env::var(name).ok())
}

/// Environment half of the lookup, over an injectable reader
pub fn key_from_env(provider: &str, var: impl Fn(&str) -> Option<String>) -> KeyLookup {
    let primary = env_var_name(provider);
    for name in [primary.as_str(), FALLBACK_KEY_VAR] {
        if let Some(key) = var(name).filter(|k| !k.is_empty()) {
            return KeyLookup {
                key: Some(key),
                source: KeySource::Environment,
            };
        }
    }
    KeyLookup::missing()
}

/// Check if keychain support is available
pub fn keychain_available() -> bool {
    #[cfg(feature = "keychain")]
    {
        keyring::Entry::new(KEYCHAIN_SERVICE, &keychain_account("probe")).is_ok()
    }
    #[cfg(not(feature = "keychain"))]
    {
        false
    }
}

// ============================================================================
// Resolved AI Configuration (single source of truth)
// ============================================================================

/// The effective AI configuration, fully resolved from all sources.
#[derive(Debug, Clone)]
pub struct ResolvedAIConfig {
    pub provider: AIProvider,
    /// Effective model (resolved from settings or provider default)
    pub model: String,
    /// API base URL without trailing slash
    pub endpoint: String,
    pub timeout: Duration,
    pub grounding: bool,
    /// API key (if available and provider needs one)
    pub api_key: Option<String>,
    pub key_source: KeySource,
    pub status: AIConfigStatus,
    /// Human-readable reason if not ready
    pub blocking_reason: Option<String>,
}

/// Status of the AI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AIConfigStatus {
    /// Generation is disabled (provider = None)
    Disabled,
    /// Provider and key are in place
    Ready,
    /// Provider is configured but API key is missing
    MissingKey,
}

impl AIConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Ready => "ready",
            Self::MissingKey => "missing_key",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl ResolvedAIConfig {
    /// Resolve the effective AI configuration from settings and the
    /// keychain/environment.
    pub fn from_settings(settings: &AISettings) -> Self {
        let lookup = if settings.provider.needs_api_key() {
            get_api_key(settings.provider.name())
        } else {
            KeyLookup::missing()
        };
        Self::with_key(settings, lookup)
    }

    /// Resolve against an already performed key lookup.
    pub fn with_key(settings: &AISettings, lookup: KeyLookup) -> Self {
        let provider = settings.provider;

        if !provider.is_enabled() {
            return Self {
                provider,
                model: String::new(),
                endpoint: settings.effective_endpoint().to_string(),
                timeout: settings.timeout(),
                grounding: settings.grounding,
                api_key: None,
                key_source: KeySource::None,
                status: AIConfigStatus::Disabled,
                blocking_reason: Some("Generation is disabled (ai.provider = \"none\")".to_string()),
            };
        }

        let (api_key, key_source, status, blocking_reason) = match lookup.key {
            Some(key) => (Some(key), lookup.source, AIConfigStatus::Ready, None),
            None => (
                None,
                KeySource::None,
                AIConfigStatus::MissingKey,
                Some(format!(
                    "No API key found. Set via keychain, {} or {}",
                    env_var_name(provider.name()),
                    FALLBACK_KEY_VAR
                )),
            ),
        };

        Self {
            provider,
            model: settings.effective_model().to_string(),
            endpoint: settings.effective_endpoint().to_string(),
            timeout: settings.timeout(),
            grounding: settings.grounding,
            api_key,
            key_source,
            status,
            blocking_reason,
        }
    }

    /// Load settings and resolve in one call
    pub fn load() -> Self {
        Self::from_settings(&Settings::load().ai)
    }
}

// ============================================================================
// Diagnostics (for CLI doctor and debugging)
// ============================================================================

/// Diagnostic information about AI configuration
#[derive(Debug)]
pub struct AIDiagnostics {
    pub provider: String,
    pub model: String,
    pub status: AIConfigStatus,
    pub key_present: bool,
    pub key_source: KeySource,
    pub keychain_available: bool,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub grounding: bool,
    pub blocking_reason: Option<String>,
}

impl AIDiagnostics {
    pub fn from_resolved(config: &ResolvedAIConfig) -> Self {
        Self {
            provider: config.provider.name().to_string(),
            model: config.model.clone(),
            status: config.status,
            key_present: config.api_key.is_some(),
            key_source: config.key_source,
            keychain_available: keychain_available(),
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout.as_secs(),
            grounding: config.grounding,
            blocking_reason: config.blocking_reason.clone(),
        }
    }
}

impl std::fmt::Display for AIDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AI Configuration")?;
        writeln!(f, "──────────────────────────────")?;
        writeln!(f, "Provider:          {}", self.provider)?;
        writeln!(f, "Status:            {}", self.status.as_str())?;
        writeln!(f, "Model:             {}", self.model)?;
        writeln!(f, "Endpoint:          {}", self.endpoint)?;
        writeln!(f, "Timeout:           {}s", self.timeout_secs)?;
        writeln!(f, "Search grounding:  {}", if self.grounding { "on" } else { "off" })?;
        writeln!(f, "Key present:       {}", if self.key_present { "yes" } else { "no" })?;
        writeln!(f, "Key source:        {}", self.key_source.as_str())?;
        writeln!(f, "Keychain:          {}", if self.keychain_available { "available" } else { "unavailable" })?;
        if let Some(reason) = &self.blocking_reason {
            writeln!(f, "Note:              {}", reason)?;
        }
        Ok(())
    }
}
