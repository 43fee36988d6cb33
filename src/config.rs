/// Configuration system for git-resource
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use crate::error::{ConfigError, ResourceError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Git engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Diagnostic output configuration
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Icon selection for the `info` document
    #[serde(default)]
    pub icons: IconConfig,
}

/// Git engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the remote to clone as and fetch from
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Log transfer progress while cloning or fetching
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

/// Diagnostic output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Report clone/fetch/walk/checkout durations on stderr
    #[serde(default = "default_timings")]
    pub timings: bool,
}

/// A single hosting-provider icon rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRule {
    /// Substring looked for in the repository URI
    pub pattern: String,
    /// Icon name reported when the pattern matches
    pub icon: String,
}

/// Icon selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    /// Icon used when no rule matches
    #[serde(default = "default_icon")]
    pub default_icon: String,

    /// Rules checked in order; the first match wins
    #[serde(default = "default_icon_rules")]
    pub rules: Vec<IconRule>,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_show_progress() -> bool {
    true
}

fn default_timings() -> bool {
    true
}

fn default_icon() -> String {
    "git".to_string()
}

fn default_icon_rules() -> Vec<IconRule> {
    [
        ("github", "github-circle"),
        ("gitlab", "gitlab"),
        ("bitbucket", "bitbucket"),
    ]
    .into_iter()
    .map(|(pattern, icon)| IconRule {
        pattern: pattern.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            show_progress: default_show_progress(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            timings: default_timings(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            default_icon: default_icon(),
            rules: default_icon_rules(),
        }
    }
}

impl IconConfig {
    /// Pick the icon for a repository URI
    pub fn icon_for(&self, uri: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| uri.contains(&rule.pattern))
            .map(|rule| rule.icon.as_str())
            .unwrap_or(&self.default_icon)
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, ResourceError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ResourceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.engine.remote.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "engine.remote".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.icons.default_icon.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "icons.default_icon".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        for (index, rule) in self.icons.rules.iter().enumerate() {
            // An empty pattern would match every URI
            if rule.pattern.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("icons.rules[{}].pattern", index),
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
            if rule.icon.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("icons.rules[{}].icon", index),
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(remote) = std::env::var("GIT_RESOURCE_REMOTE") {
            self.engine.remote = remote;
        }

        if let Ok(progress) = std::env::var("GIT_RESOURCE_SHOW_PROGRESS")
            && let Ok(show) = progress.parse()
        {
            self.engine.show_progress = show;
        }

        if let Ok(timings) = std::env::var("GIT_RESOURCE_TIMINGS")
            && let Ok(enabled) = timings.parse()
        {
            self.diagnostics.timings = enabled;
        }
    }

    /// Load from an explicit path, or the default location, then apply
    /// environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self, ResourceError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, ResourceError> {
        Self::load(None)
    }

    /// Default config file path
    pub fn default_path() -> PathBuf {
        crate::paths::PlatformPaths::default_config_path()
    }
}
