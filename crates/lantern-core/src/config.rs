//! Configuration management for Lantern.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/lantern/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider dispatch settings
    pub dispatch: DispatchConfig,
    /// Simulated provider behavior settings
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LANTERN_PROVIDER_TIMEOUT_SECS`: Override the per-provider timeout
    /// - `LANTERN_SIM_SEED`: Override the simulated provider seed
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("LANTERN_PROVIDER_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.dispatch.provider_timeout_secs = secs;
                tracing::debug!("Override provider_timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("LANTERN_SIM_SEED") {
            if let Ok(seed) = val.parse() {
                config.simulation.seed = Some(seed);
                tracing::debug!("Override simulation.seed from env: {}", seed);
            }
        }

        Ok(config)
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &std::path::Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/lantern/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "lantern", "lantern").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns error for zero timeouts or an inverted latency window.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dispatch.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.provider_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.simulation.min_latency_ms > self.simulation.max_latency_ms {
            return Err(ConfigError::InvalidValue {
                field: "simulation.min_latency_ms".to_string(),
                reason: format!(
                    "must not exceed max_latency_ms ({} > {})",
                    self.simulation.min_latency_ms, self.simulation.max_latency_ms
                ),
            });
        }

        Ok(())
    }
}

/// Settings for the dispatch coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Per-provider timeout in seconds. A provider call exceeding this is
    /// treated as a provider failure, not a system fault.
    pub provider_timeout_secs: u64,
}

impl DispatchConfig {
    /// The per-provider timeout as a `Duration`.
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 10,
        }
    }
}

/// Settings for the simulated provider set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed RNG seed for reproducible simulated responses. Entropy-seeded
    /// when unset.
    pub seed: Option<u64>,
    /// Lower bound of the simulated upstream latency window, milliseconds
    pub min_latency_ms: u64,
    /// Upper bound of the simulated upstream latency window, milliseconds
    pub max_latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_latency_ms: 150,
            max_latency_ms: 900,
        }
    }
}
