//! # Configuration Management Module
//!
//! Runtime settings for the simulator. Game balance (decay rate, thresholds,
//! item effects) is fixed in code; the configuration only controls pacing and
//! logging.
//!
//! ## Configuration Structure
//!
//! - [`SimulationConfig`] - how simulated activity time maps onto real time
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use petsim::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Missing file falls back to defaults
//!     let config = Config::load_or_default("petsim.toml").await?;
//!     println!("Time scale: {}", config.simulation.time_scale);
//!
//!     Config::create_default("petsim.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [simulation]
//! time_scale = 1.0   # 0.5 = twice as fast, 0 = no waiting at all
//! blocking = false   # block the thread instead of yielding to the runtime
//!
//! [logging]
//! level = "warn"
//! file = "petsim.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::pet::{BlockingSuspender, InstantSuspender, Suspend, TokioSuspender};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Multiplier applied to every simulated wait. Must be finite and >= 0.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Suspend by blocking the current thread rather than yielding the task.
    #[serde(default)]
    pub blocking: bool,
}

fn default_time_scale() -> f64 {
    1.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            blocking: false,
        }
    }
}

impl SimulationConfig {
    /// Build the suspension capability described by this section.
    pub fn suspender(&self) -> Arc<dyn Suspend> {
        if self.time_scale == 0.0 {
            Arc::new(InstantSuspender::new())
        } else if self.blocking {
            Arc::new(BlockingSuspender::new(self.time_scale))
        } else {
            Arc::new(TokioSuspender::new(self.time_scale))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some("petsim.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown values fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Warn)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Config::default());
        }
        Config::load(path).await
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let scale = self.simulation.time_scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(anyhow!(
                "simulation.time_scale must be a finite number >= 0 (got {})",
                scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.simulation.time_scale, 1.0);
        assert!(!config.simulation.blocking);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.file.as_deref(), Some("petsim.log"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[simulation]\ntime_scale = 0.25\n").unwrap();
        assert_eq!(config.simulation.time_scale, 0.25);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_negative_time_scale_rejected() {
        let mut config = Config::default();
        config.simulation.time_scale = -1.0;
        assert!(config.validate().is_err());
        config.simulation.time_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_filter_fallback() {
        let mut logging = LoggingConfig::default();
        logging.level = "debug".into();
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        logging.level = "loud".into();
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
    }

    #[tokio::test]
    async fn test_create_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petsim.toml");
        let path = path.to_string_lossy().to_string();
        Config::create_default(&path).await.unwrap();
        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.simulation.time_scale, 1.0);
        assert_eq!(loaded.logging.file.as_deref(), Some("petsim.log"));
    }

    #[tokio::test]
    async fn test_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(&path.to_string_lossy()).await.unwrap();
        assert_eq!(config.simulation.time_scale, 1.0);
        assert!(Config::load(&path.to_string_lossy()).await.is_err());
    }
}
