use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid min_confidence: {0}. Must be between 0.0 and 1.0")]
    InvalidMinConfidence(f64),

    #[error("Invalid base_url: {0:?}. Must be an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("Invalid request_timeout_ms: {0}. Must be at least 1")]
    InvalidRequestTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .beacon/config.yaml (project config)
    /// 3. .beacon/local.yaml (local overrides, optional)
    /// 4. Environment variables (BEACON_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(".beacon/config.yaml"))
            .merge(Yaml::file(".beacon/local.yaml"))
            .merge(Env::prefixed("BEACON_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("BEACON_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let min_confidence = config.engine.min_confidence;
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConfigError::InvalidMinConfidence(min_confidence));
        }

        let base_url = config.api.base_url.trim();
        let valid_url = reqwest::Url::parse(base_url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid_url {
            return Err(ConfigError::InvalidBaseUrl(config.api.base_url.clone()));
        }

        if config.api.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                config.api.request_timeout_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
