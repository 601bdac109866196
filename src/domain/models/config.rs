use serde::{Deserialize, Serialize};

/// Main configuration structure for beacon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Suggestion engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL of the platform API, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Suggestion engine configuration
///
/// Cooldown, toast timeout, poll interval and cue table are fixed and not
/// part of configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Opt-in toggle for proactive suggestions
    #[serde(default)]
    pub enabled: bool,

    /// Play tones for surfaced suggestions
    #[serde(default = "default_true")]
    pub audio_enabled: bool,

    /// Candidates below this confidence are never surfaced (0.0-1.0)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

const fn default_true() -> bool {
    true
}

const fn default_min_confidence() -> f64 {
    0.7
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            audio_enabled: default_true(),
            min_confidence: default_min_confidence(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
