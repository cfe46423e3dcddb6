//! Configuration type definitions for depverify
//!
//! All types implement serde traits for JSON serialization and have sensible defaults.

use serde::{Deserialize, Serialize};

/// Default GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Repository whose metadata the network probe fetches.
pub const DEFAULT_PROBE_REPO: &str = "n8n-io/n8n";
/// Network probe timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Main configuration struct for depverify
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging output configuration
    pub logging: LoggingConfig,
    /// Network probe target
    pub probe: ProbeConfig,
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Compact single-line output with a `component` field
    #[default]
    Component,
    /// JSON lines for log aggregators
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "component" => Ok(LogFormat::Component),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Optional file to append log lines to (stderr otherwise)
    pub file: Option<String>,
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            file: None,
            level: "warn".to_string(),
        }
    }
}

// ============================================================================
// Probe Configuration
// ============================================================================

/// Where the HTTP client check sends its request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// API base URL, without trailing slash
    pub api_base: String,
    /// Repository in `owner/name` form
    pub repo: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            repo: DEFAULT_PROBE_REPO.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
