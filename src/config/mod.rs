//! Configuration management for depverify
//!
//! Configuration is loaded from `~/.depverify/config.json` with environment
//! variable overrides. None of it changes the shape of the report; it only
//! tunes logging and where the network probe points.

mod types;

pub use types::*;

use crate::error::{DepVerifyError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Returns the depverify configuration directory path (~/.depverify)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".depverify")
    }

    /// Returns the path to the config file (~/.depverify/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables follow the pattern: DEPVERIFY_SECTION_KEY
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Logging
        if let Some(val) = lookup("DEPVERIFY_LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("DEPVERIFY_LOGGING_FORMAT") {
            if let Ok(format) = val.parse() {
                self.logging.format = format;
            }
        }
        if let Some(val) = lookup("DEPVERIFY_LOGGING_FILE") {
            self.logging.file = Some(val);
        }

        // Probe
        if let Some(val) = lookup("DEPVERIFY_PROBE_API_BASE") {
            self.probe.api_base = val;
        }
        if let Some(val) = lookup("DEPVERIFY_PROBE_REPO") {
            self.probe.repo = val;
        }
        if let Some(val) = lookup("DEPVERIFY_PROBE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.probe.timeout_secs = v;
            }
        }
    }

    /// Reject values the probe cannot work with.
    pub fn validate(&self) -> Result<()> {
        let probe = &self.probe;

        if !(probe.api_base.starts_with("http://") || probe.api_base.starts_with("https://")) {
            return Err(DepVerifyError::Config(format!(
                "probe.api_base must be an http(s) URL, got: {}",
                probe.api_base
            )));
        }

        let mut parts = probe.repo.split('/');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !well_formed {
            return Err(DepVerifyError::Config(format!(
                "probe.repo must be in owner/name form, got: {:?}",
                probe.repo
            )));
        }

        if probe.timeout_secs == 0 {
            return Err(DepVerifyError::Config(
                "probe.timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
