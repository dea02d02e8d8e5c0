//! Center configuration and environment loading
//!
//! # Example
//!
//! ```
//! use notification_center::{CenterConfig, LeakPolicy, NotificationCenter};
//!
//! let config = CenterConfig {
//!     label: "ui".to_string(),
//!     leak_policy: LeakPolicy::Log,
//!     log_unhandled: true,
//! };
//! let center = NotificationCenter::with_config(config).expect("valid config");
//! assert_eq!(center.config().label, "ui");
//! ```

use crate::errors::ConfigError;
use crate::DEFAULT_CENTER_LABEL;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// What to do when a center is torn down while bindings are still registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeakPolicy {
    /// Say nothing.
    Ignore,
    /// Log at error level.
    #[default]
    Log,
    /// Log, then fail a debug assertion.
    Assert,
}

impl FromStr for LeakPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "off" => Ok(Self::Ignore),
            "log" | "warn" => Ok(Self::Log),
            "assert" => Ok(Self::Assert),
            other => Err(ConfigError::InvalidLeakPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for LeakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ignore => "ignore",
            Self::Log => "log",
            Self::Assert => "assert",
        })
    }
}

/// Configuration for one notification center.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterConfig {
    /// Name used in log fields to tell centers apart.
    pub label: String,
    /// Teardown behavior when bindings remain.
    pub leak_policy: LeakPolicy,
    /// Warn when a post reaches no binding at all.
    pub log_unhandled: bool,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_CENTER_LABEL.to_string(),
            leak_policy: LeakPolicy::Log,
            log_unhandled: false,
        }
    }
}

impl CenterConfig {
    pub const ENV_LABEL: &'static str = "NC_LABEL";
    pub const ENV_LEAK_POLICY: &'static str = "NC_LEAK_POLICY";
    pub const ENV_LOG_UNHANDLED: &'static str = "NC_LOG_UNHANDLED";

    /// Configuration from environment variables, falling back to defaults
    /// for anything missing or malformed.
    ///
    /// # Environment Variables
    ///
    /// - `NC_LABEL`: Center label (default: default)
    /// - `NC_LEAK_POLICY`: ignore, log or assert (default: log)
    /// - `NC_LOG_UNHANDLED`: Warn on posts nobody handles (default: false)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid notification center environment, using defaults");
            defaults
        })
    }

    /// Strict variant of [`CenterConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Any variable that is set but cannot be parsed.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Any value that is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(label) = lookup(Self::ENV_LABEL) {
            config.label = label;
        }
        if let Some(policy) = lookup(Self::ENV_LEAK_POLICY) {
            config.leak_policy = policy.parse()?;
        }
        if let Some(flag) = lookup(Self::ENV_LOG_UNHANDLED) {
            config.log_unhandled = parse_bool(Self::ENV_LOG_UNHANDLED, &flag)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::EmptyLabel` for a blank label.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
