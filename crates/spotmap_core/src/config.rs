//! Marker layer configuration.
//!
//! # Responsibility
//! - Hold host-provided switches for the marker layer.
//! - Load overrides from process environment for embedded hosts.
//!
//! # Invariants
//! - Defaults reproduce the built-in radius table on a pointer (non-touch)
//!   surface.
//! - Invalid environment values are rejected, never silently ignored.

use crate::cluster::policy::RadiusPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable selecting touch surfaces (`1|true|yes|0|false|no`).
pub const TOUCH_SURFACE_ENV: &str = "SPOTMAP_TOUCH_SURFACE";

/// Marker layer settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Touch surfaces get click bindings only, no hover popups.
    pub touch_surface: bool,
    pub radius_policy: RadiusPolicy,
}

impl LayerConfig {
    /// Builds defaults, then applies environment overrides.
    ///
    /// # Errors
    /// - Returns `ConfigError::InvalidValue` when an override cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(TOUCH_SURFACE_ENV) {
            config.touch_surface = parse_flag(TOUCH_SURFACE_ENV, &raw)?;
        }
        Ok(config)
    }

    pub fn with_touch_surface(mut self, touch_surface: bool) -> Self {
        self.touch_surface = touch_surface;
        self
    }

    pub fn with_radius_policy(mut self, radius_policy: RadiusPolicy) -> Self {
        self.radius_policy = radius_policy;
        self
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Configuration load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for `{key}`: `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{parse_flag, ConfigError, LayerConfig, TOUCH_SURFACE_ENV};
    use crate::cluster::policy::RadiusPolicy;

    #[test]
    fn defaults_use_pointer_surface_and_builtin_policy() {
        let config = LayerConfig::default();
        assert!(!config.touch_surface);
        assert_eq!(config.radius_policy, RadiusPolicy::default());
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag(TOUCH_SURFACE_ENV, " TRUE ").expect("true parses"));
        assert!(parse_flag(TOUCH_SURFACE_ENV, "1").expect("1 parses"));
        assert!(!parse_flag(TOUCH_SURFACE_ENV, "no").expect("no parses"));
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        let err = parse_flag(TOUCH_SURFACE_ENV, "maybe").expect_err("garbage must fail");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains(TOUCH_SURFACE_ENV));
    }
}
