//! Service configuration from the environment

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub log_filter: String,
    /// Spec entries shown on a product card.
    pub spec_preview_limit: usize,
    /// Largest pending log a projection request may carry.
    pub max_pending_actions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8083, log_filter: "info".to_string(), spec_preview_limit: 3, max_pending_actions: 64 }
    }
}

/// Loads `.env` if present, then reads the process environment.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key).ok())
}

/// Core parsing, decoupled from the process environment for tests.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = AppConfig::default();
    Ok(AppConfig {
        port: parse_or(&lookup, "PORT", defaults.port)?,
        log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),
        spec_preview_limit: parse_or(&lookup, "SPEC_PREVIEW_LIMIT", defaults.spec_preview_limit)?,
        max_pending_actions: parse_or(&lookup, "MAX_PENDING_ACTIONS", defaults.max_pending_actions)?,
    })
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        build_app_config(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from(&[("PORT", "9000"), ("SPEC_PREVIEW_LIMIT", "5"), ("LOG_FILTER", "debug")]).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.spec_preview_limit, 5);
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.max_pending_actions, 64);
    }

    #[test]
    fn test_invalid_port() {
        let err = from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PORT"));
    }
}
