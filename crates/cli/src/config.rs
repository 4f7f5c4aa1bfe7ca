//! Environment configuration
//!
//! # Environment Variables
//!
//! - `TEXTBRIDGE_SHELL`: shell program for `run` (default: /bin/sh)
//! - `TEXTBRIDGE_CAPTURE_CAPACITY`: initial capture buffer in bytes (default: 4096)
//! - `TEXTBRIDGE_LOG_FORMAT`: `pretty` or `json` (default: pretty)

use textbridge_core::application::constants::INITIAL_CAPTURE_CAPACITY;
use textbridge_core::{AppError, Result};
use textbridge_infra_system::ShellConfig;

pub const SHELL_VAR: &str = "TEXTBRIDGE_SHELL";
pub const CAPTURE_CAPACITY_VAR: &str = "TEXTBRIDGE_CAPTURE_CAPACITY";
pub const LOG_FORMAT_VAR: &str = "TEXTBRIDGE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{LOG_FORMAT_VAR} must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub shell: ShellConfig,
    pub capture_capacity: usize,
    pub log_format: LogFormat,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            shell: ShellConfig::default(),
            capture_capacity: INITIAL_CAPTURE_CAPACITY,
            log_format: LogFormat::default(),
        }
    }
}

impl BridgeConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through `lookup` (testable without touching the real environment)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(program) = lookup(SHELL_VAR).filter(|s| !s.is_empty()) {
            config.shell.program = program;
        }

        if let Some(raw) = lookup(CAPTURE_CAPACITY_VAR) {
            config.capture_capacity = raw
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "{CAPTURE_CAPACITY_VAR} must be a positive integer, got '{raw}'"
                    ))
                })?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.capture_capacity, 4096);
    }

    #[test]
    fn test_overrides() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (SHELL_VAR, "/bin/bash"),
            (CAPTURE_CAPACITY_VAR, "128"),
            (LOG_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.shell.program, "/bin/bash");
        assert_eq!(config.capture_capacity, 128);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_capacity() {
        for raw in ["0", "-1", "lots"] {
            let result = BridgeConfig::from_lookup(lookup(&[(CAPTURE_CAPACITY_VAR, raw)]));
            assert!(matches!(result, Err(AppError::Config(_))), "{raw}");
        }
    }

    #[test]
    fn test_invalid_log_format() {
        let result = BridgeConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
