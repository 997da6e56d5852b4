//! Match configuration from environment variables
//!
//! - `TETRIS_SEED`: RNG seed (default: derived from the clock)
//! - `TETRIS_DROP_MS`: human gravity interval, > 0 (default 500)
//! - `TETRIS_AI_DELAY_MS`: agent decision interval, > 0 (default 500)
//! - `TETRIS_SLOWDOWN_MS`: slowdown lifetime (default 10000)
//! - `TETRIS_LOG_FILE`: write logs to this file (default: no logging)
//! - `TETRIS_LOG`: log filter directive (default "info")

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::{BASE_AI_DELAY_MS, BASE_DROP_MS, SLOWDOWN_DURATION_MS};

pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_DROP_MS: &str = "TETRIS_DROP_MS";
pub const ENV_AI_DELAY_MS: &str = "TETRIS_AI_DELAY_MS";
pub const ENV_SLOWDOWN_MS: &str = "TETRIS_SLOWDOWN_MS";
pub const ENV_LOG_FILE: &str = "TETRIS_LOG_FILE";
pub const ENV_LOG: &str = "TETRIS_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected an unsigned integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelConfig {
    pub seed: u32,
    pub drop_interval_ms: u32,
    pub ai_delay_ms: u32,
    pub slowdown_ms: u32,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            drop_interval_ms: BASE_DROP_MS,
            ai_delay_ms: BASE_AI_DELAY_MS,
            slowdown_ms: SLOWDOWN_DURATION_MS,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl DuelConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();
        let seed = parse_u32(ENV_SEED, get(ENV_SEED))?.unwrap_or_else(clock_seed);
        let drop_interval_ms = parse_positive(ENV_DROP_MS, get(ENV_DROP_MS))?
            .unwrap_or(defaults.drop_interval_ms);
        let ai_delay_ms = parse_positive(ENV_AI_DELAY_MS, get(ENV_AI_DELAY_MS))?
            .unwrap_or(defaults.ai_delay_ms);
        let slowdown_ms =
            parse_u32(ENV_SLOWDOWN_MS, get(ENV_SLOWDOWN_MS))?.unwrap_or(defaults.slowdown_ms);
        let log_file = get(ENV_LOG_FILE).map(PathBuf::from);
        let log_filter = get(ENV_LOG).unwrap_or(defaults.log_filter);

        Ok(Self {
            seed,
            drop_interval_ms,
            ai_delay_ms,
            slowdown_ms,
            log_file,
            log_filter,
        })
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn parse_u32(var: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    value
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: v })
        })
        .transpose()
}

fn parse_positive(var: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    match parse_u32(var, value)? {
        Some(0) => Err(ConfigError::Zero { var }),
        other => Ok(other),
    }
}

/// Seed from the wall clock, never zero.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
        .max(1)
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
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = DuelConfig::from_lookup(lookup(&[(ENV_SEED, "7")])).unwrap();
        assert_eq!(cfg, DuelConfig::default().with_seed(7));
    }

    #[test]
    fn test_overrides() {
        let cfg = DuelConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_DROP_MS, "300"),
            (ENV_AI_DELAY_MS, " 250 "),
            (ENV_SLOWDOWN_MS, "0"),
            (ENV_LOG_FILE, "/tmp/duel.log"),
            (ENV_LOG, "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.drop_interval_ms, 300);
        assert_eq!(cfg.ai_delay_ms, 250);
        assert_eq!(cfg.slowdown_ms, 0);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/duel.log")));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_rejects_garbage() {
        let err = DuelConfig::from_lookup(lookup(&[(ENV_DROP_MS, "fast")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_DROP_MS,
                value: "fast".to_string()
            }
        );
        assert!(err.to_string().contains("TETRIS_DROP_MS"));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = DuelConfig::from_lookup(lookup(&[(ENV_AI_DELAY_MS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { var: ENV_AI_DELAY_MS });
    }

    #[test]
    fn test_blank_values_are_unset() {
        let vars = [(ENV_SEED, "3"), (ENV_LOG_FILE, "  ")];
        let cfg = DuelConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn test_clock_seed_nonzero() {
        assert_ne!(clock_seed(), 0);
    }
}
