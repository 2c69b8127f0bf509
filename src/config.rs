use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "./static";
pub const DEFAULT_START_SECONDS: u32 = 300;
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 500;

/// Server settings, read from the environment (and an optional `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: String,
    /// Seconds on each side's clock at the start of a game.
    pub start_seconds: u32,
    /// Pause before the random opponent answers a human move.
    pub opponent_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            start_seconds: DEFAULT_START_SECONDS,
            opponent_delay: Duration::from_millis(DEFAULT_OPPONENT_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let start_seconds = parse_or("CHESS_START_SECONDS", &lookup, defaults.start_seconds)?;
        let delay_ms = parse_or("CHESS_OPPONENT_DELAY_MS", &lookup, DEFAULT_OPPONENT_DELAY_MS)?;

        Ok(AppConfig {
            bind_addr: lookup("CHESS_BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: lookup("CHESS_STATIC_DIR").unwrap_or(defaults.static_dir),
            start_seconds,
            opponent_delay: Duration::from_millis(delay_ms),
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.static_dir, "./static");
        assert_eq!(config.start_seconds, 300);
        assert_eq!(config.opponent_delay, Duration::from_millis(500));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CHESS_BIND_ADDR", "0.0.0.0:9000"),
            ("CHESS_START_SECONDS", "60"),
            ("CHESS_OPPONENT_DELAY_MS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.start_seconds, 60);
        assert_eq!(config.opponent_delay, Duration::from_millis(10));
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("CHESS_START_SECONDS", "five")]))
            .unwrap_err();
        assert!(err.to_string().contains("CHESS_START_SECONDS"));
    }
}
