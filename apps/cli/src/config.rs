//! Runtime configuration read from the environment.

use quiz_core::types::DEFAULT_OPTION_COUNT;
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_VAR: &str = "VERSE_QUIZ_DATA";
pub const SEED_VAR: &str = "VERSE_QUIZ_SEED";
pub const OPTIONS_VAR: &str = "VERSE_QUIZ_OPTIONS";
pub const JSON_VAR: &str = "VERSE_QUIZ_JSON";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Verse data file; the built-in catalog is used when unset.
    pub data_path: Option<PathBuf>,
    /// Fixed shuffle seed for reproducible sessions.
    pub seed: Option<u64>,
    pub option_count: usize,
    /// Print the final summary as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            seed: None,
            option_count: DEFAULT_OPTION_COUNT,
            json: false,
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = get(DATA_VAR).map(PathBuf::from);

        let seed = match get(SEED_VAR) {
            Some(value) => {
                let parsed = value.trim().parse::<u64>().ok();
                Some(parsed.ok_or_else(|| ConfigError::InvalidValue {
                    key: SEED_VAR,
                    value,
                    expected: "an unsigned integer",
                })?)
            }
            None => None,
        };

        let option_count = match get(OPTIONS_VAR) {
            Some(value) => {
                let parsed = value.trim().parse::<usize>().ok().filter(|n| *n >= 2);
                parsed.ok_or_else(|| ConfigError::InvalidValue {
                    key: OPTIONS_VAR,
                    value,
                    expected: "an integer of at least 2",
                })?
            }
            None => DEFAULT_OPTION_COUNT,
        };

        let json = match get(JSON_VAR).as_deref().map(str::trim) {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: JSON_VAR,
                    value: other.to_string(),
                    expected: "one of 0, 1, true, false",
                })
            }
        };

        Ok(Self {
            data_path,
            seed,
            option_count,
            json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_reads_all_values() {
        let cfg = config(&[
            (DATA_VAR, "/tmp/surahs.txt"),
            (SEED_VAR, "42"),
            (OPTIONS_VAR, "3"),
            (JSON_VAR, "true"),
        ])
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                data_path: Some(PathBuf::from("/tmp/surahs.txt")),
                seed: Some(42),
                option_count: 3,
                json: true,
            }
        );
    }

    #[test]
    fn test_blank_values_are_unset() {
        assert_eq!(config(&[(SEED_VAR, "  "), (DATA_VAR, "")]).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_seed() {
        let err = config(&[(SEED_VAR, "abc")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "VERSE_QUIZ_SEED must be an unsigned integer, got \"abc\""
        );
    }

    #[test]
    fn test_option_count_minimum() {
        assert!(config(&[(OPTIONS_VAR, "1")]).is_err());
        assert!(config(&[(OPTIONS_VAR, "many")]).is_err());
        assert_eq!(config(&[(OPTIONS_VAR, "2")]).unwrap().option_count, 2);
    }

    #[test]
    fn test_invalid_json_flag() {
        assert!(matches!(
            config(&[(JSON_VAR, "yes")]),
            Err(ConfigError::InvalidValue { key: JSON_VAR, .. })
        ));
    }
}
