use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

pub const PORT_VAR: &str = "CAR_SEARCH_PORT";
pub const PAGE_SIZE_VAR: &str = "CAR_SEARCH_PAGE_SIZE";
pub const DATA_VAR: &str = "CAR_SEARCH_DATA";
pub const MODELS_TTL_VAR: &str = "CAR_SEARCH_MODELS_TTL_SECS";

/// Longest accepted model-list TTL: one day
pub const MAX_MODELS_TTL_SECS: u32 = 86_400;

/// Server settings, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Cars per results page
    pub page_size: u32,
    /// JSON inventory file; the bundled data is used when unset
    pub data_path: Option<PathBuf>,
    /// How long clients may reuse a model list, 1..=MAX_MODELS_TTL_SECS
    pub models_ttl_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            page_size: 6,
            data_path: None,
            models_ttl_secs: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            port: try_load(PORT_VAR, defaults.port)?,
            page_size: try_load(PAGE_SIZE_VAR, defaults.page_size)?,
            data_path: env::var(DATA_VAR).ok().map(PathBuf::from),
            models_ttl_secs: check_models_ttl(try_load(
                MODELS_TTL_VAR,
                defaults.models_ttl_secs,
            )?)?,
        })
    }
}

fn check_models_ttl(secs: u32) -> Result<u32> {
    if secs == 0 || secs > MAX_MODELS_TTL_SECS {
        warn!("Invalid {MODELS_TTL_VAR} value: {secs}");
        bail!("{MODELS_TTL_VAR} must be between 1 and {MAX_MODELS_TTL_SECS}, got {secs}");
    }
    Ok(secs)
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Invalid {key} value {raw:?}: {e}")
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        let value: u32 = try_load("CAR_SEARCH_TEST_UNSET_VARIABLE", 6).unwrap();
        assert_eq!(value, 6);
    }

    #[test]
    fn invalid_variable_is_an_error() {
        env::set_var("CAR_SEARCH_TEST_INVALID_PORT", "not-a-port");
        let result: Result<u16> = try_load("CAR_SEARCH_TEST_INVALID_PORT", 3000);
        assert!(result.is_err());
    }

    #[test]
    fn models_ttl_out_of_range_is_rejected() {
        assert!(check_models_ttl(0).is_err());
        assert!(check_models_ttl(MAX_MODELS_TTL_SECS + 1).is_err());
        assert_eq!(check_models_ttl(60).unwrap(), 60);
        assert_eq!(check_models_ttl(MAX_MODELS_TTL_SECS).unwrap(), MAX_MODELS_TTL_SECS);
    }

    #[test]
    fn negative_or_huge_models_ttl_does_not_parse() {
        env::set_var("CAR_SEARCH_TEST_NEGATIVE_TTL", "-5");
        let result: Result<u32> = try_load("CAR_SEARCH_TEST_NEGATIVE_TTL", 60);
        assert!(result.is_err());

        env::set_var("CAR_SEARCH_TEST_HUGE_TTL", "9223372036854775807");
        let result: Result<u32> = try_load("CAR_SEARCH_TEST_HUGE_TTL", 60);
        assert!(result.is_err());
    }

    #[test]
    fn set_variable_is_parsed() {
        env::set_var("CAR_SEARCH_TEST_PAGE_SIZE", " 12 ");
        let value: u32 = try_load("CAR_SEARCH_TEST_PAGE_SIZE", 6).unwrap();
        assert_eq!(value, 12);
    }
}
