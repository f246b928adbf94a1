use std::env;
use std::fmt::Display;
use std::str::FromStr;

use recipe_client::PROVIDER_BASE_URL;
use recipe_logging::{recipe_info, recipe_warn};
use thiserror::Error;
use url::Url;

pub const DEFAULT_PORT: u16 = 8888;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub port: u16,
    /// Provider credential; requests other than preflight fail without it.
    pub api_key: Option<String>,
    pub base_url: Url,
}

impl ForwarderConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("SPOONACULAR_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            recipe_warn!("SPOONACULAR_API_KEY not set, provider requests will be refused");
        }

        Ok(Self {
            port: try_load(&lookup, "FORWARDER_PORT", &DEFAULT_PORT.to_string())?,
            api_key,
            base_url: try_load(&lookup, "SPOONACULAR_BASE_URL", PROVIDER_BASE_URL)?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        recipe_info!("{} not set, using default: {}", key, default);
        default.to_string()
    });
    value.parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}
