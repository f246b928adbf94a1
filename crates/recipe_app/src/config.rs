use std::env;
use std::path::PathBuf;

use recipe_client::{ApiMode, PROVIDER_BASE_URL};
use recipe_logging::{recipe_info, recipe_warn};
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8888/api/recipes";
pub const DEFAULT_DATA_DIR: &str = "./.recipe_data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RECIPE_API_MODE must be `direct` or `forwarded`, got {0:?}")]
    UnknownMode(String),
    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
    #[error("direct mode needs RECIPE_DEV_API_KEY")]
    MissingDevKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: ApiMode,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode_name = lookup("RECIPE_API_MODE").unwrap_or_else(|| "forwarded".to_string());
        let mode = match mode_name.trim().to_ascii_lowercase().as_str() {
            "forwarded" => ApiMode::Forwarded {
                endpoint: url_var(&lookup, "RECIPE_API_ENDPOINT", DEFAULT_ENDPOINT)?,
            },
            "direct" => {
                let api_key = lookup("RECIPE_DEV_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .ok_or(ConfigError::MissingDevKey)?;
                recipe_warn!("Direct mode: the provider key lives in this process");
                ApiMode::Direct {
                    base_url: url_var(&lookup, "RECIPE_API_BASE", PROVIDER_BASE_URL)?,
                    api_key: api_key.trim().to_string(),
                }
            }
            _ => return Err(ConfigError::UnknownMode(mode_name)),
        };

        let data_dir = lookup("RECIPE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self { mode, data_dir })
    }
}

fn url_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = lookup(key).unwrap_or_else(|| {
        recipe_info!("{} not set, using default: {}", key, default);
        default.to_string()
    });
    Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        key,
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn forwarded_is_the_default() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.mode,
            ApiMode::Forwarded {
                endpoint: Url::parse(DEFAULT_ENDPOINT).unwrap()
            }
        );
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn direct_mode_requires_key() {
        let pairs = [("RECIPE_API_MODE", "direct")];
        assert_eq!(
            AppConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::MissingDevKey)
        );

        let pairs = [
            ("RECIPE_API_MODE", "Direct"),
            ("RECIPE_DEV_API_KEY", "abc"),
            ("RECIPE_DATA_DIR", "/tmp/recipes"),
        ];
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        match config.mode {
            ApiMode::Direct { base_url, api_key } => {
                assert_eq!(base_url.as_str(), "https://api.spoonacular.com/");
                assert_eq!(api_key, "abc");
            }
            other => panic!("unexpected mode {other:?}"),
        }
        assert_eq!(config.data_dir, PathBuf::from("/tmp/recipes"));
    }

    #[test]
    fn rejects_unknown_mode_and_bad_url() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("RECIPE_API_MODE", "proxy")])),
            Err(ConfigError::UnknownMode("proxy".into()))
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("RECIPE_API_ENDPOINT", "not a url")])),
            Err(ConfigError::InvalidUrl {
                key: "RECIPE_API_ENDPOINT",
                ..
            })
        ));
    }
}
