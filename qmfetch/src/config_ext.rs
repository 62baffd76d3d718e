//! Fetcher settings stored in qmconfig
//!
//! The trait [`FetcherConfigExt`] adds typed accessors for the `fetcher` and
//! `prayer` sections of the configuration. Getters persist their default
//! value when the key is missing, so a fresh `config.yaml` documents every
//! setting.
//!
//! ```no_run
//! use qmconfig::get_config;
//! use qmfetch::{FetcherConfigExt, ResourceClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = get_config();
//! let client = ResourceClient::from_config(&config).await?;
//! println!("Method {}", config.get_prayer_default_method()?);
//! # Ok(())
//! # }
//! ```

use crate::client::{
    ClientBuilder, Endpoints, ResourceClient, DEFAULT_CALCULATION_METHOD,
    DEFAULT_GEOLOCATION_URL, DEFAULT_LONG_TIMEOUT_SECS, DEFAULT_NAMES_URL,
    DEFAULT_PRAYER_BASE_URL, DEFAULT_QURAN_BASE_URL, DEFAULT_SHORT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use anyhow::Result;
use qmconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

/// Extension trait for fetcher configuration
pub trait FetcherConfigExt {
    /// Timeout of location, editions and surahs lookups (default 5 s)
    fn get_fetcher_short_timeout(&self) -> Result<Duration>;
    fn set_fetcher_short_timeout(&self, secs: u64) -> Result<()>;

    /// Timeout of juz, surah, ayah, prayer and names lookups (default 10 s)
    fn get_fetcher_long_timeout(&self) -> Result<Duration>;
    fn set_fetcher_long_timeout(&self, secs: u64) -> Result<()>;

    fn get_fetcher_user_agent(&self) -> Result<String>;

    /// All upstream URLs
    fn get_fetcher_endpoints(&self) -> Result<Endpoints>;
    fn set_fetcher_endpoint(&self, name: &str, url: &str) -> Result<()>;

    /// Calculation method used when a request does not name one (default 3)
    fn get_prayer_default_method(&self) -> Result<u8>;
    fn set_prayer_default_method(&self, method: u8) -> Result<()>;
}

fn secs_or_default(config: &Config, key: &str, default: u64) -> Result<u64> {
    match config.get_value(&["fetcher", key]) {
        Ok(Value::Number(n)) => match n.as_u64() {
            Some(secs) if secs > 0 => Ok(secs),
            _ => {
                config.set_value(&["fetcher", key], Value::Number(default.into()))?;
                Ok(default)
            }
        },
        _ => {
            config.set_value(&["fetcher", key], Value::Number(default.into()))?;
            Ok(default)
        }
    }
}

fn endpoint_or_default(config: &Config, name: &str, default: &str) -> Result<String> {
    match config.get_value(&["fetcher", "endpoints", name]) {
        Ok(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => {
            config.set_fetcher_endpoint(name, default)?;
            Ok(default.to_string())
        }
    }
}

impl FetcherConfigExt for Config {
    fn get_fetcher_short_timeout(&self) -> Result<Duration> {
        secs_or_default(self, "short_timeout_secs", DEFAULT_SHORT_TIMEOUT_SECS)
            .map(Duration::from_secs)
    }

    fn set_fetcher_short_timeout(&self, secs: u64) -> Result<()> {
        self.set_value(
            &["fetcher", "short_timeout_secs"],
            Value::Number(secs.into()),
        )
    }

    fn get_fetcher_long_timeout(&self) -> Result<Duration> {
        secs_or_default(self, "long_timeout_secs", DEFAULT_LONG_TIMEOUT_SECS)
            .map(Duration::from_secs)
    }

    fn set_fetcher_long_timeout(&self, secs: u64) -> Result<()> {
        self.set_value(&["fetcher", "long_timeout_secs"], Value::Number(secs.into()))
    }

    fn get_fetcher_user_agent(&self) -> Result<String> {
        match self.get_value(&["fetcher", "user_agent"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => {
                self.set_value(
                    &["fetcher", "user_agent"],
                    Value::String(DEFAULT_USER_AGENT.to_string()),
                )?;
                Ok(DEFAULT_USER_AGENT.to_string())
            }
        }
    }

    fn get_fetcher_endpoints(&self) -> Result<Endpoints> {
        Ok(Endpoints {
            geolocation: endpoint_or_default(self, "geolocation", DEFAULT_GEOLOCATION_URL)?,
            quran: endpoint_or_default(self, "quran", DEFAULT_QURAN_BASE_URL)?,
            prayer: endpoint_or_default(self, "prayer", DEFAULT_PRAYER_BASE_URL)?,
            names: endpoint_or_default(self, "names", DEFAULT_NAMES_URL)?,
        })
    }

    fn set_fetcher_endpoint(&self, name: &str, url: &str) -> Result<()> {
        self.set_value(
            &["fetcher", "endpoints", name],
            Value::String(url.to_string()),
        )
    }

    fn get_prayer_default_method(&self) -> Result<u8> {
        match self.get_value(&["prayer", "default_method"]) {
            Ok(Value::Number(n)) => match n.as_u64().and_then(|m| u8::try_from(m).ok()) {
                Some(method) => Ok(method),
                None => {
                    tracing::warn!(
                        "Invalid calculation method {}, using {}",
                        n,
                        DEFAULT_CALCULATION_METHOD
                    );
                    Ok(DEFAULT_CALCULATION_METHOD)
                }
            },
            _ => {
                self.set_prayer_default_method(DEFAULT_CALCULATION_METHOD)?;
                Ok(DEFAULT_CALCULATION_METHOD)
            }
        }
    }

    fn set_prayer_default_method(&self, method: u8) -> Result<()> {
        self.set_value(&["prayer", "default_method"], Value::Number(method.into()))
    }
}

impl ClientBuilder {
    /// Builder preloaded with the configured endpoints, timeouts and user agent
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new()
            .endpoints(config.get_fetcher_endpoints()?)
            .short_timeout(config.get_fetcher_short_timeout()?)
            .long_timeout(config.get_fetcher_long_timeout()?)
            .user_agent(config.get_fetcher_user_agent()?))
    }
}

impl ResourceClient {
    /// Client configured from qmconfig
    pub async fn from_config(config: &Config) -> Result<Self> {
        Ok(ClientBuilder::from_config(config)?.build().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config::load_config(dir.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_from_embedded_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        assert_eq!(config.get_fetcher_short_timeout().unwrap(), Duration::from_secs(5));
        assert_eq!(config.get_fetcher_long_timeout().unwrap(), Duration::from_secs(10));
        assert_eq!(config.get_fetcher_endpoints().unwrap(), Endpoints::default());
        assert_eq!(config.get_prayer_default_method().unwrap(), 3);
    }

    #[test]
    fn test_overrides_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        config.set_fetcher_long_timeout(2).unwrap();
        config
            .set_fetcher_endpoint("quran", "http://localhost:4000/v1")
            .unwrap();
        config.set_prayer_default_method(4).unwrap();

        let reloaded = config_in(&dir);
        assert_eq!(reloaded.get_fetcher_long_timeout().unwrap(), Duration::from_secs(2));
        assert_eq!(
            reloaded.get_fetcher_endpoints().unwrap().quran,
            "http://localhost:4000/v1"
        );
        assert_eq!(reloaded.get_prayer_default_method().unwrap(), 4);
    }

    #[test]
    fn test_zero_timeout_restores_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        config.set_fetcher_short_timeout(0).unwrap();
        assert_eq!(config.get_fetcher_short_timeout().unwrap(), Duration::from_secs(5));
    }
}
