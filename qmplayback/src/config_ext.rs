//! Player settings stored in qmconfig
//!
//! ```no_run
//! use qmconfig::get_config;
//! use qmplayback::{Catalog, PlayerConfigExt, SessionRegistry};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = get_config();
//! let registry = SessionRegistry::from_config(Catalog::paras(), &config)?;
//! # Ok(())
//! # }
//! ```

use crate::registry::{SessionRegistry, DEFAULT_SESSION_TTL_SECS};
use crate::session::Catalog;
use anyhow::Result;
use qmconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

const SESSION_TTL: &[&str] = &["player", "session_ttl_secs"];

/// Extension trait for the `player` section
pub trait PlayerConfigExt {
    /// Idle time before a listener session is dropped (default one hour)
    fn get_player_session_ttl(&self) -> Result<Duration>;
    fn set_player_session_ttl(&self, secs: u64) -> Result<()>;
}

impl PlayerConfigExt for Config {
    fn get_player_session_ttl(&self) -> Result<Duration> {
        match self.get_value(SESSION_TTL) {
            Ok(Value::Number(n)) => match n.as_u64() {
                Some(secs) if secs > 0 => return Ok(Duration::from_secs(secs)),
                _ => tracing::warn!(
                    "Invalid player.session_ttl_secs {}, using {}",
                    n,
                    DEFAULT_SESSION_TTL_SECS
                ),
            },
            Ok(other) => tracing::warn!(
                found = ?other,
                "player.session_ttl_secs is not a number, using {}",
                DEFAULT_SESSION_TTL_SECS
            ),
            Err(_) => {}
        }
        self.set_player_session_ttl(DEFAULT_SESSION_TTL_SECS)?;
        Ok(Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }

    fn set_player_session_ttl(&self, secs: u64) -> Result<()> {
        self.set_value(SESSION_TTL, Value::Number(secs.into()))
    }
}

impl SessionRegistry {
    /// Registry over `catalog` with the configured idle timeout
    pub fn from_config(catalog: Catalog, config: &Config) -> Result<Self> {
        Ok(Self::new(catalog).with_ttl(config.get_player_session_ttl()?))
    }
}
