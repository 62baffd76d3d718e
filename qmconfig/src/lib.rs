//! # Quran Majeed configuration
//!
//! One YAML document shared by every crate of the workspace. It is built
//! from three layers, later layers winning:
//!
//! 1. the defaults compiled into the binary (`qmconfig.yaml`)
//! 2. `config.yaml` in the configuration directory
//! 3. `QURANMAJEED_CONFIG__SECTION__KEY=value` environment variables
//!
//! The merged document is written back to `config.yaml` at load time and
//! after every setter, so the file always lists every known setting.
//!
//! ```no_run
//! use qmconfig::get_config;
//!
//! let config = get_config();
//! let port = config.get_http_port();
//! config.set_http_port(9000)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Crates with settings of their own extend [`Config`] with a trait
//! (`qmfetch::FetcherConfigExt` for instance) instead of adding getters here.

mod tree;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use serde_yaml::{Number, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, info, warn};

const EMBEDDED_DEFAULTS: &str = include_str!("qmconfig.yaml");
const CONFIG_FILE: &str = "config.yaml";

const ENV_CONFIG_DIR: &str = "QURANMAJEED_CONFIG";
const ENV_PREFIX: &str = "QURANMAJEED_CONFIG__";
const CONFIG_DIR_NAME: &str = ".quranmajeed";

const HOST_PORT: &[&str] = &["host", "http_port"];
const HOST_BASE_URL: &[&str] = &["host", "base_url"];
const LOGGER_CAPACITY: &[&str] = &["host", "logger", "buffer_capacity"];
const LOGGER_CONSOLE: &[&str] = &["host", "logger", "enable_console"];
const LOGGER_LEVEL: &[&str] = &["host", "logger", "min_level"];

const FALLBACK_PORT: u16 = 8080;
const FALLBACK_BASE_URL: &str = "127.0.0.1";

lazy_static! {
    static ref CONFIG: Arc<Config> = Arc::new(
        Config::load_config("").expect("Quran Majeed configuration cannot be loaded")
    );
}

/// Merged configuration document
///
/// Cloning copies the current tree; the copy still persists to the same
/// file.
#[derive(Debug)]
pub struct Config {
    dir: String,
    file: PathBuf,
    tree: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            file: self.file.clone(),
            tree: Mutex::new(self.tree().clone()),
        }
    }
}

/// Where the configuration lives when the caller does not say
fn default_dir() -> String {
    if let Ok(from_env) = env::var(ENV_CONFIG_DIR) {
        debug!(variable = ENV_CONFIG_DIR, dir = %from_env, "Configuration directory from environment");
        return from_env;
    }
    if Path::new(CONFIG_DIR_NAME).is_dir() {
        return CONFIG_DIR_NAME.to_string();
    }
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .filter(|candidate| candidate.is_dir())
        .map(|candidate| candidate.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_DIR_NAME.to_string())
}

/// Creates `dir` when needed and checks that it can be written
fn ensure_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create configuration directory {}", dir.display()))?;
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let marker = dir.join(".write-test");
    fs::write(&marker, b"")
        .with_context(|| format!("Configuration directory {} is read-only", dir.display()))?;
    fs::remove_file(&marker)?;
    Ok(())
}

impl Config {
    /// Resolves the configuration directory and makes sure it is usable
    ///
    /// An empty `directory` falls back to `$QURANMAJEED_CONFIG`, then to
    /// `./.quranmajeed`, then to `~/.quranmajeed`. The last candidate is
    /// created if none exists.
    pub fn config_dir(directory: &str) -> Result<String> {
        let dir = if directory.is_empty() {
            default_dir()
        } else {
            directory.to_string()
        };
        ensure_writable(Path::new(&dir))?;
        Ok(dir)
    }

    /// Builds the configuration stored in `directory` (see [`Config::config_dir`]
    /// for the empty string)
    pub fn load_config(directory: &str) -> Result<Self> {
        let dir = Self::config_dir(directory)?;
        let file = Path::new(&dir).join(CONFIG_FILE);

        let defaults: Value = serde_yaml::from_str(EMBEDDED_DEFAULTS)
            .context("Embedded default configuration is not valid YAML")?;
        let mut tree = tree::lowercase_keys(defaults);

        match fs::read_to_string(&file) {
            Ok(text) => {
                let user: Value = serde_yaml::from_str(&text)
                    .with_context(|| format!("Invalid YAML in {}", file.display()))?;
                // lower-cased first so a user `Host:` merges into the default `host:`
                tree::overlay(&mut tree, tree::lowercase_keys(user));
                info!(file = %file.display(), "Configuration file loaded");
            }
            Err(_) => info!(file = %file.display(), "No configuration file yet, starting from defaults"),
        }

        tree::apply_env(&mut tree, ENV_PREFIX, env::vars());

        let config = Config {
            dir,
            file,
            tree: Mutex::new(tree),
        };
        config.save()?;
        Ok(config)
    }

    fn tree(&self) -> MutexGuard<'_, Value> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Directory holding `config.yaml`
    pub fn directory(&self) -> &str {
        &self.dir
    }

    /// Writes the whole document to `config.yaml`
    pub fn save(&self) -> Result<()> {
        let text = serde_yaml::to_string(&*self.tree())?;
        fs::write(&self.file, text)
            .with_context(|| format!("Cannot write {}", self.file.display()))
    }

    /// Replaces the value at `path` (e.g. `&["host", "http_port"]`) and saves
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        tree::assign(&mut self.tree(), path, value)?;
        self.save()
    }

    /// Copy of the value at `path`, an error when nothing is stored there
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        tree::lookup(&self.tree(), path).cloned()
    }

    /// Host name the HTTP server advertises
    pub fn get_base_url(&self) -> String {
        match self.get_value(HOST_BASE_URL) {
            Ok(Value::String(host)) if !host.is_empty() => host,
            other => {
                warn!(found = ?other.ok(), "No usable host.base_url, serving on {}", FALLBACK_BASE_URL);
                FALLBACK_BASE_URL.to_string()
            }
        }
    }

    /// Listening port; numbers and numeric strings are accepted
    pub fn get_http_port(&self) -> u16 {
        let port = match self.get_value(HOST_PORT) {
            Ok(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Ok(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        port.unwrap_or_else(|| {
            warn!("No usable host.http_port, listening on {}", FALLBACK_PORT);
            FALLBACK_PORT
        })
    }

    pub fn set_http_port(&self, port: u16) -> Result<()> {
        self.set_value(HOST_PORT, Value::Number(Number::from(port)))
    }

    /// Number of log lines kept for `/log-dump`
    pub fn get_log_cache_size(&self) -> Result<usize> {
        match self.get_value(LOGGER_CAPACITY)? {
            Value::Number(n) => n
                .as_u64()
                .map(|n| n as usize)
                .with_context(|| format!("Log buffer capacity {} is not a count", n)),
            other => bail!("Log buffer capacity {:?} is not a number", other),
        }
    }

    pub fn set_log_cache_size(&self, size: usize) -> Result<()> {
        self.set_value(LOGGER_CAPACITY, Value::Number(Number::from(size)))
    }

    pub fn get_log_enable_console(&self) -> Result<bool> {
        match self.get_value(LOGGER_CONSOLE)? {
            Value::Bool(enabled) => Ok(enabled),
            other => bail!("host.logger.enable_console {:?} is not a boolean", other),
        }
    }

    pub fn set_log_enable_console(&self, enabled: bool) -> Result<()> {
        self.set_value(LOGGER_CONSOLE, Value::Bool(enabled))
    }

    /// Level name such as `INFO` or `debug`; parsing is left to the logger
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(LOGGER_LEVEL)? {
            Value::String(level) => Ok(level),
            other => bail!("host.logger.min_level {:?} is not a level name", other),
        }
    }

    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(LOGGER_LEVEL, Value::String(level))
    }
}

/// Process-wide configuration, loaded on first call
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_in(dir: &tempfile::TempDir) -> Config {
        Config::load_config(dir.path().to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_load_defaults_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_in(&dir);

        assert_eq!(config.get_http_port(), 8080);
        assert_eq!(config.get_log_cache_size().unwrap(), 1000);
        assert!(config.get_log_enable_console().unwrap());
        assert_eq!(config.get_log_min_level().unwrap(), "INFO");
        assert!(dir.path().join(CONFIG_FILE).exists());

        config.set_http_port(9000).unwrap();
        let reloaded = load_in(&dir);
        assert_eq!(reloaded.get_http_port(), 9000);
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "Host:\n  HTTP_Port: \"7000\"\n  logger:\n    min_level: debug\n",
        )
        .unwrap();

        let config = load_in(&dir);
        assert_eq!(config.get_http_port(), 7000);
        assert_eq!(config.get_log_min_level().unwrap(), "debug");
        assert_eq!(config.get_log_cache_size().unwrap(), 1000);
        assert_eq!(config.get_base_url(), "127.0.0.1");
    }

    #[test]
    fn test_mixed_case_section_keeps_sibling_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "Host:\n  HTTP_Port: 7000\n").unwrap();

        let config = load_in(&dir);
        assert_eq!(config.get_http_port(), 7000);
        assert_eq!(
            config.get_value(HOST_BASE_URL).unwrap(),
            Value::String("127.0.0.1".into())
        );
        assert_eq!(config.get_log_cache_size().unwrap(), 1000);
        assert!(config.get_log_enable_console().unwrap());

        // the saved file is lower-cased, a reload sees the same values
        let reloaded = load_in(&dir);
        assert_eq!(reloaded.get_http_port(), 7000);
        assert_eq!(reloaded.get_log_min_level().unwrap(), "INFO");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_in(&dir);
        config
            .set_value(HOST_PORT, Value::Number(Number::from(70000)))
            .unwrap();
        assert_eq!(config.get_http_port(), FALLBACK_PORT);

        config.set_value(HOST_BASE_URL, Value::String(String::new())).unwrap();
        assert_eq!(config.get_base_url(), FALLBACK_BASE_URL);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_in(&dir);
        assert!(config.get_value(&["nope", "missing"]).is_err());
    }
}
