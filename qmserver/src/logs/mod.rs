//! Logs du service : historique, diffusion SSE et niveau réglable
//!
//! [`init_logging`] installe un subscriber `tracing` composé d'un filtre
//! rechargeable, du [`SseLayer`] et, si demandé, de la sortie console.
//! Le [`LogState`] renvoyé alimente les routes montées par
//! `Server::attach_logs`.

mod setup;
mod sse_layer;
mod state;
mod stream;

pub use setup::{
    create_logs_router, log_setup_get, log_setup_post, LogSetupRequest, LogSetupResponse,
    LogsApiDoc,
};
pub use sse_layer::SseLayer;
pub use state::{LogEntry, LogState};
pub use stream::{log_dump, log_sse, LogQuery};

use qmconfig::Config;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, reload, util::SubscriberInitExt, Registry};

/// `"warn"`, `" Debug "`, `"INFO"`... ; `None` pour un nom inconnu
pub(crate) fn parse_level(name: &str) -> Option<Level> {
    let name = name.trim();
    if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Entrées gardées pour `/log-dump` et le début de `/log-sse`
    pub buffer_capacity: usize,
    pub enable_console: bool,
    pub min_level: Level,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 1000,
            enable_console: true,
            min_level: Level::INFO,
        }
    }
}

impl LoggingOptions {
    /// Section `host.logger` ; une valeur absente ou invalide garde son défaut
    pub fn from_config(config: &Config) -> Self {
        let mut options = Self::default();
        if let Ok(capacity) = config.get_log_cache_size() {
            options.buffer_capacity = capacity;
        }
        if let Ok(console) = config.get_log_enable_console() {
            options.enable_console = console;
        }
        if let Some(level) = config
            .get_log_min_level()
            .ok()
            .and_then(|name| parse_level(&name))
        {
            options.min_level = level;
        }
        options
    }
}

/// Installe le subscriber global
///
/// Si un subscriber est déjà en place (double appel, tests) le nouveau est
/// ignoré ; le `LogState` renvoyé reste utilisable mais ne reçoit rien.
///
/// ```rust,no_run
/// use qmserver::logs::{init_logging, LoggingOptions};
///
/// let log_state = init_logging(LoggingOptions::default());
/// ```
pub fn init_logging(options: LoggingOptions) -> LogState {
    let (filter, handle) = reload::Layer::new(LevelFilter::from_level(options.min_level));
    let state = LogState::new(options.buffer_capacity, handle);
    state.preset_level(options.min_level);

    // le filtre passe avant le SseLayer pour que le buffer suive le niveau
    let console = options
        .enable_console
        .then(|| tracing_subscriber::fmt::layer().with_target(true));
    let installed = Registry::default()
        .with(filter)
        .with(SseLayer::new(state.clone()))
        .with(console)
        .try_init();

    if let Err(e) = installed {
        tracing::warn!("A global tracing subscriber is already installed: {}", e);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level(" Debug "), Some(Level::DEBUG));
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level("3"), None);
    }

    #[test]
    fn test_options_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        config.set_log_min_level("debug".to_string()).unwrap();
        config.set_log_cache_size(50).unwrap();

        let options = LoggingOptions::from_config(&config);
        assert_eq!(options.min_level, Level::DEBUG);
        assert_eq!(options.buffer_capacity, 50);
        assert!(options.enable_console);
    }
}
