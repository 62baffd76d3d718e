//! Historique borné des logs et canal de diffusion

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;
use tokio::sync::broadcast;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, reload, Registry};

/// Places du canal `broadcast` ; un client SSE plus lent perd les plus anciens
const CHANNEL_CAPACITY: usize = 1000;

/// Un événement `tracing` tel qu'il est servi par `/log-dump` et `/log-sse`
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: SystemTime,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// État partagé entre le [`SseLayer`](super::SseLayer) et les routes de logs
///
/// Les clones partagent le même historique, le même canal et le même niveau.
#[derive(Clone)]
pub struct LogState {
    history: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
    live: broadcast::Sender<LogEntry>,
    level: Arc<RwLock<Level>>,
    filter: Arc<reload::Handle<LevelFilter, Registry>>,
}

impl LogState {
    /// Historique de `capacity` entrées (au moins une), niveau initial TRACE
    pub fn new(capacity: usize, filter: reload::Handle<LevelFilter, Registry>) -> Self {
        let capacity = capacity.max(1);
        let (live, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            history: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
            live,
            level: Arc::new(RwLock::new(Level::TRACE)),
            filter: Arc::new(filter),
        }
    }

    /// Niveau le plus verbeux encore émis
    pub fn get_max_level(&self) -> Level {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change le niveau servi aux clients et recharge le filtre du subscriber
    pub fn set_max_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
        match self.filter.reload(LevelFilter::from_level(level)) {
            Ok(()) => tracing::debug!(new_level = %level, "Log filter reloaded"),
            Err(e) => tracing::warn!("Log filter cannot be reloaded: {}", e),
        }
    }

    /// Niveau retenu sans toucher au filtre, avant l'installation du subscriber
    pub(crate) fn preset_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub(crate) fn record(&self, entry: LogEntry) {
        {
            let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
            while history.len() >= self.capacity {
                history.pop_front();
            }
            history.push_back(entry.clone());
        }
        // sans abonné l'envoi échoue, l'entrée reste dans l'historique
        let _ = self.live.send(entry);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.live.subscribe()
    }

    /// Copie de l'historique, du plus ancien au plus récent
    pub fn dump(&self) -> Vec<LogEntry> {
        let history = self.history.read().unwrap_or_else(PoisonError::into_inner);
        history.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            timestamp: SystemTime::now(),
            level: "INFO".into(),
            target: "test".into(),
            message: format!("line {}", n),
        }
    }

    #[test]
    fn test_history_drops_oldest() {
        let (_layer, handle) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
        let state = LogState::new(3, handle);
        for n in 0..5 {
            state.record(entry(n));
        }
        let messages: Vec<_> = state.dump().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_subscribers_see_new_entries() {
        let (_layer, handle) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
        let state = LogState::new(3, handle);
        let mut rx = state.subscribe();
        state.record(entry(7));
        assert_eq!(rx.try_recv().unwrap().message, "line 7");
    }

    #[test]
    fn test_level_change() {
        let (_layer, handle) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::INFO);
        let state = LogState::new(3, handle);
        assert_eq!(state.get_max_level(), Level::TRACE);
        state.set_max_level(Level::ERROR);
        assert_eq!(state.clone().get_max_level(), Level::ERROR);
    }
}
