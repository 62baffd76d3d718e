//! Lecture des logs : `/log-dump` en JSON et `/log-sse` en flux

use super::{parse_level, LogEntry, LogState};
use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::Level;

/// Filtres de `/log-sse`
///
/// Sans drapeau de niveau tous les niveaux passent ; avec un ou plusieurs
/// (`?warn=true&error=true`) seuls ceux-là. `search` porte sur le message
/// et la cible.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub warn: Option<bool>,
    #[serde(default)]
    pub info: Option<bool>,
    #[serde(default)]
    pub debug: Option<bool>,
    #[serde(default)]
    pub trace: Option<bool>,
    #[serde(default)]
    pub search: Option<String>,
}

impl LogQuery {
    fn selected_levels(&self) -> Vec<Level> {
        [
            (self.error, Level::ERROR),
            (self.warn, Level::WARN),
            (self.info, Level::INFO),
            (self.debug, Level::DEBUG),
            (self.trace, Level::TRACE),
        ]
        .into_iter()
        .filter_map(|(flag, level)| flag.unwrap_or(false).then_some(level))
        .collect()
    }

    /// Vrai si `entry` est au plus aussi verbeux que `max_level` et passe
    /// les filtres de la requête
    pub fn accepts(&self, entry: &LogEntry, max_level: Level) -> bool {
        let Some(level) = parse_level(&entry.level) else {
            return false;
        };
        if level > max_level {
            return false;
        }
        let selected = self.selected_levels();
        if !selected.is_empty() && !selected.contains(&level) {
            return false;
        }
        match self.search.as_deref() {
            Some(needle) => entry.message.contains(needle) || entry.target.contains(needle),
            None => true,
        }
    }
}

fn to_event(entry: &LogEntry) -> Option<Event> {
    serde_json::to_string(entry)
        .ok()
        .map(|json| Event::default().data(json))
}

/// Historique filtré puis événements en direct
pub async fn log_sse(
    State(state): State<LogState>,
    Query(query): Query<LogQuery>,
) -> impl IntoResponse {
    let mut live = state.subscribe();
    let history = state.dump();

    let stream = async_stream::stream! {
        let level_at_connect = state.get_max_level();
        for entry in history.iter().filter(|e| query.accepts(e, level_at_connect)) {
            if let Some(event) = to_event(entry) {
                yield Ok::<_, axum::Error>(event);
            }
        }

        loop {
            match live.recv().await {
                Ok(entry) => {
                    if !query.accepts(&entry, state.get_max_level()) {
                        continue;
                    }
                    if let Some(event) = to_event(&entry) {
                        yield Ok::<_, axum::Error>(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "SSE client lagging, entries dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn log_dump(State(state): State<LogState>) -> impl IntoResponse {
    Json(state.dump())
}
