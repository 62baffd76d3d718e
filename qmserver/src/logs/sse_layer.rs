//! Layer `tracing` qui alimente le buffer circulaire de [`LogState`]

use super::{LogEntry, LogState};
use std::fmt::{self, Write as _};
use std::time::SystemTime;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Layer qui copie chaque événement dans le buffer partagé et le diffuse
/// aux clients SSE connectés
#[derive(Clone)]
pub struct SseLayer {
    state: LogState,
}

impl SseLayer {
    pub fn new(state: LogState) -> Self {
        Self { state }
    }
}

/// Collecte le champ `message` puis les autres champs sous forme `clé=valeur`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S> Layer<S> for SseLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut message = visitor.message;
        message.push_str(&visitor.fields);

        self.state.record(LogEntry {
            timestamp: SystemTime::now(),
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::{filter::LevelFilter, reload, Registry};

    #[test]
    fn test_events_reach_the_buffer() {
        let (_filter, handle) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::TRACE);
        let state = LogState::new(4, handle);
        let subscriber = Registry::default().with(SseLayer::new(state.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(endpoint = "location", "falling back");
            for i in 0..5 {
                tracing::info!("tick {}", i);
            }
        });

        let entries = state.dump();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].message, "tick 1");
        assert_eq!(entries[3].message, "tick 4");
        assert_eq!(entries[3].level, "INFO");
    }

    #[test]
    fn test_extra_fields_are_appended() {
        let (_filter, handle) = reload::Layer::<LevelFilter, Registry>::new(LevelFilter::TRACE);
        let state = LogState::new(8, handle);
        let subscriber = Registry::default().with(SseLayer::new(state.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(endpoint = "location", "falling back");
        });

        let entries = state.dump();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "falling back endpoint=location");
        assert_eq!(entries[0].level, "WARN");
    }
}
