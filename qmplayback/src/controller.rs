//! Stateful wrapper around [`transition`] that logs every change

use crate::session::{
    transition, Catalog, PlaybackEvent, PlaybackSession, PlaybackState, ResourceId,
};
use serde::Serialize;
use tracing::{debug, info};

/// What the presentation layer needs to render the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct PlaybackView {
    #[serde(flatten)]
    pub state: PlaybackState,
    pub active_id: Option<ResourceId>,
    pub nonce: u64,
    pub pending_request: Option<ResourceId>,
    pub media_key: Option<String>,
    pub notification: Option<String>,
}

impl From<&PlaybackSession> for PlaybackView {
    fn from(session: &PlaybackSession) -> Self {
        Self {
            state: session.state(),
            active_id: session.active_id(),
            nonce: session.nonce(),
            pending_request: session.pending_request(),
            media_key: session.media_key(),
            notification: session.notification(),
        }
    }
}

/// Single-slot player for one listener
#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    session: PlaybackSession,
    catalog: Catalog,
}

impl PlaybackController {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            session: PlaybackSession::new(),
            catalog,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> PlaybackView {
        PlaybackView::from(&self.session)
    }

    pub fn apply(&mut self, event: PlaybackEvent) -> PlaybackView {
        let before = self.session.state();
        let next = transition(&self.session, event, &self.catalog);

        if next == self.session {
            debug!(?event, state = ?before, "Playback event ignored");
        } else {
            info!(?event, from = ?before, to = ?next.state(), nonce = next.nonce(), "Playback transition");
        }

        self.session = next;
        self.view()
    }

    /// Requests playback of `id`
    pub fn select(&mut self, id: ResourceId) -> PlaybackView {
        self.apply(PlaybackEvent::Select(id))
    }

    pub fn stop(&mut self) -> PlaybackView {
        self.apply(PlaybackEvent::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_round() {
        let mut player = PlaybackController::new(Catalog::paras());
        let view = player.select(ResourceId(1));
        assert_eq!(view.media_key.as_deref(), Some("audio_1_1"));

        let view = player.select(ResourceId(2));
        assert_eq!(view.active_id, Some(ResourceId(1)));
        assert_eq!(view.pending_request, Some(ResourceId(2)));
        assert!(view.notification.is_some());

        let view = player.stop();
        assert_eq!(view.state, PlaybackState::Idle);
        assert_eq!(view.nonce, 1);

        let view = player.select(ResourceId(2));
        assert_eq!(view.media_key.as_deref(), Some("audio_2_2"));
    }

    #[test]
    fn test_view_serialization_is_flat() {
        let mut player = PlaybackController::default();
        let view = player.select(ResourceId(9));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "playing");
        assert_eq!(json["active"], 9);
        assert_eq!(json["active_id"], 9);
        assert_eq!(json["notification"], serde_json::Value::Null);
    }
}
