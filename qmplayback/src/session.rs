//! Playback session state and its transition function
//!
//! A session holds at most one active Para. Selecting another one while
//! something plays does not switch: the request is parked in
//! `pending_request` and surfaces as a notification until the listener
//! stops the current Para.
//!
//! ```text
//!  Idle ──select(r)──▶ Playing(r) ──select(r)──▶ Playing(r)   (new nonce)
//!                         │
//!                   select(r'≠r)
//!                         ▼
//!                  Blocked(r, r') ──select(r'')──▶ Blocked(r, r'')
//!                                 ──select(r)───▶ Playing(r)  (new nonce)
//!
//!  Playing / Blocked ──stop──▶ Idle          Idle ──stop──▶ Idle
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of Paras in the catalog
pub const PARA_COUNT: u16 = 30;

/// Identifier of a playable resource (a Para number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ResourceId(pub u16);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for ResourceId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Set of valid resource ids, `1..=len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    len: u16,
}

impl Catalog {
    pub fn new(len: u16) -> Self {
        Self { len }
    }

    /// The 30 Paras
    pub fn paras() -> Self {
        Self::new(PARA_COUNT)
    }

    pub fn len(&self) -> u16 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        (1..=self.len).contains(&id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ResourceId> {
        (1..=self.len).map(ResourceId)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::paras()
    }
}

/// User actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum PlaybackEvent {
    Select(ResourceId),
    Stop,
}

/// The three observable states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PlaybackState {
    Idle,
    Playing {
        active: ResourceId,
    },
    Blocked {
        active: ResourceId,
        requested: ResourceId,
    },
}

/// Per-user playback state
///
/// Only [`transition`] produces new values; everything else reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackSession {
    active_id: Option<ResourceId>,
    nonce: u64,
    pending_request: Option<ResourceId>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<ResourceId> {
        self.active_id
    }

    /// Bumped every time the active resource starts or restarts
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn pending_request(&self) -> Option<ResourceId> {
        self.pending_request
    }

    pub fn state(&self) -> PlaybackState {
        match (self.active_id, self.pending_request) {
            (None, _) => PlaybackState::Idle,
            (Some(active), None) => PlaybackState::Playing { active },
            (Some(active), Some(requested)) => PlaybackState::Blocked { active, requested },
        }
    }

    /// Message shown while a switch is blocked
    pub fn notification(&self) -> Option<String> {
        match self.state() {
            PlaybackState::Blocked { active, requested } => Some(format!(
                "Please stop the current Para {} before playing Para {}.",
                active, requested
            )),
            _ => None,
        }
    }

    /// Key of the media element; changes on every (re)start so the player reloads
    pub fn media_key(&self) -> Option<String> {
        self.active_id.map(|id| format!("audio_{}_{}", id, self.nonce))
    }
}

/// Applies `event` to `session`
///
/// Selections outside `catalog` leave the session untouched. The nonce is
/// never reset, so a key handed out once is never reused by the session.
pub fn transition(
    session: &PlaybackSession,
    event: PlaybackEvent,
    catalog: &Catalog,
) -> PlaybackSession {
    match event {
        PlaybackEvent::Select(id) if !catalog.contains(id) => session.clone(),
        PlaybackEvent::Select(id) => match session.active_id {
            None => PlaybackSession {
                active_id: Some(id),
                nonce: session.nonce + 1,
                pending_request: None,
            },
            Some(active) if active == id => PlaybackSession {
                active_id: Some(active),
                nonce: session.nonce + 1,
                pending_request: None,
            },
            Some(active) => PlaybackSession {
                active_id: Some(active),
                nonce: session.nonce,
                pending_request: Some(id),
            },
        },
        PlaybackEvent::Stop => PlaybackSession {
            active_id: None,
            nonce: session.nonce,
            pending_request: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(session: &PlaybackSession, events: &[PlaybackEvent]) -> PlaybackSession {
        let catalog = Catalog::paras();
        events
            .iter()
            .fold(session.clone(), |s, e| transition(&s, *e, &catalog))
    }

    fn select(id: u16) -> PlaybackEvent {
        PlaybackEvent::Select(ResourceId(id))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    #[test]
    fn test_select_from_idle_plays() {
        let s = apply(&PlaybackSession::new(), &[select(5)]);
        assert_eq!(s.state(), PlaybackState::Playing { active: ResourceId(5) });
        assert_eq!(s.nonce(), 1);
        assert!(s.notification().is_none());
    }

    #[test]
    fn test_reselect_changes_only_the_nonce() {
        let first = apply(&PlaybackSession::new(), &[select(5)]);
        let second = apply(&first, &[select(5)]);
        assert_eq!(second.active_id(), first.active_id());
        assert_ne!(second.nonce(), first.nonce());
        assert_ne!(second.media_key(), first.media_key());
        assert_eq!(second.pending_request(), None);
    }

    #[test]
    fn test_switch_is_blocked() {
        let s = apply(&PlaybackSession::new(), &[select(3), select(7)]);
        assert_eq!(s.active_id(), Some(ResourceId(3)));
        assert_eq!(s.pending_request(), Some(ResourceId(7)));
        assert_eq!(
            s.notification().as_deref(),
            Some("Please stop the current Para 3 before playing Para 7.")
        );
    }

    #[test]
    fn test_blocked_request_is_replaced() {
        let s = apply(&PlaybackSession::new(), &[select(3), select(7), select(9)]);
        assert_eq!(
            s.state(),
            PlaybackState::Blocked {
                active: ResourceId(3),
                requested: ResourceId(9)
            }
        );
    }

    #[test]
    fn test_reselect_active_while_blocked_restarts() {
        let blocked = apply(&PlaybackSession::new(), &[select(3), select(7)]);
        let s = apply(&blocked, &[select(3)]);
        assert_eq!(s.state(), PlaybackState::Playing { active: ResourceId(3) });
        assert_eq!(s.nonce(), blocked.nonce() + 1);
    }

    #[test]
    fn test_stop_then_select_pending() {
        let s = apply(
            &PlaybackSession::new(),
            &[select(3), select(7), PlaybackEvent::Stop, select(7)],
        );
        assert_eq!(s.state(), PlaybackState::Playing { active: ResourceId(7) });
        assert!(s.notification().is_none());
    }

    #[test]
    fn test_stop_from_idle_is_noop() {
        let idle = PlaybackSession::new();
        assert_eq!(apply(&idle, &[PlaybackEvent::Stop]), idle);
    }

    #[test]
    fn test_invalid_selection_is_noop() {
        let playing = apply(&PlaybackSession::new(), &[select(4)]);
        assert_eq!(apply(&playing, &[select(0)]), playing);
        assert_eq!(apply(&playing, &[select(31)]), playing);

        let idle = PlaybackSession::new();
        assert_eq!(apply(&idle, &[select(99)]), idle);
    }

    #[test]
    fn test_scenario_5_5_12_stop_12() {
        let catalog = Catalog::paras();
        let mut s = PlaybackSession::new();

        s = transition(&s, select(5), &catalog);
        let n1 = s.nonce();
        assert_eq!(s.state(), PlaybackState::Playing { active: ResourceId(5) });

        s = transition(&s, select(5), &catalog);
        let n2 = s.nonce();
        assert_ne!(n1, n2);
        assert_eq!(s.active_id(), Some(ResourceId(5)));

        s = transition(&s, select(12), &catalog);
        assert_eq!(s.nonce(), n2);
        assert_eq!(
            s.notification().as_deref(),
            Some("Please stop the current Para 5 before playing Para 12.")
        );

        s = transition(&s, PlaybackEvent::Stop, &catalog);
        assert_eq!(s.state(), PlaybackState::Idle);
        assert!(s.media_key().is_none());

        s = transition(&s, select(12), &catalog);
        assert_eq!(s.state(), PlaybackState::Playing { active: ResourceId(12) });
        assert_ne!(s.nonce(), n1);
        assert_ne!(s.nonce(), n2);
    }

    // ========================================================================
    // Presentation helpers
    // ========================================================================

    #[test]
    fn test_media_key_format() {
        let s = apply(&PlaybackSession::new(), &[select(30), select(30)]);
        assert_eq!(s.media_key().as_deref(), Some("audio_30_2"));
    }

    #[test]
    fn test_catalog_bounds() {
        let catalog = Catalog::paras();
        assert!(catalog.contains(ResourceId(1)));
        assert!(catalog.contains(ResourceId(30)));
        assert!(!catalog.contains(ResourceId(0)));
        assert_eq!(catalog.ids().count(), 30);
    }

    #[test]
    fn test_state_serialization() {
        let s = apply(&PlaybackSession::new(), &[select(2), select(8)]);
        let json = serde_json::to_value(s.state()).unwrap();
        assert_eq!(json["state"], "blocked");
        assert_eq!(json["active"], 2);
        assert_eq!(json["requested"], 8);
    }
}
