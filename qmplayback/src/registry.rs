//! Per-user session storage
//!
//! Each listener gets an opaque UUID and its own [`UserSession`]. Mutations
//! run under the write lock, so a session sees one event at a time.
//!
//! Sessions untouched for longer than the registry's TTL are dropped: an
//! expired session answers like an unknown one, and every `create` sweeps
//! the map so abandoned sessions do not pile up.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::controller::PlaybackController;
use crate::counter::DuroodCounter;
use crate::error::{Result, SessionError};
use crate::session::Catalog;

pub type SessionId = Uuid;

/// Idle time after which a session is forgotten (one hour)
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Everything one listener owns
#[derive(Debug, Clone)]
pub struct UserSession {
    pub playback: PlaybackController,
    pub durood: DuroodCounter,
    last_seen: Instant,
}

impl UserSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            playback: PlaybackController::new(catalog),
            durood: DuroodCounter::new(),
            last_seen: Instant::now(),
        }
    }

    /// Time since the last read or update
    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SessionInfo {
    #[cfg_attr(feature = "server", schema(value_type = String, format = Uuid))]
    pub id: SessionId,
}

/// Thread-safe map of sessions, cheap to clone
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, UserSession>>>,
    catalog: Catalog,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl SessionRegistry {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog,
            ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }

    /// Replaces the idle timeout
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Parses a session id coming from a URL
    pub fn parse_id(raw: &str) -> Result<SessionId> {
        Uuid::parse_str(raw).map_err(|_| SessionError::InvalidSessionId(raw.to_string()))
    }

    fn sweep(&self, sessions: &mut HashMap<SessionId, UserSession>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() <= self.ttl);
        before - sessions.len()
    }

    /// Drops every expired session, returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let purged = self.sweep(&mut *self.sessions.write().await);
        if purged > 0 {
            info!(purged, "Expired sessions removed");
        }
        purged
    }

    pub async fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let purged = self.sweep(&mut sessions);
        sessions.insert(id, UserSession::new(self.catalog));
        info!(session = %id, purged, "Session created");
        id
    }

    /// Live session for `id`, touched; expired entries are removed on the way
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<SessionId, UserSession>,
        id: &SessionId,
    ) -> Result<&'a mut UserSession> {
        let expired = match sessions.get(id) {
            Some(session) => session.idle_for() > self.ttl,
            None => return Err(SessionError::UnknownSession(id.to_string())),
        };
        if expired {
            sessions.remove(id);
            info!(session = %id, "Session expired");
            return Err(SessionError::UnknownSession(id.to_string()));
        }
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        session.touch();
        Ok(session)
    }

    /// Snapshot of a session
    pub async fn get(&self, id: &SessionId) -> Result<UserSession> {
        let mut sessions = self.sessions.write().await;
        self.live(&mut sessions, id).map(|session| session.clone())
    }

    /// Runs `f` on the session under the write lock
    pub async fn update<F, T>(&self, id: &SessionId, f: F) -> Result<T>
    where
        F: FnOnce(&mut UserSession) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = self.live(&mut sessions, id)?;
        debug!(session = %id, "Updating session");
        Ok(f(session))
    }

    pub async fn remove(&self, id: &SessionId) -> Result<()> {
        match self.sessions.write().await.remove(id) {
            Some(_) => {
                info!(session = %id, "Session removed");
                Ok(())
            }
            None => Err(SessionError::UnknownSession(id.to_string())),
        }
    }

    /// Stored sessions, expired ones not yet swept included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{PlaybackState, ResourceId};

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::default();
        let a = registry.create().await;
        let b = registry.create().await;
        assert_ne!(a, b);

        registry
            .update(&a, |s| s.playback.select(ResourceId(5)))
            .await
            .unwrap();
        registry.update(&b, |s| s.durood.add(10)).await.unwrap();

        let a_session = registry.get(&a).await.unwrap();
        let b_session = registry.get(&b).await.unwrap();
        assert_eq!(
            a_session.playback.view().state,
            PlaybackState::Playing { active: ResourceId(5) }
        );
        assert_eq!(a_session.durood.count(), 0);
        assert_eq!(b_session.playback.view().state, PlaybackState::Idle);
        assert_eq!(b_session.durood.count(), 10);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let registry = SessionRegistry::default();
        let id = Uuid::new_v4();
        assert_eq!(
            registry.get(&id).await.unwrap_err(),
            SessionError::UnknownSession(id.to_string())
        );
        assert!(registry.update(&id, |s| s.durood.reset()).await.is_err());
        assert!(registry.remove(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = SessionRegistry::default();
        let id = registry.create().await;
        assert_eq!(registry.len().await, 1);
        registry.remove(&id).await.unwrap();
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let registry = SessionRegistry::default().with_ttl(Duration::from_millis(30));
        let id = registry.create().await;
        assert!(registry.get(&id).await.is_ok());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(
            registry.get(&id).await.unwrap_err(),
            SessionError::UnknownSession(id.to_string())
        );
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_activity_keeps_session_alive() {
        let registry = SessionRegistry::default().with_ttl(Duration::from_millis(300));
        let id = registry.create().await;
        for _ in 0..4 {
            tokio::time::sleep(Duration::from_millis(120)).await;
            registry.update(&id, |s| s.durood.add(1)).await.unwrap();
        }
        assert_eq!(registry.get(&id).await.unwrap().durood.count(), 4);
    }

    #[tokio::test]
    async fn test_create_sweeps_abandoned_sessions() {
        let registry = SessionRegistry::default().with_ttl(Duration::from_millis(30));
        for _ in 0..3 {
            registry.create().await;
        }
        assert_eq!(registry.len().await, 3);

        tokio::time::sleep(Duration::from_millis(80)).await;
        let fresh = registry.create().await;
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&fresh).await.is_ok());
        assert_eq!(registry.purge_expired().await, 0);
    }

    #[test]
    fn test_parse_id() {
        assert!(SessionRegistry::parse_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(SessionRegistry::parse_id(&id.to_string()).unwrap(), id);
    }
}
