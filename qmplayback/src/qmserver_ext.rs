//! Extension qmserver pour le lecteur de paras
//!
//! `qmplayback` ne connaît pas les tables de contenu : l'appelant fournit
//! la correspondance entre numéro de para et URL du flux.

use crate::api_rest::{create_router, PlayerApiDoc};
use crate::registry::SessionRegistry;
use crate::session::ResourceId;
use anyhow::Result;
use qmserver::Server;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;

/// État partagé pour les handlers du lecteur
#[derive(Clone)]
pub struct PlayerState {
    pub registry: SessionRegistry,
    pub stream_urls: Arc<HashMap<ResourceId, String>>,
}

impl PlayerState {
    pub fn new(registry: SessionRegistry, stream_urls: HashMap<ResourceId, String>) -> Self {
        Self {
            registry,
            stream_urls: Arc::new(stream_urls),
        }
    }
}

/// Trait pour étendre qmserver avec le lecteur
///
/// # Exemple
///
/// ```rust,ignore
/// use qmplayback::{PlayerApiExt, SessionRegistry, Catalog};
///
/// let mut server = qmserver::ServerBuilder::new_configured().build();
/// let urls = qmcontent::paras()
///     .iter()
///     .map(|p| (p.number.into(), p.stream_url.clone()))
///     .collect();
/// server.init_player_api(SessionRegistry::new(Catalog::paras()), urls).await?;
/// ```
pub trait PlayerApiExt {
    /// Enregistre les routes `/api/player/*` et la documentation
    /// `/swagger-ui/player`
    ///
    /// # Routes enregistrées
    ///
    /// - `POST /api/player/sessions` - Nouvelle session
    /// - `GET|DELETE /api/player/sessions/{sid}` - Vue du lecteur, suppression
    /// - `POST /api/player/sessions/{sid}/select/{id}` - Sélection d'un para
    /// - `POST /api/player/sessions/{sid}/stop` - Arrêt
    /// - `GET /api/player/sessions/{sid}/durood` - Compteur
    /// - `POST /api/player/sessions/{sid}/durood/add/{n}` - Incrément
    /// - `POST /api/player/sessions/{sid}/durood/reset` - Remise à zéro
    async fn init_player_api(
        &mut self,
        registry: SessionRegistry,
        stream_urls: HashMap<ResourceId, String>,
    ) -> Result<Arc<PlayerState>>;
}

impl PlayerApiExt for Server {
    async fn init_player_api(
        &mut self,
        registry: SessionRegistry,
        stream_urls: HashMap<ResourceId, String>,
    ) -> Result<Arc<PlayerState>> {
        let missing = registry
            .catalog()
            .ids()
            .filter(|id| !stream_urls.contains_key(id))
            .count();
        if missing > 0 {
            warn!(missing, "Some paras have no stream URL");
        }

        let state = PlayerState::new(registry, stream_urls);
        self.add_openapi(create_router(state.clone()), PlayerApiDoc::openapi(), "player")
            .await;

        info!("Player API available at /api/player/*");

        Ok(Arc::new(state))
    }
}
