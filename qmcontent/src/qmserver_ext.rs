//! Extension qmserver pour le contenu statique

use crate::api_rest::create_router;
use anyhow::Result;
use qmserver::Server;
use tracing::info;

/// Trait pour monter les routes `/api/content/*` sur qmserver
///
/// # Routes enregistrées
///
/// - `GET /api/content/paras` - Les 30 paras et leurs flux
/// - `GET /api/content/paras/{n}` - Un para
/// - `GET /api/content/duas?search=` - Duas, filtrées par mot-clé
/// - `GET /api/content/durood` - Durood
/// - `GET /api/content/naats` - Naats
/// - `GET /api/content/names-of-muhammad?search=` - Noms du Prophète
/// - `GET /api/content/reciters` - Éditions audio
/// - `GET /api/content/methods` - Méthodes de calcul des horaires
/// - `GET /api/content/daily` - Sélection aléatoire du jour
/// - `GET /api/content/audio/surah/{n}?reciter=` - URL de récitation
pub trait ContentApiExt {
    async fn init_content_api(&mut self) -> Result<()>;
}

impl ContentApiExt for Server {
    async fn init_content_api(&mut self) -> Result<()> {
        self.add_router("/api/content", create_router()).await;
        info!("Content API available at /api/content/*");
        Ok(())
    }
}
