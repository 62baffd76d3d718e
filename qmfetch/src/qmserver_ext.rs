//! Extension qmserver pour les ressources Quran
//!
//! Ce module fournit un trait d'extension pour ajouter les routes
//! `/api/quran/*` à un serveur qmserver.

use crate::client::ResourceClient;
use anyhow::Result;
use std::sync::Arc;

/// État partagé pour les handlers Quran
#[derive(Clone)]
pub struct QuranState {
    pub client: Arc<ResourceClient>,
    /// Méthode de calcul utilisée quand la requête n'en précise pas
    pub default_method: u8,
}

impl QuranState {
    pub fn new(client: Arc<ResourceClient>, default_method: u8) -> Self {
        Self {
            client,
            default_method,
        }
    }
}

/// Trait pour étendre qmserver avec les ressources Quran
///
/// `qmserver` reste générique ; `qmfetch` y greffe ses routes sans que le
/// serveur dépende de lui.
///
/// # Exemple
///
/// ```rust,no_run
/// use qmfetch::QuranApiExt;
/// use qmserver::ServerBuilder;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut server = ServerBuilder::new_configured().build();
///     server.init_quran_api().await?;
///
///     server.start().await;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait QuranApiExt {
    /// Crée le client depuis la configuration et enregistre les routes HTTP
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /api/quran/location` - Position approximative
    /// - `GET /api/quran/editions` - Éditions disponibles
    /// - `GET /api/quran/surahs` - Index des sourates
    /// - `GET /api/quran/juz/{n}?edition=` - Un juz
    /// - `GET /api/quran/surah/{n}?edition=` - Une sourate
    /// - `GET /api/quran/ayah/{n}?edition=` - Un verset
    /// - `GET /api/quran/ayah/random` - Verset du jour en arabe, anglais et ourdou
    /// - `GET /api/quran/prayer-times?city=&country=&method=` - Horaires de prière
    /// - `GET /api/quran/names` - Les 99 noms
    async fn init_quran_api(&mut self) -> Result<Arc<QuranState>>;

    /// Enregistre les routes avec un client existant
    async fn init_quran_api_with_client(
        &mut self,
        client: Arc<ResourceClient>,
        default_method: u8,
    ) -> Result<Arc<QuranState>>;
}
