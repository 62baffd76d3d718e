//! Implémentation du trait [`QuranApiExt`](crate::QuranApiExt) pour qmserver::Server

use crate::api_rest::create_router;
use crate::client::ResourceClient;
use crate::config_ext::FetcherConfigExt;
use crate::qmserver_ext::{QuranApiExt, QuranState};
use anyhow::Result;
use qmserver::Server;
use std::sync::Arc;
use tracing::info;

impl QuranApiExt for Server {
    async fn init_quran_api(&mut self) -> Result<Arc<QuranState>> {
        info!("Initializing Quran API...");

        let config = qmconfig::get_config();
        let client = ResourceClient::from_config(&config).await?;
        let default_method = config.get_prayer_default_method()?;

        self.init_quran_api_with_client(Arc::new(client), default_method)
            .await
    }

    async fn init_quran_api_with_client(
        &mut self,
        client: Arc<ResourceClient>,
        default_method: u8,
    ) -> Result<Arc<QuranState>> {
        let state = QuranState::new(client, default_method);

        let router = create_router(state.clone());
        self.add_router("/api/quran", router).await;

        info!("Quran API available at /api/quran/*");

        Ok(Arc::new(state))
    }
}
