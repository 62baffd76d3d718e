use qmconfig::get_config;
use qmfetch::{FetcherConfigExt, ResourceClient};
use qmplayback::PlayerConfigExt;
use qmserver::{logs::LoggingOptions, ServerBuilder};
use quranmajeed::register_routes;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ========== PHASE 1 : Configuration et logs ==========

    let config = get_config();
    let mut server = ServerBuilder::new_configured().build();
    server
        .init_logging(LoggingOptions::from_config(&config))
        .await;

    info!("Configuration loaded from {}", config.directory());

    // ========== PHASE 2 : APIs ==========

    let client = ResourceClient::from_config(&config).await?;
    let default_method = config.get_prayer_default_method()?;
    let session_ttl = config.get_player_session_ttl()?;
    info!(
        geolocation = %client.endpoints().geolocation,
        quran = %client.endpoints().quran,
        prayer = %client.endpoints().prayer,
        "Upstream providers"
    );

    register_routes(&mut server, Arc::new(client), default_method, session_ttl).await?;

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("Starting HTTP server...");
    server.start().await;

    let server_info = server.info();
    info!(
        "Quran Majeed is ready at http://{}:{}",
        server_info.base_url, server_info.http_port
    );
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
