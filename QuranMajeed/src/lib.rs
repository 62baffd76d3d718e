//! Assembly of the Quran Majeed HTTP service
//!
//! The binary only reads the configuration and starts the server; the
//! route wiring lives here so it can be exercised without a socket.

use anyhow::Result;
use qmcontent::ContentApiExt;
use qmfetch::{QuranApiExt, ResourceClient};
use qmplayback::{Catalog, PlayerApiExt, ResourceId, SessionRegistry};
use qmserver::Server;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Para number to recitation stream, from the embedded table
pub fn para_stream_urls() -> HashMap<ResourceId, String> {
    qmcontent::paras()
        .iter()
        .map(|p| (ResourceId(p.number), p.stream_url.clone()))
        .collect()
}

/// Mounts every API on `server`
///
/// - `/info`
/// - `/api/quran/*` served by `client`
/// - `/api/content/*`
/// - `/api/player/*` with its Swagger UI, sessions idle for `session_ttl`
///   being dropped
pub async fn register_routes(
    server: &mut Server,
    client: Arc<ResourceClient>,
    default_method: u8,
    session_ttl: Duration,
) -> Result<()> {
    let server_info = server.info();
    server
        .add_route("/info", move || {
            let server_info = server_info.clone();
            async move {
                serde_json::json!({
                    "name": server_info.name,
                    "version": VERSION,
                })
            }
        })
        .await;

    info!("Initializing Quran resources API...");
    server
        .init_quran_api_with_client(client, default_method)
        .await?;

    info!("Initializing content API...");
    server.init_content_api().await?;

    info!("Initializing Para player API...");
    let registry = SessionRegistry::new(Catalog::paras()).with_ttl(session_ttl);
    server
        .init_player_api(registry, para_stream_urls())
        .await?;

    Ok(())
}
