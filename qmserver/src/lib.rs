//! # qmserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit le [`Server`] partagé par les services Quran Majeed.
//! Les crates métier (`qmfetch`, `qmcontent`, `qmplayback`) y montent leurs
//! routes par des traits d'extension implémentés sur [`Server`].
//!
//! ## Fonctionnalités
//!
//! - **API de haut niveau** : interface simple au-dessus d'Axum
//! - **Server-Sent Events (SSE)** : logs en temps réel via `/log-sse`
//! - **Niveau de log dynamique** : `GET|POST /api/logs/log_setup`
//! - **Documentation OpenAPI** : Swagger UI par API
//! - **Arrêt gracieux** : gestion de Ctrl+C
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use qmserver::{ServerBuilder, logs::LoggingOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = ServerBuilder::new("MyServer", "127.0.0.1", 8080).build();
//!     server.init_logging(LoggingOptions::default()).await;
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{log_dump, log_sse, LogState, LoggingOptions, SseLayer};
pub use server::{Server, ServerBuilder, ServerInfo, DEFAULT_SERVER_NAME};
