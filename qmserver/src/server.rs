//! # Module Server - routeur partagé du service Quran Majeed
//!
//! Un [`Server`] possède un unique `Router` Axum. Chaque crate métier y
//! greffe ses routes (voir `QuranApiExt`, `ContentApiExt`, `PlayerApiExt`)
//! avant l'appel à [`Server::start`].
//!
//! Trois façons de monter des routes :
//!
//! - [`Server::add_route`] : une closure dont le résultat est renvoyé en JSON
//! - [`Server::add_router`] : un `Router` complet sous un préfixe
//! - [`Server::add_openapi`] : un `Router` documenté, avec sa Swagger UI

use crate::logs::{
    create_logs_router, init_logging, log_dump, log_sse, LogState, LoggingOptions, LogsApiDoc,
};
use axum::handler::Handler;
use axum::routing::get;
use axum::{Json, Router};
use qmconfig::get_config;
use serde::Serialize;
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::{signal, sync::RwLock, task::JoinHandle};
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Nom annoncé quand la configuration n'en fournit pas
pub const DEFAULT_SERVER_NAME: &str = "Quran-Majeed-Server";

/// Identité du serveur, renvoyée par `/info`
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ServerInfo {
    pub name: String,
    pub base_url: String,
    pub http_port: u16,
}

pub struct Server {
    info: ServerInfo,
    router: Arc<RwLock<Router>>,
    task: Option<JoinHandle<()>>,
    log_state: Option<LogState>,
}

/// `"api/x/"` et `"/api/x"` désignent le même préfixe
fn normalize_prefix(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C reçu, arrêt du serveur"),
        Err(e) => {
            // sans signal, seul l'arrêt du process termine le serveur
            warn!("Impossible d'écouter Ctrl+C : {}", e);
            std::future::pending::<()>().await;
        }
    }
}

impl Server {
    /// Serveur vide, sans aucune route
    ///
    /// ```rust
    /// # use qmserver::Server;
    /// let server = Server::new("MyAPI", "127.0.0.1", 3000);
    /// assert_eq!(server.info().http_port, 3000);
    /// ```
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, http_port: u16) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                base_url: base_url.into(),
                http_port,
            },
            router: Arc::new(RwLock::new(Router::new())),
            task: None,
            log_state: None,
        }
    }

    /// Greffe `routes` sur le routeur courant, fusionné à la racine ou
    /// imbriqué sous `prefix`
    async fn graft(&mut self, prefix: &str, routes: Router) {
        let prefix = normalize_prefix(prefix);
        let mut current = self.router.write().await;
        let base = std::mem::take(&mut *current);
        *current = if prefix == "/" {
            base.merge(routes)
        } else {
            base.nest(&prefix, routes)
        };
    }

    /// Route GET dont la réponse est la valeur produite par `f`, en JSON
    ///
    /// ```rust,no_run
    /// # use qmserver::Server;
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let mut server = Server::new("Test", "127.0.0.1", 3000);
    /// server.add_route("/api/status", || async {
    ///     serde_json::json!({ "status": "online" })
    /// }).await;
    /// # }
    /// ```
    pub async fn add_route<F, Fut, T>(&mut self, path: &str, f: F)
    where
        F: Fn() -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let routes = Router::new().route(
            "/",
            get(move || {
                let f = f.clone();
                async move { Json(f().await) }
            }),
        );
        self.graft(path, routes).await;
    }

    /// Route GET servie par un handler Axum qui extrait `state`
    pub async fn add_handler_with_state<H, T, S>(&mut self, path: &str, handler: H, state: S)
    where
        H: Handler<T, S> + Clone + 'static,
        T: 'static,
        S: Clone + Send + Sync + 'static,
    {
        let routes = Router::new().route("/", get(handler)).with_state(state);
        self.graft(path, routes).await;
    }

    /// Monte `sub_router` sous `path`, ou à la racine pour `"/"`
    pub async fn add_router(&mut self, path: &str, sub_router: Router) {
        self.graft(path, sub_router).await;
    }

    /// Monte une API documentée sous `/api/{name}`
    ///
    /// La description OpenAPI est servie sur `/api-docs/{name}.json` et la
    /// Swagger UI sur `/swagger-ui/{name}`. Chaque nom ne doit être monté
    /// qu'une fois.
    pub async fn add_openapi(
        &mut self,
        api_router: Router,
        openapi: utoipa::openapi::OpenApi,
        name: &str,
    ) {
        // SwaggerUi n'accepte que des chemins 'static
        let ui_path: &'static str = Box::leak(format!("/swagger-ui/{}", name).into_boxed_str());
        let doc_path: &'static str = Box::leak(format!("/api-docs/{}.json", name).into_boxed_str());

        self.graft(&format!("/api/{}", name), api_router).await;
        self.graft("/", SwaggerUi::new(ui_path).url(doc_path, openapi).into())
            .await;
    }

    /// Copie du routeur, pour servir des requêtes sans socket
    pub async fn router(&self) -> Router {
        self.router.read().await.clone()
    }

    /// Lance l'écoute HTTP en tâche de fond
    ///
    /// Le serveur s'arrête proprement sur Ctrl+C ; [`Server::wait`] rend la
    /// main à ce moment-là.
    pub async fn start(&mut self) {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.info.http_port));
        let app = self.router().await;
        info!(
            "{} à l'écoute sur http://{}:{}",
            self.info.name, self.info.base_url, self.info.http_port
        );

        self.task = Some(tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(e) => {
                    error!("Impossible d'ouvrir {} : {}", addr, e);
                    return;
                }
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
            {
                error!("Serveur HTTP interrompu : {}", e);
            }
        }));
    }

    /// Attend l'arrêt du serveur lancé par [`Server::start`]
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Tâche serveur terminée anormalement : {}", e);
            }
        }
    }

    pub fn info(&self) -> ServerInfo {
        self.info.clone()
    }

    /// Présent une fois les logs branchés
    pub fn log_state(&self) -> Option<LogState> {
        self.log_state.clone()
    }

    /// Installe le subscriber global puis monte les routes de logs
    ///
    /// - `GET /log-sse` : historique puis flux en direct
    /// - `GET /log-dump` : historique en JSON
    /// - `GET|POST /api/logs/log_setup` : niveau courant
    /// - `/swagger-ui/logs`
    ///
    /// ```rust,no_run
    /// # use qmserver::{ServerBuilder, logs::LoggingOptions};
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut server = ServerBuilder::new_configured().build();
    /// server.init_logging(LoggingOptions {
    ///     enable_console: false,
    ///     ..LoggingOptions::default()
    /// }).await;
    /// # }
    /// ```
    pub async fn init_logging(&mut self, options: LoggingOptions) -> LogState {
        let log_state = init_logging(options);
        self.attach_logs(log_state.clone()).await;
        log_state
    }

    /// Monte les routes de logs sur un `LogState` existant
    pub async fn attach_logs(&mut self, log_state: LogState) {
        self.add_handler_with_state("/log-sse", log_sse, log_state.clone())
            .await;
        self.add_handler_with_state("/log-dump", log_dump, log_state.clone())
            .await;
        self.add_openapi(
            create_logs_router(log_state.clone()),
            LogsApiDoc::openapi(),
            "logs",
        )
        .await;
        self.log_state = Some(log_state);
    }
}

/// Construction d'un [`Server`] à partir de valeurs explicites ou de la
/// section `host` de la configuration
pub struct ServerBuilder {
    info: ServerInfo,
}

impl ServerBuilder {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, http_port: u16) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                base_url: base_url.into(),
                http_port,
            },
        }
    }

    /// Hôte et port lus dans `host.base_url` et `host.http_port`
    pub fn new_configured() -> Self {
        let config = get_config();
        Self::new(
            DEFAULT_SERVER_NAME,
            config.get_base_url(),
            config.get_http_port(),
        )
    }

    /// ```rust
    /// # use qmserver::ServerBuilder;
    /// let server = ServerBuilder::new("MyAPI", "127.0.0.1", 3000).build();
    /// assert_eq!(server.info().name, "MyAPI");
    /// ```
    pub fn build(self) -> Server {
        let ServerInfo {
            name,
            base_url,
            http_port,
        } = self.info;
        Server::new(name, base_url, http_port)
    }
}
