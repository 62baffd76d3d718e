//! Endpoints API REST du lecteur de paras
//!
//! Chaque auditeur crée une session puis pilote son propre lecteur. Une
//! sélection hors catalogue est ignorée et renvoie la vue inchangée ; seule
//! une session inconnue produit une erreur (404).

use crate::controller::PlaybackView;
use crate::counter::DuroodView;
use crate::error::SessionError;
use crate::qmserver_ext::PlayerState;
use crate::registry::{SessionId, SessionInfo, SessionRegistry};
use crate::session::{PlaybackState, ResourceId};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

// ============ Gestion des erreurs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

struct AppError(SessionError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (StatusCode::NOT_FOUND, body).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

/// Vue du lecteur enrichie de l'URL du flux actif
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session: SessionId,
    #[serde(flatten)]
    pub view: PlaybackView,
    /// Flux à charger, absent quand rien ne joue
    pub stream_url: Option<String>,
}

impl PlayerResponse {
    fn new(state: &PlayerState, session: SessionId, view: PlaybackView) -> Self {
        let stream_url = view
            .active_id
            .and_then(|id| state.stream_urls.get(&id).cloned());
        Self {
            session,
            view,
            stream_url,
        }
    }
}

/// Crée le router pour l'API du lecteur
pub fn create_router(state: PlayerState) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{sid}", get(get_session).delete(delete_session))
        .route("/sessions/{sid}/select/{id}", post(select))
        .route("/sessions/{sid}/stop", post(stop))
        .route("/sessions/{sid}/durood", get(get_durood))
        .route("/sessions/{sid}/durood/add/{n}", post(add_durood))
        .route("/sessions/{sid}/durood/reset", post(reset_durood))
        .with_state(state)
}

fn session_id(raw: &str) -> Result<SessionId, AppError> {
    Ok(SessionRegistry::parse_id(raw)?)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Crée une session d'écoute
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionInfo)
    ),
    tag = "player"
)]
pub async fn create_session(State(state): State<PlayerState>) -> impl IntoResponse {
    let id = state.registry.create().await;
    (StatusCode::CREATED, Json(SessionInfo { id }))
}

/// État courant du lecteur
#[utoipa::path(
    get,
    path = "/sessions/{sid}",
    params(("sid" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Player view", body = PlayerResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "player"
)]
pub async fn get_session(
    State(state): State<PlayerState>,
    Path(sid): Path<String>,
) -> Result<Json<PlayerResponse>, AppError> {
    let id = session_id(&sid)?;
    let session = state.registry.get(&id).await?;
    Ok(Json(PlayerResponse::new(&state, id, session.playback.view())))
}

/// Supprime une session
#[utoipa::path(
    delete,
    path = "/sessions/{sid}",
    params(("sid" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "player"
)]
pub async fn delete_session(
    State(state): State<PlayerState>,
    Path(sid): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = session_id(&sid)?;
    state.registry.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Demande la lecture d'un para
///
/// Si un autre para joue déjà, la demande reste en attente et la vue porte
/// la notification à afficher.
#[utoipa::path(
    post,
    path = "/sessions/{sid}/select/{id}",
    params(
        ("sid" = String, Path, description = "Session id"),
        ("id" = String, Path, description = "Para number, ignored outside 1..=30")
    ),
    responses(
        (status = 200, description = "Player view after the selection", body = PlayerResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "player"
)]
pub async fn select(
    State(state): State<PlayerState>,
    Path((sid, para)): Path<(String, String)>,
) -> Result<Json<PlayerResponse>, AppError> {
    let id = session_id(&sid)?;
    // un numéro illisible est hors catalogue : la vue reste inchangée
    let view = match para.parse::<u16>() {
        Ok(para) => {
            state
                .registry
                .update(&id, |s| s.playback.select(ResourceId(para)))
                .await?
        }
        Err(_) => {
            tracing::debug!(session = %id, para = %para, "Ignoring unparsable Para number");
            state.registry.get(&id).await?.playback.view()
        }
    };
    if let PlaybackState::Blocked { active, requested } = view.state {
        tracing::info!(session = %id, %active, %requested, "Para switch blocked");
    }
    Ok(Json(PlayerResponse::new(&state, id, view)))
}

/// Arrête la lecture et efface la demande en attente
#[utoipa::path(
    post,
    path = "/sessions/{sid}/stop",
    params(("sid" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Player view after stop", body = PlayerResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "player"
)]
pub async fn stop(
    State(state): State<PlayerState>,
    Path(sid): Path<String>,
) -> Result<Json<PlayerResponse>, AppError> {
    let id = session_id(&sid)?;
    let view = state.registry.update(&id, |s| s.playback.stop()).await?;
    Ok(Json(PlayerResponse::new(&state, id, view)))
}

/// Compteur de durood
#[utoipa::path(
    get,
    path = "/sessions/{sid}/durood",
    params(("sid" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Counter view", body = DuroodView),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "durood"
)]
pub async fn get_durood(
    State(state): State<PlayerState>,
    Path(sid): Path<String>,
) -> Result<Json<DuroodView>, AppError> {
    let id = session_id(&sid)?;
    let session = state.registry.get(&id).await?;
    Ok(Json(session.durood.view()))
}

#[utoipa::path(
    post,
    path = "/sessions/{sid}/durood/add/{n}",
    params(
        ("sid" = String, Path, description = "Session id"),
        ("n" = u32, Path, description = "Recitations to add")
    ),
    responses(
        (status = 200, description = "Counter view", body = DuroodView),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "durood"
)]
pub async fn add_durood(
    State(state): State<PlayerState>,
    Path((sid, n)): Path<(String, u32)>,
) -> Result<Json<DuroodView>, AppError> {
    let id = session_id(&sid)?;
    let view = state
        .registry
        .update(&id, |s| {
            s.durood.add(n);
            s.durood.view()
        })
        .await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/sessions/{sid}/durood/reset",
    params(("sid" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Counter view", body = DuroodView),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    ),
    tag = "durood"
)]
pub async fn reset_durood(
    State(state): State<PlayerState>,
    Path(sid): Path<String>,
) -> Result<Json<DuroodView>, AppError> {
    let id = session_id(&sid)?;
    let view = state
        .registry
        .update(&id, |s| {
            s.durood.reset();
            s.durood.view()
        })
        .await?;
    Ok(Json(view))
}

/// API OpenAPI du lecteur
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        create_session,
        get_session,
        delete_session,
        select,
        stop,
        get_durood,
        add_durood,
        reset_durood,
    ),
    components(
        schemas(
            SessionInfo,
            PlayerResponse,
            PlaybackView,
            PlaybackState,
            ResourceId,
            DuroodView,
            ErrorResponse
        )
    ),
    tags(
        (name = "player", description = "Single-slot Para player"),
        (name = "durood", description = "Daily durood counter")
    )
)]
pub struct PlayerApiDoc;
