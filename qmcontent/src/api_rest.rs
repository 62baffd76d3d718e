//! Endpoints API REST pour le contenu statique
//!
//! Les tables sont embarquées : aucun handler ne peut échouer, sauf sur un
//! paramètre hors bornes.

use crate::audio::surah_audio_url;
use crate::models::*;
use crate::random::{daily, DailyContent};
use crate::search::{search_duas, search_names_of_muhammad};
use crate::tables;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Récitateur par défaut des sourates complètes
const DEFAULT_RECITER: &str = "ar.alafasy";

// ============ Gestion des erreurs ============

struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

/// Crée le router pour l'API de contenu
pub fn create_router() -> Router {
    Router::new()
        .route("/paras", get(get_paras))
        .route("/paras/{number}", get(get_para))
        .route("/duas", get(get_duas))
        .route("/durood", get(get_durood))
        .route("/naats", get(get_naats))
        .route("/names-of-muhammad", get(get_names_of_muhammad))
        .route("/reciters", get(get_reciters))
        .route("/methods", get(get_methods))
        .route("/daily", get(get_daily))
        .route("/audio/surah/{number}", get(get_surah_audio))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Deserialize)]
struct ReciterQuery {
    reciter: Option<String>,
}

#[derive(Debug, Serialize)]
struct AudioLink {
    surah: u16,
    reciter: String,
    url: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/content/paras
async fn get_paras() -> Json<&'static [Para]> {
    Json(tables::paras())
}

/// GET /api/content/paras/{number}
async fn get_para(Path(number): Path<u16>) -> Result<Json<&'static Para>, AppError> {
    tables::para(number).map(Json).ok_or_else(|| {
        AppError(
            StatusCode::NOT_FOUND,
            format!("Para {} does not exist", number),
        )
    })
}

/// GET /api/content/duas?search=
async fn get_duas(Query(query): Query<SearchQuery>) -> Json<Vec<&'static Dua>> {
    Json(search_duas(&query.search))
}

/// GET /api/content/durood
async fn get_durood() -> Json<&'static [Durood]> {
    Json(tables::durood())
}

/// GET /api/content/naats
async fn get_naats() -> Json<&'static [Naat]> {
    Json(tables::naats())
}

/// GET /api/content/names-of-muhammad?search=
async fn get_names_of_muhammad(
    Query(query): Query<SearchQuery>,
) -> Json<Vec<&'static ProphetName>> {
    Json(search_names_of_muhammad(&query.search))
}

/// GET /api/content/reciters
async fn get_reciters() -> Json<&'static [Reciter]> {
    Json(tables::reciters())
}

/// GET /api/content/methods
async fn get_methods() -> Json<&'static [CalculationMethod]> {
    Json(tables::calculation_methods())
}

/// GET /api/content/daily
/// Dua du jour, naat mise en avant et numéro de verset, tirés à chaque appel
async fn get_daily() -> Json<DailyContent> {
    Json(daily(&mut rand::rng()))
}

/// GET /api/content/audio/surah/{number}?reciter=
async fn get_surah_audio(
    Path(number): Path<u16>,
    Query(query): Query<ReciterQuery>,
) -> Result<Json<AudioLink>, AppError> {
    if !(1..=114).contains(&number) {
        return Err(AppError(
            StatusCode::BAD_REQUEST,
            "Surah must be between 1 and 114".to_string(),
        ));
    }

    let reciter = query
        .reciter
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RECITER.to_string());
    if !tables::reciters().iter().any(|r| r.id == reciter) {
        return Err(AppError(
            StatusCode::BAD_REQUEST,
            format!("Unknown reciter {}", reciter),
        ));
    }

    Ok(Json(AudioLink {
        surah: number,
        url: surah_audio_url(&reciter, number),
        reciter,
    }))
}
