//! Endpoints API REST pour les ressources Quran
//!
//! Chaque handler renvoie un [`FetchResult`] : une panne en amont produit la
//! donnée de repli, jamais une erreur HTTP. Seuls les paramètres hors
//! bornes sont refusés (400).

use crate::client::{AYAH_COUNT, DEFAULT_JUZ_EDITION, DEFAULT_TEXT_EDITION};
use crate::models::*;
use crate::qmserver_ext::QuranState;
use crate::result::FetchResult;
use crate::VerseSet;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Nombre de juz (paras)
const JUZ_COUNT: u8 = 30;
/// Nombre de sourates
const SURAH_COUNT: u16 = 114;

// ============ Gestion des erreurs ============

struct AppError(StatusCode, String);

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self(StatusCode::BAD_REQUEST, message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.1
        }));

        (self.0, body).into_response()
    }
}

/// Crée le router pour l'API Quran
pub fn create_router(state: QuranState) -> Router {
    Router::new()
        .route("/location", get(get_location))
        .route("/editions", get(get_editions))
        .route("/surahs", get(get_surahs))
        .route("/juz/{number}", get(get_juz))
        .route("/surah/{number}", get(get_surah))
        .route("/ayah/random", get(get_random_ayah))
        .route("/ayah/{number}", get(get_ayah))
        .route("/prayer-times", get(get_prayer_times))
        .route("/names", get(get_names))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct EditionQuery {
    edition: Option<String>,
}

impl EditionQuery {
    fn edition_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.edition.as_deref().map(str::trim) {
            Some(e) if !e.is_empty() => e,
            _ => default,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PrayerQuery {
    city: Option<String>,
    country: Option<String>,
    method: Option<u8>,
    /// `YYYY-MM-DD`, aujourd'hui par défaut
    date: Option<NaiveDate>,
}

/// Prochaine prière de la journée
#[derive(Debug, Serialize)]
struct NextPrayer {
    prayer: Prayer,
    time: String,
}

#[derive(Debug, Serialize)]
struct PrayerTimesResponse {
    #[serde(flatten)]
    result: FetchResult<PrayerTimes>,
    city: String,
    country: String,
    method: u8,
    next: Option<NextPrayer>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/quran/location
async fn get_location(State(state): State<QuranState>) -> Json<FetchResult<Location>> {
    Json(state.client.location().await)
}

/// GET /api/quran/editions
async fn get_editions(State(state): State<QuranState>) -> Json<FetchResult<Vec<Edition>>> {
    Json(state.client.editions().await)
}

/// GET /api/quran/surahs
async fn get_surahs(State(state): State<QuranState>) -> Json<FetchResult<Vec<SurahSummary>>> {
    Json(state.client.surahs().await)
}

/// GET /api/quran/juz/{number}?edition=
async fn get_juz(
    State(state): State<QuranState>,
    Path(number): Path<u8>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<FetchResult<Juz>>, AppError> {
    if !(1..=JUZ_COUNT).contains(&number) {
        return Err(AppError::bad_request(format!(
            "Juz must be between 1 and {}",
            JUZ_COUNT
        )));
    }
    let edition = query.edition_or(DEFAULT_JUZ_EDITION);
    Ok(Json(state.client.juz(number, edition).await))
}

/// GET /api/quran/surah/{number}?edition=
async fn get_surah(
    State(state): State<QuranState>,
    Path(number): Path<u16>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<FetchResult<Surah>>, AppError> {
    if !(1..=SURAH_COUNT).contains(&number) {
        return Err(AppError::bad_request(format!(
            "Surah must be between 1 and {}",
            SURAH_COUNT
        )));
    }
    let edition = query.edition_or(DEFAULT_TEXT_EDITION);
    Ok(Json(state.client.surah(number, edition).await))
}

/// GET /api/quran/ayah/{number}?edition=
async fn get_ayah(
    State(state): State<QuranState>,
    Path(number): Path<u32>,
    Query(query): Query<EditionQuery>,
) -> Result<Json<FetchResult<Ayah>>, AppError> {
    if !(1..=AYAH_COUNT).contains(&number) {
        return Err(AppError::bad_request(format!(
            "Ayah must be between 1 and {}",
            AYAH_COUNT
        )));
    }
    let edition = query.edition_or(DEFAULT_TEXT_EDITION);
    Ok(Json(state.client.ayah(number, edition).await))
}

/// GET /api/quran/ayah/random
/// Verset tiré au hasard, dans les trois éditions d'affichage
async fn get_random_ayah(State(state): State<QuranState>) -> Json<VerseSet> {
    let number = rand::rng().random_range(1..=AYAH_COUNT);
    tracing::debug!(number, "Random ayah");
    Json(state.client.verse_set(number).await)
}

/// GET /api/quran/prayer-times?city=&country=&method=&date=
/// Sans ville ni pays, la position détectée est utilisée
async fn get_prayer_times(
    State(state): State<QuranState>,
    Query(query): Query<PrayerQuery>,
) -> Json<PrayerTimesResponse> {
    let (city, country) = match (non_blank(query.city), non_blank(query.country)) {
        (Some(city), Some(country)) => (city, country),
        (city, country) => {
            let location = state.client.location().await.into_payload();
            (
                city.unwrap_or(location.city),
                country.unwrap_or(location.country),
            )
        }
    };
    let method = query.method.unwrap_or(state.default_method);

    let now = Local::now();
    let today = now.date_naive();
    let date = query.date.unwrap_or(today);

    let result = state
        .client
        .prayer_times_on(date, &city, &country, method)
        .await;

    let next = if date == today {
        result
            .payload
            .next_after(now.time())
            .map(|(prayer, time)| NextPrayer {
                prayer,
                time: time.format("%H:%M").to_string(),
            })
    } else {
        None
    };

    Json(PrayerTimesResponse {
        result,
        city,
        country,
        method,
        next,
    })
}

/// GET /api/quran/names
async fn get_names(State(state): State<QuranState>) -> Json<FetchResult<Vec<DivineName>>> {
    Json(state.client.asma_al_husna().await)
}
