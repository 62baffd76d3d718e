//! Routes /api/quran/* driven through the router, upstream mocked
#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use qmfetch::{QuranApiExt, ResourceClient};
use qmserver::Server;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_for(upstream: &MockServer) -> Server {
    let client = ResourceClient::builder()
        .geolocation_url(format!("{}/json", upstream.uri()))
        .quran_base_url(format!("{}/v1", upstream.uri()))
        .prayer_base_url(format!("{}/prayer/v1", upstream.uri()))
        .names_url(format!("{}/cdn/names.json", upstream.uri()))
        .short_timeout(Duration::from_millis(500))
        .long_timeout(Duration::from_millis(500))
        .build()
        .await
        .unwrap();

    let mut server = Server::new("Test", "127.0.0.1", 0);
    server
        .init_quran_api_with_client(Arc::new(client), 3)
        .await
        .unwrap();
    server
}

async fn get(server: &Server, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = server.router().await.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_location_falls_back_over_http() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream).await;
    let (status, body) = get(&server, "/api/quran/location").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["payload"]["city"], "Islamabad");
    assert_eq!(body["payload"]["country"], "PK");
}

#[tokio::test]
async fn test_juz_defaults_to_uthmani() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/juz/30/quran-uthmani"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "status": "OK",
            "data": {
                "number": 30,
                "ayahs": [{
                    "number": 5673,
                    "text": "عَمَّ يَتَسَاءَلُونَ",
                    "numberInSurah": 1,
                    "juz": 30,
                    "surah": { "number": 78, "name": "سُورَةُ النَّبَإِ", "englishName": "An-Naba", "englishNameTranslation": "The Announcement" }
                }]
            }
        })))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream).await;
    let (status, body) = get(&server, "/api/quran/juz/30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(body["payload"]["number"], 30);
    assert_eq!(body["payload"]["ayahs"][0]["number"], 5673);
}

#[tokio::test]
async fn test_out_of_range_numbers_are_rejected() {
    let upstream = MockServer::start().await;
    let server = server_for(&upstream).await;

    let (status, body) = get(&server, "/api/quran/juz/31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Juz"));

    let (status, _) = get(&server, "/api/quran/surah/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&server, "/api/quran/ayah/6237").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_random_ayah_has_three_scripts() {
    // Nothing mounted: every edition falls back to the basmala
    let upstream = MockServer::start().await;
    let server = server_for(&upstream).await;

    let (status, body) = get(&server, "/api/quran/ayah/random").await;

    assert_eq!(status, StatusCode::OK);
    let number = body["number"].as_u64().unwrap();
    assert!((1..=6236).contains(&number));
    assert_eq!(body["arabic"]["source"], "fallback");
    assert!(body["arabic"]["payload"]["text"]
        .as_str()
        .unwrap()
        .starts_with("بِسْمِ"));
    assert!(body["english"]["payload"]["text"]
        .as_str()
        .unwrap()
        .starts_with("In the name of"));
    assert!(body["urdu"]["payload"]["text"].is_string());
}

#[tokio::test]
async fn test_prayer_times_use_detected_location() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Lahore",
            "country": "PK",
            "loc": "31.5497,74.3436"
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/prayer/v1/timingsByCity/01-03-2025"))
        .and(query_param("city", "Lahore"))
        .and(query_param("method", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream).await;
    let (status, body) = get(&server, "/api/quran/prayer-times?method=2&date=2025-03-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Lahore");
    assert_eq!(body["country"], "PK");
    assert_eq!(body["method"], 2);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["payload"]["timings"]["Fajr"], "05:30");
    assert_eq!(body["payload"]["date"]["gregorian"]["date"], "01-03-2025");
    // Not today: no next prayer
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn test_names_fall_back_to_full_list() {
    let upstream = MockServer::start().await;
    let server = server_for(&upstream).await;

    let (status, body) = get(&server, "/api/quran/names").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["payload"].as_array().unwrap().len(), 99);
}
