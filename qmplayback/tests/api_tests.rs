//! Player routes driven through the router
#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use qmplayback::{Catalog, PlayerApiExt, ResourceId, SessionRegistry};
use qmserver::Server;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tower::ServiceExt;

fn stream_url(id: u16) -> String {
    format!("https://streams.example/para/{}.mp3", id)
}

async fn server_with(registry: SessionRegistry) -> Server {
    let urls: HashMap<ResourceId, String> = Catalog::paras()
        .ids()
        .map(|id| (id, stream_url(id.0)))
        .collect();

    let mut server = Server::new("Test", "127.0.0.1", 0);
    server.init_player_api(registry, urls).await.unwrap();
    server
}

async fn server() -> Server {
    server_with(SessionRegistry::new(Catalog::paras())).await
}

async fn call(server: &Server, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = server.router().await.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn new_session(server: &Server) -> String {
    let (status, body) = call(server, "POST", "/api/player/sessions").await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_select_replay_block_stop_scenario() {
    let server = server().await;
    let sid = new_session(&server).await;
    let base = format!("/api/player/sessions/{}", sid);

    let (status, view) = call(&server, "GET", &base).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "idle");
    assert!(view["stream_url"].is_null());

    let (_, view) = call(&server, "POST", &format!("{}/select/5", base)).await;
    assert_eq!(view["state"], "playing");
    assert_eq!(view["active_id"], 5);
    assert_eq!(view["nonce"], 1);
    assert_eq!(view["stream_url"], stream_url(5));
    assert_eq!(view["media_key"], "audio_5_1");

    // Replay: same Para, fresh nonce
    let (_, view) = call(&server, "POST", &format!("{}/select/5", base)).await;
    assert_eq!(view["active_id"], 5);
    assert_eq!(view["nonce"], 2);

    let (_, view) = call(&server, "POST", &format!("{}/select/12", base)).await;
    assert_eq!(view["state"], "blocked");
    assert_eq!(view["active_id"], 5);
    assert_eq!(view["pending_request"], 12);
    assert_eq!(
        view["notification"],
        "Please stop the current Para 5 before playing Para 12."
    );
    assert_eq!(view["stream_url"], stream_url(5));

    let (_, view) = call(&server, "POST", &format!("{}/stop", base)).await;
    assert_eq!(view["state"], "idle");
    assert!(view["pending_request"].is_null());

    let (_, view) = call(&server, "POST", &format!("{}/select/12", base)).await;
    assert_eq!(view["state"], "playing");
    assert_eq!(view["active_id"], 12);
    assert_eq!(view["nonce"], 3);
    assert_eq!(view["stream_url"], stream_url(12));
}

#[tokio::test]
async fn test_out_of_catalog_selection_is_ignored() {
    let server = server().await;
    let sid = new_session(&server).await;

    for para in ["31", "0", "70000", "-1", "abc"] {
        let (status, view) = call(
            &server,
            "POST",
            &format!("/api/player/sessions/{}/select/{}", sid, para),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "Para {}", para);
        assert_eq!(view["state"], "idle");
        assert_eq!(view["nonce"], 0);
    }

    // a playing session keeps playing
    call(&server, "POST", &format!("/api/player/sessions/{}/select/7", sid)).await;
    let (status, view) = call(
        &server,
        "POST",
        &format!("/api/player/sessions/{}/select/abc", sid),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "playing");
    assert_eq!(view["active_id"], 7);
    assert_eq!(view["nonce"], 1);
    assert!(view["pending_request"].is_null());
}

#[tokio::test]
async fn test_idle_session_expires() {
    let registry = SessionRegistry::new(Catalog::paras()).with_ttl(Duration::from_millis(30));
    let server = server_with(registry).await;
    let sid = new_session(&server).await;
    let uri = format!("/api/player/sessions/{}", sid);

    let (status, _) = call(&server, "GET", &uri).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let (status, body) = call(&server, "GET", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Unknown session"));
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let server = server().await;
    let a = new_session(&server).await;
    let b = new_session(&server).await;

    call(&server, "POST", &format!("/api/player/sessions/{}/select/1", a)).await;
    let (_, view) = call(&server, "POST", &format!("/api/player/sessions/{}/select/2", b)).await;

    assert_eq!(view["state"], "playing");
    assert_eq!(view["active_id"], 2);
}

#[tokio::test]
async fn test_unknown_and_invalid_sessions_are_404() {
    let server = server().await;

    let (status, body) = call(
        &server,
        "GET",
        "/api/player/sessions/3f2b8c1e-9a4d-4e1f-8b7a-2c5d6e7f8a9b",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Unknown session"));

    let (status, _) = call(&server, "POST", "/api/player/sessions/not-a-uuid/stop").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_durood_counter() {
    let server = server().await;
    let sid = new_session(&server).await;
    let base = format!("/api/player/sessions/{}/durood", sid);

    let (_, view) = call(&server, "GET", &base).await;
    assert_eq!(view["count"], 0);
    assert_eq!(view["goal"], 100);

    let (_, view) = call(&server, "POST", &format!("{}/add/33", base)).await;
    assert_eq!(view["count"], 33);
    assert_eq!(view["progress"], 33.0);

    let (_, view) = call(&server, "POST", &format!("{}/add/100", base)).await;
    assert_eq!(view["count"], 133);
    assert_eq!(view["progress"], 100.0);
    assert_eq!(view["goal_reached"], true);

    let (_, view) = call(&server, "POST", &format!("{}/reset", base)).await;
    assert_eq!(view["count"], 0);
}

#[tokio::test]
async fn test_delete_session() {
    let server = server().await;
    let sid = new_session(&server).await;
    let uri = format!("/api/player/sessions/{}", sid);

    let (status, _) = call(&server, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&server, "GET", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_player_openapi_document() {
    let server = server().await;
    let (status, doc) = call(&server, "GET", "/api-docs/player.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/sessions/{sid}/select/{id}"].is_object());

    let schemas = &doc["components"]["schemas"];
    assert_eq!(schemas["SessionInfo"]["properties"]["id"]["type"], "string");
    assert_eq!(schemas["SessionInfo"]["properties"]["id"]["format"], "uuid");
}
