//! Cloudinary client tests against a fake Admin API.
//!
//! The fake is an axum router served on an ephemeral local port. It checks
//! basic auth, pages root folders across a cursor, and records every query it
//! receives.
//!
//! Tests verify:
//! - Endpoint paths, query parameters, and folder path encoding
//! - Cursor following for folder listings
//! - Error mapping (401, 404, connection refused)
//! - The full pipeline over real HTTP

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use url::Url;

use gallery_feed::error::UpstreamError;
use gallery_feed::gallery::{GalleryOptions, GalleryService, PageRequest};
use gallery_feed::upstream::{CloudinaryClient, Credentials, FolderEntry, MediaSource};

/// `key:secret`, base64 encoded.
const EXPECTED_AUTH: &str = "Basic a2V5OnNlY3JldA==";

// =============================================================================
// Fake Admin API
// =============================================================================

#[derive(Clone, Default)]
struct FakeState {
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

impl FakeState {
    fn record(&self, path: &str, query: &HashMap<String, String>) {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), query.clone()));
    }

    fn requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.requests.lock().unwrap().clone()
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": {"message": "Invalid api_key"}})),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == EXPECTED_AUTH)
        .unwrap_or(false)
}

fn folder(name: &str, path: &str) -> serde_json::Value {
    json!({"name": name, "path": path})
}

async fn root_folders(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("<root>", &query);
    if !authorized(&headers) {
        return unauthorized();
    }

    // Two pages joined by a cursor
    match query.get("next_cursor").map(String::as_str) {
        None => Json(json!({
            "folders": [folder("A", "A")],
            "next_cursor": "page-2",
            "total_count": 2
        }))
        .into_response(),
        Some("page-2") => Json(json!({
            "folders": [folder("B", "B")],
            "total_count": 2
        }))
        .into_response(),
        Some(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn sub_folders(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(&path, &query);
    if !authorized(&headers) {
        return unauthorized();
    }

    match path.as_str() {
        "A" => Json(json!({"folders": [folder("my trips", "A/my trips")]})).into_response(),
        "A/my trips" | "B" => Json(json!({"folders": []})).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"message": "Can't find folder with path"}})),
        )
            .into_response(),
    }
}

async fn resources(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("<resources>", &query);
    if !authorized(&headers) {
        return unauthorized();
    }

    let prefix = query.get("prefix").cloned().unwrap_or_default();
    let max_results: usize = query
        .get("max_results")
        .and_then(|m| m.parse().ok())
        .unwrap_or(10);

    // Three images in every folder, one level of prefix matching is enough here
    let resources: Vec<_> = (0..3)
        .take(max_results)
        .map(|i| {
            let public_id = format!("{prefix}img{i}");
            json!({
                "public_id": public_id,
                "secure_url": format!("https://res.cloudinary.test/demo/image/upload/{public_id}.jpg"),
                "format": "jpg"
            })
        })
        .collect();

    Json(json!({"resources": resources, "next_cursor": "ignored"})).into_response()
}

async fn spawn_fake_api() -> (Url, FakeState) {
    let state = FakeState::default();
    let router = Router::new()
        .route("/v1_1/demo/folders", get(root_folders))
        .route("/v1_1/demo/folders/{*path}", get(sub_folders))
        .route("/v1_1/demo/resources/image/upload", get(resources))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), state)
}

fn client(base: Url) -> CloudinaryClient {
    CloudinaryClient::new(base, Credentials::new("demo", "key", "secret"))
}

// =============================================================================
// Folder Listings
// =============================================================================

#[tokio::test]
async fn test_root_folders_follow_cursor() {
    let (base, state) = spawn_fake_api().await;
    let folders = client(base).root_folders().await.unwrap();

    assert_eq!(
        folders,
        vec![FolderEntry::new("A", "A"), FolderEntry::new("B", "B")]
    );

    let requests = state.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].1.get("max_results").unwrap(), "500");
    assert!(requests[0].1.get("next_cursor").is_none());
    assert_eq!(requests[1].1.get("next_cursor").unwrap(), "page-2");
}

#[tokio::test]
async fn test_sub_folders_encode_path() {
    let (base, state) = spawn_fake_api().await;
    let client = client(base);

    let folders = client.sub_folders("A").await.unwrap();
    assert_eq!(folders, vec![FolderEntry::new("my trips", "A/my trips")]);

    let folders = client.sub_folders("A/my trips").await.unwrap();
    assert!(folders.is_empty());

    let paths: Vec<_> = state.requests().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["A", "A/my trips"]);
}

#[tokio::test]
async fn test_unknown_folder_is_not_found() {
    let (base, _state) = spawn_fake_api().await;
    let err = client(base).sub_folders("missing").await.unwrap_err();

    assert!(matches!(err, UpstreamError::NotFound(ref p) if p == "missing"));
}

// =============================================================================
// Resource Listings
// =============================================================================

#[tokio::test]
async fn test_upload_resources_with_prefix() {
    let (base, state) = spawn_fake_api().await;
    let resources = client(base).upload_resources("A/", 2).await.unwrap();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].public_id, "A/img0");
    assert_eq!(
        resources[0].secure_url,
        "https://res.cloudinary.test/demo/image/upload/A/img0.jpg"
    );

    let requests = state.requests();
    assert_eq!(requests.len(), 1, "resource cursor must not be followed");
    assert_eq!(requests[0].1.get("prefix").unwrap(), "A/");
    assert_eq!(requests[0].1.get("max_results").unwrap(), "2");
}

#[tokio::test]
async fn test_upload_resources_root_omits_prefix() {
    let (base, state) = spawn_fake_api().await;
    let resources = client(base).upload_resources("", 30).await.unwrap();

    assert_eq!(resources.len(), 3);
    let requests = state.requests();
    assert!(requests[0].1.get("prefix").is_none());
    assert_eq!(requests[0].1.get("max_results").unwrap(), "30");
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_bad_credentials_map_to_status_error() {
    let (base, _state) = spawn_fake_api().await;
    let client = CloudinaryClient::new(base, Credentials::new("demo", "key", "wrong"));

    let err = client.root_folders().await.unwrap_err();
    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid api_key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_maps_to_connection_error() {
    // Grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{addr}")).unwrap();
    let err = client(base).root_folders().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Connection(_)), "got {err:?}");
}

// =============================================================================
// Full Pipeline
// =============================================================================

#[tokio::test]
async fn test_gallery_over_http() {
    let (base, _state) = spawn_fake_api().await;
    let service = GalleryService::new(client(base), GalleryOptions::default());

    let page = service.page(PageRequest::new(1, 100)).await.unwrap();

    // root, A, A/my trips, B: three images each
    assert!(!page.is_degraded(), "faults: {:?}", page.faults);
    assert_eq!(page.total, 12);

    let ids: HashSet<_> = page
        .images
        .iter()
        .map(|u| {
            u.trim_start_matches("https://res.cloudinary.test/demo/image/upload/")
                .to_string()
        })
        .collect();
    for prefix in ["", "A/", "A/my trips/", "B/"] {
        for i in 0..3 {
            assert!(ids.contains(&format!("{prefix}img{i}.jpg")), "missing {prefix}img{i}");
        }
    }
}

#[tokio::test]
async fn test_gallery_with_bad_credentials_is_empty_but_ok() {
    let (base, _state) = spawn_fake_api().await;
    let client = CloudinaryClient::new(base, Credentials::new("demo", "key", "wrong"));
    let service = GalleryService::new(client, GalleryOptions::default());

    let page = service.page(PageRequest::default()).await.unwrap();

    assert!(page.images.is_empty());
    // Root listing and root fetch both failed
    assert_eq!(page.faults.len(), 2);
}
