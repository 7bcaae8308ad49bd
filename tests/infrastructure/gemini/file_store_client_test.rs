use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use solace_gateway::application::ports::{MediaFileStore, MediaFileStoreError};
use solace_gateway::domain::RemoteFileState;
use solace_gateway::infrastructure::gemini::GeminiFileStoreClient;

use crate::helpers::http::TestServer;

#[derive(Default)]
struct UploadCapture {
    start_headers: Option<HeaderMap>,
    start_body: Option<Value>,
    upload_command: Option<String>,
    upload_body: Option<Vec<u8>>,
}

fn client_for(server: &TestServer) -> GeminiFileStoreClient {
    GeminiFileStoreClient::new(
        reqwest::Client::new(),
        &server.base_url,
        Some("test-key".to_string()),
    )
}

#[tokio::test]
async fn given_audio_bytes_when_uploading_then_runs_resumable_protocol() {
    let capture = Arc::new(Mutex::new(UploadCapture::default()));
    let start_capture = capture.clone();
    let finish_capture = capture.clone();

    let server = TestServer::spawn_with(|base| {
        let session_url = format!("{}/upload-session", base);
        Router::new()
            .route(
                "/upload/v1beta/files",
                post(move |headers: HeaderMap, Json(body): Json<Value>| {
                    let capture = start_capture.clone();
                    let session_url = session_url.clone();
                    async move {
                        let mut slot = capture.lock().unwrap();
                        slot.start_headers = Some(headers);
                        slot.start_body = Some(body);
                        ([("x-goog-upload-url", session_url)], Json(json!({})))
                    }
                }),
            )
            .route(
                "/upload-session",
                post(move |headers: HeaderMap, body: Bytes| {
                    let capture = finish_capture.clone();
                    async move {
                        let mut slot = capture.lock().unwrap();
                        slot.upload_command = headers
                            .get("X-Goog-Upload-Command")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from);
                        slot.upload_body = Some(body.to_vec());
                        Json(json!({
                            "file": {
                                "name": "files/abc123",
                                "uri": "https://files.example/abc123",
                                "state": "PROCESSING"
                            }
                        }))
                    }
                }),
            )
    })
    .await;

    let client = client_for(&server);
    let file = client
        .upload(b"mp3 data", "audio/mp3", "audio_1.mp3")
        .await
        .unwrap();

    assert_eq!(file.name, "files/abc123");
    assert_eq!(file.uri, "https://files.example/abc123");
    assert_eq!(file.state, RemoteFileState::Processing);

    let capture = capture.lock().unwrap();
    let start = capture.start_headers.as_ref().unwrap();
    assert_eq!(start.get("X-Goog-Upload-Protocol").unwrap(), "resumable");
    assert_eq!(start.get("X-Goog-Upload-Command").unwrap(), "start");
    assert_eq!(
        start.get("X-Goog-Upload-Header-Content-Length").unwrap(),
        "8"
    );
    assert_eq!(
        start.get("X-Goog-Upload-Header-Content-Type").unwrap(),
        "audio/mp3"
    );
    assert_eq!(
        capture.start_body.as_ref().unwrap()["file"]["display_name"],
        "audio_1.mp3"
    );
    assert_eq!(capture.upload_command.as_deref(), Some("upload, finalize"));
    assert_eq!(capture.upload_body.as_deref(), Some(b"mp3 data".as_slice()));
}

#[tokio::test]
async fn given_stored_file_when_getting_then_returns_current_state() {
    let router = Router::new().route(
        "/v1beta/files/abc123",
        get(|| async {
            Json(json!({
                "name": "files/abc123",
                "uri": "https://files.example/abc123",
                "state": "ACTIVE"
            }))
        }),
    );
    let server = TestServer::spawn(router).await;
    let client = client_for(&server);

    let file = client.get("files/abc123").await.unwrap();

    assert_eq!(file.state, RemoteFileState::Active);
    assert_eq!(file.uri, "https://files.example/abc123");
    assert!(file.error_message.is_none());
}

#[tokio::test]
async fn given_failed_file_when_getting_then_carries_error_message() {
    let router = Router::new().route(
        "/v1beta/files/abc123",
        get(|| async {
            Json(json!({
                "name": "files/abc123",
                "state": "FAILED",
                "error": {"message": "bad codec"}
            }))
        }),
    );
    let server = TestServer::spawn(router).await;
    let client = client_for(&server);

    let file = client.get("files/abc123").await.unwrap();

    assert_eq!(file.state, RemoteFileState::Failed);
    assert_eq!(file.error_message.as_deref(), Some("bad codec"));
}

#[tokio::test]
async fn given_unknown_state_string_when_getting_then_maps_to_unspecified() {
    let router = Router::new().route(
        "/v1beta/files/abc123",
        get(|| async { Json(json!({"name": "files/abc123", "state": "GLITCHED"})) }),
    );
    let server = TestServer::spawn(router).await;
    let client = client_for(&server);

    let file = client.get("files/abc123").await.unwrap();

    assert_eq!(file.state, RemoteFileState::Unspecified);
}

#[tokio::test]
async fn given_no_api_key_when_uploading_then_fails_without_request() {
    let client = GeminiFileStoreClient::new(reqwest::Client::new(), "http://127.0.0.1:1", None);

    let err = client.upload(b"data", "audio/mp3", "a.mp3").await.unwrap_err();

    assert!(matches!(err, MediaFileStoreError::MissingApiKey));
}

#[tokio::test]
async fn given_error_status_when_getting_then_lookup_failed() {
    let router = Router::new().route(
        "/v1beta/files/abc123",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "store down") }),
    );
    let server = TestServer::spawn(router).await;
    let client = client_for(&server);

    let err = client.get("files/abc123").await.unwrap_err();

    match err {
        MediaFileStoreError::LookupFailed(message) => {
            assert!(message.contains("status 500"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
