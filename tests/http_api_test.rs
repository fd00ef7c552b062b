mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use comic_recap::server::{build_router, AppState};
use comic_recap::{AppConfig, RecapEngine};
use common::*;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn app(config: &AppConfig) -> Result<axum::Router> {
    let engine = RecapEngine::from_config(config)?;
    Ok(build_router(AppState::new(engine)))
}

fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recap")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn scan_request(metadata: Option<&str>, image: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recap")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(metadata, image)))
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_post_recap_returns_generated_message() -> Result<()> {
    let catalog = MockServer::start();
    let ollama = MockServer::start();
    let _catalog_mocks = mount_catalog(&catalog);
    let chat_mock = mount_text_model(&ollama);

    let app = app(&test_config(catalog.url(""), ollama.url("")))?;
    let (status, body) = send(app, json_request(json!({"upc": SCANNED_CODE}))).await?;

    chat_mock.assert();
    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Here's the recap leading up to Spider-Man (2022) #11:"));
    assert!(message.ends_with(RECAP_TEXT));
    Ok(())
}

#[tokio::test]
async fn test_unknown_upc_is_404_without_model_call() -> Result<()> {
    let catalog = MockServer::start();
    let ollama = MockServer::start();
    let _catalog_mocks = mount_catalog(&catalog);
    let chat_mock = mount_text_model(&ollama);

    let app = app(&test_config(catalog.url(""), ollama.url("")))?;
    let (status, body) = send(app, json_request(json!({"upc": UNKNOWN_CODE}))).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No comic found for this UPC."}));
    assert_eq!(chat_mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_upc_is_400() -> Result<()> {
    let catalog = MockServer::start();
    let app = app(&test_config(catalog.url(""), unreachable_host()))?;

    let (status, body) = send(app.clone(), json_request(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No UPC provided"}));

    let (status, body) = send(app, json_request(json!({"upc": "  "}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No UPC provided");
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_400() -> Result<()> {
    let catalog = MockServer::start();
    let app = app(&test_config(catalog.url(""), unreachable_host()))?;

    let request = Request::builder()
        .method("POST")
        .uri("/recap")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"upc\": "))
        .unwrap();
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_first_issue_returns_description() -> Result<()> {
    let catalog = MockServer::start();
    let ollama = MockServer::start();
    let _catalog_mocks = mount_catalog(&catalog);
    let chat_mock = mount_text_model(&ollama);

    let app = app(&test_config(catalog.url(""), ollama.url("")))?;
    let (status, body) = send(app, json_request(json!({"upc": FIRST_ISSUE_CODE}))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!(
            "Here's the recap leading up to {}:\n\n{}",
            FIRST_TITLE, FIRST_DESCRIPTION
        )
    );
    assert_eq!(chat_mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_model_down_returns_apology_message() -> Result<()> {
    let catalog = MockServer::start();
    let _catalog_mocks = mount_catalog(&catalog);

    let app = app(&test_config(catalog.url(""), unreachable_host()))?;
    let (status, body) = send(app, json_request(json!({"upc": SCANNED_CODE}))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Failed to connect to Ollama. Make sure it's running."})
    );
    Ok(())
}

#[tokio::test]
async fn test_catalog_failure_is_bad_gateway() -> Result<()> {
    let catalog = MockServer::start();
    catalog.mock(|when, then| {
        when.method(GET).path("/comics");
        then.status(401);
    });

    let app = app(&test_config(catalog.url(""), unreachable_host()))?;
    let (status, body) = send(app, json_request(json!({"upc": SCANNED_CODE}))).await?;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["error"],
        "The Marvel API rejected the request credentials."
    );
    Ok(())
}

#[tokio::test]
async fn test_scan_upload_runs_vision_then_recap() -> Result<()> {
    let catalog = MockServer::start();
    let ollama = MockServer::start();
    let catalog_mocks = mount_catalog(&catalog);
    let vision_mock = mount_vision_model(&ollama, "00911\n");
    let chat_mock = mount_text_model(&ollama);

    let app = app(&test_config(catalog.url(""), ollama.url("")))?;
    let metadata = json!({"code": SCANNED_PREFIX}).to_string();
    let (status, body) = send(
        app,
        scan_request(Some(metadata.as_str()), Some(b"\xff\xd8\xff\xe0cover".as_slice())),
    )
    .await?;

    vision_mock.assert();
    catalog_mocks.lookup.assert();
    chat_mock.assert();
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Here's the recap leading up to Spider-Man (2022) #11:"));
    Ok(())
}

#[tokio::test]
async fn test_scan_upload_requires_both_parts() -> Result<()> {
    let catalog = MockServer::start();
    let app = app(&test_config(catalog.url(""), unreachable_host()))?;

    let (status, body) = send(app.clone(), scan_request(None, Some(b"cover".as_slice()))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No UPC provided");

    let metadata = json!({"code": SCANNED_PREFIX}).to_string();
    let (status, body) = send(app, scan_request(Some(metadata.as_str()), None)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image provided");
    Ok(())
}

#[tokio::test]
async fn test_scan_upload_with_unreadable_addon_is_400() -> Result<()> {
    let catalog = MockServer::start();
    let ollama = MockServer::start();
    let catalog_mocks = mount_catalog(&catalog);
    let _vision_mock = mount_vision_model(&ollama, "I see a barcode.");

    let app = app(&test_config(catalog.url(""), ollama.url("")))?;
    let metadata = json!({"code": SCANNED_PREFIX}).to_string();
    let (status, body) = send(app, scan_request(Some(metadata.as_str()), Some(b"blurry".as_slice()))).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Could not read the issue barcode from the image."
    );
    assert_eq!(catalog_mocks.lookup.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let catalog = MockServer::start();
    let app = app(&test_config(catalog.url(""), unreachable_host()))?;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "comic-recap");
    Ok(())
}
