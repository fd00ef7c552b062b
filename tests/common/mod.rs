#![allow(dead_code)]

use comic_recap::AppConfig;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const SCANNED_CODE: &str = "75960620663600911";
pub const SCANNED_PREFIX: &str = "759606206636";
pub const SCANNED_ADDON: &str = "00911";
pub const FIRST_ISSUE_CODE: &str = "75960620663600111";
pub const UNKNOWN_CODE: &str = "00000000000000000";

pub const CURRENT_TITLE: &str = "Spider-Man (2022) #11";
pub const FIRST_TITLE: &str = "Spider-Boy (2023) #1";
pub const FIRST_DESCRIPTION: &str = "Bailey Briggs swings into his own series!";
pub const RECAP_TEXT: &str = "Peter's week went sideways when the Hunters came to town.";

pub const BOUNDARY: &str = "comic-recap-test-boundary";

pub fn envelope(results: Vec<Value>) -> Value {
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": 0,
            "limit": 100,
            "total": results.len(),
            "count": results.len(),
            "results": results
        }
    })
}

pub fn spider_man(server: &MockServer, number: u32) -> Value {
    let upc = if number == 11 { SCANNED_CODE } else { "" };
    json!({
        "id": 100_000 + number,
        "title": format!("Spider-Man (2022) #{}", number),
        "issueNumber": number,
        "description": format!("Spider-Man issue {} story.", number),
        "upc": upc,
        "series": {
            "resourceURI": server.url("/series/31589"),
            "name": "Spider-Man (2022 - Present)"
        },
        "stories": {"available": 1, "items": [{"name": format!("Spider-Man #{} story", number), "type": "interiorStory"}]},
        "events": {"available": 0, "items": []}
    })
}

pub fn spider_boy_one(server: &MockServer) -> Value {
    json!({
        "id": 200_001,
        "title": FIRST_TITLE,
        "issueNumber": 1,
        "description": FIRST_DESCRIPTION,
        "upc": FIRST_ISSUE_CODE,
        "series": {
            "resourceURI": server.url("/series/37722"),
            "name": "Spider-Boy (2023 - Present)"
        }
    })
}

pub struct CatalogMocks<'a> {
    pub lookup: Mock<'a>,
    pub unknown: Mock<'a>,
    pub series: Mock<'a>,
    pub first_lookup: Mock<'a>,
    pub first_series: Mock<'a>,
}

/// Catalog with Spider-Man #7-#12 and a one-issue Spider-Boy series.
pub fn mount_catalog(server: &MockServer) -> CatalogMocks<'_> {
    let current = envelope(vec![spider_man(server, 11)]);
    let lookup = server.mock(|when, then| {
        when.method(GET)
            .path("/comics")
            .query_param("upc", SCANNED_CODE)
            .query_param("apikey", "test-public")
            .query_param_exists("ts")
            .query_param_exists("hash");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(current);
    });

    let unknown = server.mock(|when, then| {
        when.method(GET).path("/comics").query_param("upc", UNKNOWN_CODE);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(envelope(vec![]));
    });

    let listing = envelope((7..=12).rev().map(|n| spider_man(server, n)).collect());
    let series = server.mock(|when, then| {
        when.method(GET)
            .path("/series/31589/comics")
            .query_param("orderBy", "-issueNumber")
            .query_param("limit", "100")
            .query_param("noVariants", "true")
            .query_param_exists("hash");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(listing);
    });

    let first = envelope(vec![spider_boy_one(server)]);
    let first_lookup = server.mock(|when, then| {
        when.method(GET)
            .path("/comics")
            .query_param("upc", FIRST_ISSUE_CODE);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(first);
    });

    let first_listing = envelope(vec![spider_boy_one(server)]);
    let first_series = server.mock(|when, then| {
        when.method(GET).path("/series/37722/comics");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(first_listing);
    });

    CatalogMocks {
        lookup,
        unknown,
        series,
        first_lookup,
        first_series,
    }
}

pub fn mount_text_model(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .body_contains(r#""model":"deepseek-r1:14b""#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "model": "deepseek-r1:14b",
                "message": {
                    "role": "assistant",
                    "content": format!("<think>\nThe reader needs the last few issues.\n</think>\n\n{}", RECAP_TEXT)
                },
                "done": true
            }));
    })
}

pub fn mount_vision_model<'a>(server: &'a MockServer, reply: &str) -> Mock<'a> {
    let reply = reply.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .body_contains(r#""model":"llama3.2-vision""#)
            .body_contains(r#""images":["#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "model": "llama3.2-vision",
                "message": {"role": "assistant", "content": reply},
                "done": true
            }));
    })
}

pub fn test_config(catalog_url: String, ollama_host: String) -> AppConfig {
    let mut config = AppConfig::default();
    config.catalog.base_url = catalog_url;
    config.catalog.public_key = "test-public".to_string();
    config.catalog.private_key = "test-private".to_string();
    config.catalog.timeout_seconds = 5;
    config.llm.host = ollama_host;
    config.llm.timeout_seconds = 5;
    config
}

/// Host where nothing listens, for model-down scenarios.
pub fn unreachable_host() -> String {
    "http://127.0.0.1:1".to_string()
}

pub fn multipart_body(metadata: Option<&str>, image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(metadata) = metadata {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"metadata\"\r\nContent-Type: application/json\r\n\r\n{}\r\n",
                BOUNDARY, metadata
            )
            .as_bytes(),
        );
    }
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"scan.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
