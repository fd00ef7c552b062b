use crate::domain::model::RecapOutcome;
use crate::server::AppState;
use crate::utils::error::RecapError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecapBody {
    #[serde(default)]
    pub upc: Option<String>,
}

/// `metadata` part of a scan upload.
#[derive(Debug, Deserialize)]
pub struct ScanMetadata {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<RecapError> for ApiError {
    fn from(err: RecapError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("❌ Recap request failed: {} (Severity: {:?})", err, err.severity());
        } else {
            tracing::warn!("Rejected recap request: {}", err);
        }

        Self::new(status, err.user_friendly_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// POST /recap
///
/// Accepts `{"upc": "..."}` as JSON, or a multipart scan upload with a
/// `metadata` part (`{"code": "..."}`) and an `image` part.
pub async fn recap(State(state): State<AppState>, request: Request) -> Response {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let result = if is_multipart {
        recap_from_scan(&state, request).await
    } else {
        recap_from_json(&state, request).await
    };

    match result {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => e.into_response(),
    }
}

async fn recap_from_json(state: &AppState, request: Request) -> Result<RecapOutcome, ApiError> {
    let Json(body) = Json::<RecapBody>::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let upc = body.upc.unwrap_or_default();
    if upc.trim().is_empty() {
        return Err(ApiError::bad_request("No UPC provided"));
    }

    Ok(state.engine.recap(&upc).await?)
}

async fn recap_from_scan(state: &AppState, request: Request) -> Result<RecapOutcome, ApiError> {
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

    let mut metadata: Option<ScanMetadata> = None;
    let mut image: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "metadata" => {
                let raw = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                let parsed = serde_json::from_slice::<ScanMetadata>(&raw).map_err(|e| {
                    ApiError::bad_request(format!("Invalid metadata: {}", e))
                })?;
                metadata = Some(parsed);
            }
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
                image = Some(bytes);
            }
            other => tracing::debug!("Ignoring multipart field {:?}", other),
        }
    }

    let code = metadata.and_then(|m| m.code).unwrap_or_default();
    if code.trim().is_empty() {
        return Err(ApiError::bad_request("No UPC provided"));
    }
    let image = match image {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ApiError::bad_request("No image provided")),
    };

    Ok(state.engine.recap_from_scan(&code, &image).await?)
}

fn outcome_response(outcome: RecapOutcome) -> Response {
    let status = if outcome.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(MessageBody {
            message: outcome.message().to_string(),
        }),
    )
        .into_response()
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
