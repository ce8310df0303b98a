//! HTTP API.
//!
//! - `POST /nlp/` `{text}` → `{root, nodes}`
//! - `POST /upload-pdf/` multipart field `file` → `{text, root, nodes}` or `{error}`
//! - `POST /mermaid/` `{text, part?}` → `{root, nodes, mermaid}`
//! - `GET  /health` → `{status, version, model}`
//!
//! Parsing and PDF decoding are CPU-bound and run on the blocking pool.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::document::{DocumentError, TextExtractor};
use crate::hierarchy::{HierarchyExtractor, MindMap};
use crate::nlp::LanguageModel;
use crate::render::{self, Part};

/// Shared read-only state.
#[derive(Clone)]
pub struct AppState {
    model: Arc<dyn LanguageModel>,
    extractor: Arc<HierarchyExtractor>,
    pdf: Option<Arc<dyn TextExtractor>>,
}

impl AppState {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        extractor: HierarchyExtractor,
        pdf: Option<Arc<dyn TextExtractor>>,
    ) -> Self {
        Self {
            model,
            extractor: Arc::new(extractor),
            pdf,
        }
    }
}

// ── Request / response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MermaidRequest {
    pub text: String,
    #[serde(default)]
    pub part: Part,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PdfResponse {
    pub text: String,
    #[serde(flatten)]
    pub map: MindMap,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MermaidResponse {
    #[serde(flatten)]
    pub map: MindMap,
    pub mermaid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Soft failure: reported in the body with a 200 status.
fn soft_error(message: impl Into<String>) -> Response {
    Json(ErrorResponse {
        error: message.into(),
    })
    .into_response()
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.name().to_string(),
    })
}

async fn nlp_extract(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<MindMap>, ApiError> {
    let map = extract(&state, req.text).await?;
    tracing::info!(root = %map.root, nodes = map.nodes.len(), "nlp request");
    Ok(Json(map))
}

async fn mermaid(
    State(state): State<AppState>,
    Json(req): Json<MermaidRequest>,
) -> Result<Json<MermaidResponse>, ApiError> {
    let map = extract(&state, req.text).await?;
    let mermaid = render::mermaid(&map, &req.part);
    tracing::info!(root = %map.root, nodes = map.nodes.len(), "mermaid request");
    Ok(Json(MermaidResponse { map, mermaid }))
}

async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("(unnamed)").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
        upload = Some((filename, data));
        break;
    }
    let Some((filename, data)) = upload else {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "missing multipart field `file`",
        ));
    };

    let Some(pdf) = state.pdf.clone() else {
        tracing::warn!(%filename, "pdf upload rejected: pdf support not built");
        return Ok(soft_error(DocumentError::Unavailable.to_string()));
    };

    let extracted = tokio::task::spawn_blocking(move || pdf.extract(&data))
        .await
        .map_err(|e| DocumentError::ExtractionTask {
            message: e.to_string(),
        })
        .and_then(|r| r);
    let text = match extracted {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(%filename, error = %e, "pdf extraction failed");
            return Ok(soft_error(format!("Failed to process PDF: {e}")));
        }
    };

    if text.trim().is_empty() {
        tracing::info!(%filename, "pdf contained no text");
        return Ok(Json(PdfResponse {
            text: String::new(),
            map: MindMap::empty(),
        })
        .into_response());
    }

    let map = extract(&state, text.clone()).await?;
    tracing::info!(%filename, chars = text.chars().count(), nodes = map.nodes.len(), "pdf request");
    Ok(Json(PdfResponse { text, map }).into_response())
}

/// Run the hierarchy extractor on the blocking pool.
async fn extract(state: &AppState, text: String) -> Result<MindMap, ApiError> {
    let model = Arc::clone(&state.model);
    let extractor = Arc::clone(&state.extractor);
    tokio::task::spawn_blocking(move || extractor.extract_text(model.as_ref(), &text))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "extraction task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "extraction failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

// ── Router ────────────────────────────────────────────────────────────────

/// Build the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/nlp/", post(nlp_extract))
        .route("/nlp", post(nlp_extract))
        .route("/upload-pdf/", post(upload_pdf))
        .route("/upload-pdf", post(upload_pdf))
        .route("/mermaid/", post(mermaid))
        .route("/mermaid", post(mermaid))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
