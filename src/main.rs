//! Idexa Document Extraction Service
//!
//! Accepts uploaded identity documents (passport, driver license, EAD
//! card), classifies them, runs OCR, extracts labelled fields, and persists
//! the results for later retrieval and correction.

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use idexa::classifier::ImageClassifier;
use idexa::config::AppConfig;
use idexa::document::{pdf_text, sniff_document, DocumentKind};
use idexa::error::ServiceError;
use idexa::logging::init_logging;
use idexa::middleware::request_id_middleware;
use idexa::models::{DocumentType, ExtractionRecord, FieldMap};
use idexa::ocr::OcrClient;
use idexa::repository::{self, ExtractionRepository, DEFAULT_LIST_LIMIT};
use idexa::rules::{classify_label, extract_fields};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting Idexa Document Extraction Service");

    let pool = repository::create_pool(&config.database).await?;

    // One-shot storage initialization; the serving path assumes the table
    // already exists.
    if std::env::args().nth(1).as_deref() == Some("--init-db") {
        repository::run_migrations(&pool).await?;
        info!("Database initialized; ready to serve");
        return Ok(());
    }

    let state = AppState {
        repository: ExtractionRepository::new(pool),
        classifier: Arc::new(ImageClassifier::new(&config.classifier)),
        ocr: Arc::new(OcrClient::new(&config.ocr)),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/extract", axum::routing::post(extract_document))
        .route("/extractions", get(list_extractions))
        .route(
            "/extractions/:id",
            get(get_extraction).put(update_extraction),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::PUT])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Document Extraction Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    repository: ExtractionRepository,
    classifier: Arc<ImageClassifier>,
    ocr: Arc<OcrClient>,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "idexa",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Wire shape shared by every extraction endpoint.
#[derive(Debug, Serialize)]
struct ExtractionResponse {
    id: i64,
    document_type: DocumentType,
    document_content: FieldMap,
}

impl From<ExtractionRecord> for ExtractionResponse {
    fn from(record: ExtractionRecord) -> Self {
        Self {
            id: record.id,
            document_type: record.document_type,
            document_content: record.fields,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateExtractionRequest {
    /// Accepted for payload symmetry; the stored type tag never changes.
    #[allow(dead_code)]
    document_type: String,
    document_content: FieldMap,
}

/// Upload → classify → OCR → extract → persist.
async fn extract_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>, ServiceError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::unreadable_input(format!("Upload error: {}", e)))?
        .ok_or_else(|| ServiceError::unreadable_input("No file provided"))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| ServiceError::unreadable_input(format!("Read error: {}", e)))?;

    let kind = sniff_document(&data)?;

    let label = state
        .classifier
        .top_label(&data)
        .await
        .map_err(|e| ServiceError::upstream("image classifier", e.to_string()))?;
    let document_type = classify_label(&label);
    info!(%label, %document_type, "classified upload");

    let text = match kind {
        DocumentKind::Image => state
            .ocr
            .recognize(&data)
            .await
            .map_err(|e| ServiceError::upstream("ocr engine", e.to_string()))?,
        DocumentKind::Pdf => pdf_text(&data)?,
    };

    let fields = extract_fields(document_type, &text);

    let record = state
        .repository
        .create(document_type, &fields)
        .await
        .map_err(|e| ServiceError::database(e.to_string()))?;

    Ok(Json(record.into()))
}

async fn list_extractions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExtractionResponse>>, ServiceError> {
    let records = state
        .repository
        .list(DEFAULT_LIST_LIMIT)
        .await
        .map_err(|e| ServiceError::database(e.to_string()))?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

async fn get_extraction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExtractionResponse>, ServiceError> {
    let record = state
        .repository
        .get(id)
        .await
        .map_err(|e| ServiceError::database(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Extraction not found"))?;

    Ok(Json(record.into()))
}

/// Replaces the stored field map. The document type in the body is ignored
/// for storage.
async fn update_extraction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(updated): Json<UpdateExtractionRequest>,
) -> Result<Json<ExtractionResponse>, ServiceError> {
    let record = state
        .repository
        .update(id, &updated.document_content)
        .await
        .map_err(|e| ServiceError::database(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Extraction not found"))?;

    Ok(Json(record.into()))
}
