use axum::body::Bytes;
use axum::http::{HeaderMap, header};
use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::pipeline::MockPipeline;

use super::models::{HealthStatus, QueryRequest, QueryResponse, StatusMessage};

pub const SERVICE_NAME: &str = "RAG Pipeline System";
pub const API_VERSION: &str = "1.0.0";

pub async fn root_handler() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "RAG Pipeline API is running",
    })
}

pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
        version: API_VERSION,
    })
}

pub async fn query_handler(
    State(pipeline): State<Arc<MockPipeline>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<QueryResponse>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or_default());
    let request = QueryRequest::from_body(content_type, &body).map_err(|issue| {
        log::warn!("rejected query body: {} ({:?})", issue.kind, issue.loc);
        ApiError::from(issue)
    })?;

    let start = Instant::now();
    log::info!("processing query ({} bytes)", request.text.len());

    let response = pipeline.process(request.text).await;

    log::info!("query processed in {}ms", start.elapsed().as_millis());
    Ok(Json(response))
}

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}
