use crate::error::ApiError;
use crate::types::{AskBody, DatasetSummary, HealthResponse, SearchObjectsBody};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use gaia_client::{discover_tools, list_dataset_descriptions, Backend};
use gaia_core::{AskRequest, AskResponse, DatasetDescription, DocumentResult, SearchQuery};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buf,
    )
        .into_response()
}

pub async fn gaia_qa(
    State(app): State<AppState>,
    payload: Result<Json<AskBody>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(body) = payload?;
    let req = AskRequest::from(body);
    let out = app.backend.ask(&req).await.map_err(ApiError::backend("ask"))?;
    info!(
        datasets = req.dataset_names.len(),
        citations = out.citations.len(),
        "answered question"
    );
    Ok(Json(out))
}

pub async fn list_datasets(
    State(app): State<AppState>,
) -> Result<Json<Vec<DatasetSummary>>, ApiError> {
    let datasets = app
        .backend
        .list_datasets()
        .await
        .map_err(ApiError::backend("list_datasets"))?;
    Ok(Json(datasets.into_iter().map(DatasetSummary::from).collect()))
}

pub async fn list_datasets_descriptions(
    State(app): State<AppState>,
) -> Result<Json<Vec<DatasetDescription>>, ApiError> {
    let out = list_dataset_descriptions(app.backend.clone())
        .await
        .map_err(ApiError::backend("list_datasets_descriptions"))?;
    Ok(Json(out))
}

pub async fn discover_tools_endpoint(
    State(app): State<AppState>,
) -> Result<Json<Vec<DatasetDescription>>, ApiError> {
    let out = discover_tools(app.backend.clone())
        .await
        .map_err(ApiError::backend("discover_tools"))?;
    Ok(Json(out))
}

/// Accepts an empty body as "no filters".
pub async fn search_objects(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<DocumentResult>>, ApiError> {
    let filters: SearchObjectsBody = if body.iter().all(u8::is_ascii_whitespace) {
        SearchObjectsBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("invalid search body: {e}")))?
    };
    let query = SearchQuery::from(filters);
    let docs = app
        .backend
        .search_objects(&query)
        .await
        .map_err(ApiError::backend("search_objects"))?;
    Ok(Json(docs))
}
