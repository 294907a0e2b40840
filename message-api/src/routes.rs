//! Router and request handlers.
//!
//! Route table:
//! - `POST /api/messages` create one message
//! - `GET  /api/messages/{session_id}` list a session (`limit`, `offset`, `sender`)
//! - `GET  /api/messages/{session_id}/search` search a session (`q`, `limit`, `offset`)
//! - `GET  /health` liveness, not gated

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Json, Router};
use message_core::{Message, MessageInput};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::guard::require_api_key;
use crate::state::AppState;
use crate::trace::trace_requests;

#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ResultsEnvelope<T> {
    pub status: &'static str,
    pub results: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sender: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub fn build(state: Arc<AppState>) -> Router {
    // route_layer so unmatched paths still 404 without a key.
    let api = Router::new()
        .route("/api/messages", post(create_message))
        .route("/api/messages/{session_id}", get(list_messages))
        .route("/api/messages/{session_id}/search", get(search_messages))
        .route_layer(from_fn_with_state(Arc::clone(&state), require_api_key));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(from_fn(trace_requests))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessageInput>, JsonRejection>,
) -> Result<Json<DataEnvelope<Message>>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let message = state.messages.create(input).await?;
    Ok(Json(DataEnvelope {
        status: "success",
        data: message,
    }))
}

async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ResultsEnvelope<Message>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let results = state
        .queries
        .get_messages(&session_id, params.sender.as_deref(), params.limit, params.offset)
        .await?;
    Ok(Json(ResultsEnvelope {
        status: "success",
        results,
    }))
}

async fn search_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ResultsEnvelope<Message>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Malformed(e.body_text()))?;
    // A missing q is reported like an empty one.
    let q = params.q.unwrap_or_default();
    let results = state
        .queries
        .search_messages(&session_id, &q, params.limit, params.offset)
        .await?;
    Ok(Json(ResultsEnvelope {
        status: "success",
        results,
    }))
}
