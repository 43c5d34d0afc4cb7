//! Datasource endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

use crate::client::ORG_ID_HEADER;
use crate::mock_server::state::{MockState, StateError, DEFAULT_ORG};
use crate::Datasource;

type SharedState = State<Arc<RwLock<MockState>>>;

const NOT_FOUND: &str = "Data source not found";
const NAME_TAKEN: &str = "data source with the same name already exists";

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, NOT_FOUND)
}

fn state_error(err: StateError) -> Response {
    match err {
        StateError::NotFound => not_found(),
        StateError::NameTaken => message(StatusCode::CONFLICT, NAME_TAKEN),
    }
}

/// Organization named by the request header, falling back to the default.
fn org_of(headers: &HeaderMap) -> u64 {
    headers
        .get(ORG_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .filter(|org| *org != 0)
        .unwrap_or(DEFAULT_ORG)
}

/// Reject the request unless it carries the required bearer token.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(ref token) = state.required_token else {
        return Ok(());
    };
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(token.as_str()) {
        Ok(())
    } else {
        Err(message(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

/// GET /api/datasources
pub async fn list_datasources(State(state): SharedState, headers: HeaderMap) -> Response {
    let state = state.read().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let items: Vec<Datasource> = state.list(org_of(&headers)).into_iter().cloned().collect();
    (StatusCode::OK, Json(items)).into_response()
}

/// GET /api/datasources/{id}
pub async fn get_datasource(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    // The real API answers a malformed ID with 400, not 404.
    let Ok(id) = id.parse::<u64>() else {
        return message(StatusCode::BAD_REQUEST, "id is invalid");
    };

    match state.get(org_of(&headers), id) {
        Some(ds) => (StatusCode::OK, Json(ds.clone())).into_response(),
        None => not_found(),
    }
}

/// GET /api/datasources/name/{name}
pub async fn get_datasource_by_name(
    State(state): SharedState,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    match state.get_by_name(org_of(&headers), &name) {
        Some(ds) => (StatusCode::OK, Json(ds.clone())).into_response(),
        None => not_found(),
    }
}

/// POST /api/datasources
pub async fn create_datasource(
    State(state): SharedState,
    headers: HeaderMap,
    Json(ds): Json<Datasource>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    match state.create(org_of(&headers), ds) {
        Ok(ds) => (
            StatusCode::OK,
            Json(json!({
                "id": ds.id,
                "name": ds.name,
                "message": "Datasource added",
                "datasource": ds,
            })),
        )
            .into_response(),
        Err(err) => state_error(err),
    }
}

/// PUT /api/datasources/{id}
pub async fn update_datasource(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(ds): Json<Datasource>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let Ok(id) = id.parse::<u64>() else {
        return message(StatusCode::BAD_REQUEST, "id is invalid");
    };

    match state.update(org_of(&headers), id, ds) {
        Ok(ds) => (
            StatusCode::OK,
            Json(json!({
                "id": ds.id,
                "name": ds.name,
                "message": "Datasource updated",
                "datasource": ds,
            })),
        )
            .into_response(),
        Err(err) => state_error(err),
    }
}

/// DELETE /api/datasources/{id}
pub async fn delete_datasource(
    State(state): SharedState,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let Ok(id) = id.parse::<u64>() else {
        return message(StatusCode::BAD_REQUEST, "id is invalid");
    };

    match state.delete(org_of(&headers), id) {
        Some(_) => message(StatusCode::OK, "Data source deleted"),
        None => not_found(),
    }
}

/// DELETE /api/datasources/name/{name}
pub async fn delete_datasource_by_name(
    State(state): SharedState,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    match state.delete_by_name(org_of(&headers), &name) {
        Some(ds) => (
            StatusCode::OK,
            Json(json!({ "id": ds.id, "message": "Data source deleted" })),
        )
            .into_response(),
        None => not_found(),
    }
}

/// GET /api/datasources/plugins
pub async fn list_plugins(State(state): SharedState, headers: HeaderMap) -> impl IntoResponse {
    let state = state.read().await;
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    (StatusCode::OK, Json(state.plugins.clone())).into_response()
}
