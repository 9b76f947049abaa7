use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_response};
use crate::models::requests::NewRequest;
use crate::services::requests::RequestServiceRequest;

pub async fn list_requests(State(state): State<super::AppState>) -> impl IntoResponse {
    let (request_tx, request_rx) = oneshot::channel();

    let send_result = state
        .request_channel
        .send(RequestServiceRequest::ListRequests {
            response: request_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match request_rx.await {
        Ok(requests) => (StatusCode::OK, Json(json!(requests))),
        Err(e) => channel_error(e),
    }
}

pub async fn create_request(
    State(state): State<super::AppState>,
    Json(new_request): Json<NewRequest>,
) -> impl IntoResponse {
    let (request_tx, request_rx) = oneshot::channel();

    let send_result = state
        .request_channel
        .send(RequestServiceRequest::CreateRequest {
            new_request,
            response: request_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match request_rx.await {
        Ok(Ok(request)) => (StatusCode::CREATED, Json(json!(request))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}

/// Admin-gated: the caller identifies itself with an `X-Admin-Id` header
/// whose value must be in the configured allow-list.
pub async fn decide_request(
    State(state): State<super::AppState>,
    Path((request_id, action)): Path<(u64, String)>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let admin_id = headers
        .get("x-admin-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok());

    let authorized = matches!(admin_id, Some(id) if state.admin_ids.contains(&id));
    if !authorized {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Admin authorization required"})),
        );
    }

    let (request_tx, request_rx) = oneshot::channel();

    let send_result = state
        .request_channel
        .send(RequestServiceRequest::DecideRequest {
            id: request_id,
            action,
            response: request_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match request_rx.await {
        Ok(Ok(request)) => (StatusCode::OK, Json(json!(request))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}
