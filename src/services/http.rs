use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use tower_http::trace::TraceLayer;

use super::requests::RequestServiceRequest;
use super::users::UserRequest;
use super::ServiceError;
use crate::models::stats::Stats;
use crate::settings;

mod requests;
mod users;

#[derive(Clone)]
struct AppState {
    user_channel: mpsc::Sender<UserRequest>,
    request_channel: mpsc::Sender<RequestServiceRequest>,
    admin_ids: Arc<HashSet<i64>>,
}

fn error_response(error: ServiceError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match error {
        ServiceError::UserNotFound(_) | ServiceError::RequestNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::UserExists(_)
        | ServiceError::InvalidAction(_)
        | ServiceError::BonusClaimed(_) => StatusCode::BAD_REQUEST,
    };

    (status, Json(json!({"error": error.to_string()})))
}

fn channel_error<E: std::fmt::Display>(e: E) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "details": e.to_string()
        })),
    )
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "OK", "timestamp": chrono::Utc::now()}))
}

async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let (count_tx, count_rx) = oneshot::channel();
    let (totals_tx, totals_rx) = oneshot::channel();

    let count_result = state
        .user_channel
        .send(UserRequest::CountUsers { response: count_tx })
        .await;
    if let Err(e) = count_result {
        return channel_error(e);
    }

    let totals_result = state
        .request_channel
        .send(RequestServiceRequest::GetTotals {
            response: totals_tx,
        })
        .await;
    if let Err(e) = totals_result {
        return channel_error(e);
    }

    let total_users = match count_rx.await {
        Ok(count) => count,
        Err(e) => return channel_error(e),
    };
    let totals = match totals_rx.await {
        Ok(totals) => totals,
        Err(e) => return channel_error(e),
    };

    let stats = Stats {
        total_users,
        total_requests: totals.total_requests,
        pending_requests: totals.pending_requests,
        total_deposits: totals.total_deposits,
        total_withdrawals: totals.total_withdrawals,
    };

    (StatusCode::OK, Json(json!(stats)))
}

pub fn app(
    admin: settings::Admin,
    user_channel: mpsc::Sender<UserRequest>,
    request_channel: mpsc::Sender<RequestServiceRequest>,
) -> Router {
    let app_state = AppState {
        user_channel,
        request_channel,
        admin_ids: Arc::new(admin.ids.into_iter().collect()),
    };

    Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::update_user),
        )
        .route(
            "/api/users/{id}/welcome-bonus",
            post(users::claim_welcome_bonus),
        )
        .route("/api/users/{id}/referrals", post(users::credit_referral))
        .route(
            "/api/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/api/requests/{id}/{action}", post(requests::decide_request))
        .route("/api/stats", get(get_stats))
        .route("/api/health", get(health))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_http_server(
    server: settings::Server,
    admin: settings::Admin,
    user_channel: mpsc::Sender<UserRequest>,
    request_channel: mpsc::Sender<RequestServiceRequest>,
) -> Result<(), anyhow::Error> {
    let app = app(admin, user_channel, request_channel);

    let listener = tokio::net::TcpListener::bind((server.host.as_str(), server.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
