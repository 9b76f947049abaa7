use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use super::{channel_error, error_response};
use crate::models::users::{NewUser, UserUpdate};
use crate::services::users::UserRequest;

pub async fn list_users(State(state): State<super::AppState>) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::ListUsers { response: user_tx })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(users) => (StatusCode::OK, Json(json!(users))),
        Err(e) => channel_error(e),
    }
}

pub async fn get_user(
    State(state): State<super::AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::GetUser {
            id: user_id,
            response: user_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}

pub async fn create_user(
    State(state): State<super::AppState>,
    Json(new_user): Json<NewUser>,
) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::CreateUser {
            new_user,
            response: user_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::CREATED, Json(json!(user))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}

pub async fn update_user(
    State(state): State<super::AppState>,
    Path(user_id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::UpdateUser {
            id: user_id,
            update,
            response: user_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}

pub async fn claim_welcome_bonus(
    State(state): State<super::AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::ClaimWelcomeBonus {
            id: user_id,
            response: user_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}

pub async fn credit_referral(
    State(state): State<super::AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let (user_tx, user_rx) = oneshot::channel();

    let send_result = state
        .user_channel
        .send(UserRequest::CreditReferral {
            id: user_id,
            response: user_tx,
        })
        .await;
    if let Err(e) = send_result {
        return channel_error(e);
    }

    match user_rx.await {
        Ok(Ok(user)) => (StatusCode::OK, Json(json!(user))),
        Ok(Err(service_error)) => error_response(service_error),
        Err(e) => channel_error(e),
    }
}
