use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::users::UserRequest;
use super::{RequestHandler, Service, ServiceError};
use crate::models::requests::{NewRequest, Request, RequestStatus};
use crate::models::stats::RequestTotals;
use crate::repositories::requests::RequestRepository;

pub enum RequestServiceRequest {
    ListRequests {
        response: oneshot::Sender<Vec<Request>>,
    },
    CreateRequest {
        new_request: NewRequest,
        response: oneshot::Sender<Result<Request, ServiceError>>,
    },
    DecideRequest {
        id: u64,
        action: String,
        response: oneshot::Sender<Result<Request, ServiceError>>,
    },
    GetTotals {
        response: oneshot::Sender<RequestTotals>,
    },
}

#[derive(Clone)]
pub struct RequestRequestHandler {
    repository: RequestRepository,
    user_channel: mpsc::Sender<UserRequest>,
}

impl RequestRequestHandler {
    pub fn new(repository: RequestRepository, user_channel: mpsc::Sender<UserRequest>) -> Self {
        RequestRequestHandler {
            repository,
            user_channel,
        }
    }

    async fn decide_request(&self, id: u64, action: &str) -> Result<Request, ServiceError> {
        // Lookup comes first so a missing id reports NotFound even when the
        // action is also bad.
        self.repository.get_request(id)?;

        let status = RequestStatus::parse_action(action)
            .ok_or_else(|| ServiceError::InvalidAction(action.to_string()))?;

        let request = self.repository.set_status(id, status)?;

        if status == RequestStatus::Approved {
            self.apply_balance_effect(&request).await;
        }

        Ok(request)
    }

    /// The request stays approved even when the balance update cannot be
    /// delivered or the user record is gone; there is no compensation path.
    async fn apply_balance_effect(&self, request: &Request) {
        let (user_tx, user_rx) = oneshot::channel();

        let sent = self
            .user_channel
            .send(UserRequest::AdjustBalance {
                id: request.user_id,
                delta: request.signed_amount(),
                response: user_tx,
            })
            .await;

        if sent.is_err() {
            log::error!(
                "User service unavailable; request {} approved without balance update",
                request.id
            );
            return;
        }

        match user_rx.await {
            Ok(Ok(user)) => log::info!(
                "Applied {} to user {}, balance now {}",
                request.signed_amount(),
                user.id,
                user.balance
            ),
            Ok(Err(e)) => log::warn!("Balance not applied for request {}: {}", request.id, e),
            Err(e) => log::error!(
                "User service dropped response for request {}: {}",
                request.id,
                e
            ),
        }
    }
}

#[async_trait]
impl RequestHandler<RequestServiceRequest> for RequestRequestHandler {
    async fn handle_request(&self, request: RequestServiceRequest) {
        match request {
            RequestServiceRequest::ListRequests { response } => {
                let _ = response.send(self.repository.list_requests());
            }
            RequestServiceRequest::CreateRequest {
                new_request,
                response,
            } => {
                let _ = response.send(Ok(self.repository.insert_request(new_request)));
            }
            RequestServiceRequest::DecideRequest {
                id,
                action,
                response,
            } => {
                let result = self.decide_request(id, &action).await;
                let _ = response.send(result);
            }
            RequestServiceRequest::GetTotals { response } => {
                let _ = response.send(self.repository.totals());
            }
        }
    }
}

pub struct RequestService;

impl RequestService {
    pub fn new() -> Self {
        RequestService {}
    }
}

#[async_trait]
impl Service<RequestServiceRequest, RequestRequestHandler> for RequestService {}
