// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tokio::sync::{mpsc, oneshot};

use coinflip_backend::models::requests::{NewRequest, Request, RequestType};
use coinflip_backend::models::stats::RequestTotals;
use coinflip_backend::models::users::{NewUser, User, UserUpdate};
use coinflip_backend::repositories::requests::RequestRepository;
use coinflip_backend::repositories::users::UserRepository;
use coinflip_backend::services::requests::{
    RequestRequestHandler, RequestService, RequestServiceRequest,
};
use coinflip_backend::services::users::{UserRequest, UserRequestHandler, UserService};
use coinflip_backend::services::{http, Service, ServiceError};
use coinflip_backend::settings::{Admin, Bonus};

pub const ADMIN_ID: i64 = 7609121993;

pub fn test_bonus() -> Bonus {
    Bonus {
        signup_free_flips: 3,
        welcome_amount: 0.1,
        welcome_free_flips: 3,
        referral_reward: 0.1,
    }
}

/// The real user and request services running over channels, as wired by
/// `start_services`, minus the HTTP listener.
pub struct TestBackend {
    pub user_tx: mpsc::Sender<UserRequest>,
    pub request_tx: mpsc::Sender<RequestServiceRequest>,
}

pub fn start_backend() -> TestBackend {
    let (user_tx, mut user_rx) = mpsc::channel(64);
    let (request_tx, mut request_rx) = mpsc::channel(64);

    let user_repository = UserRepository::new();
    let request_repository = RequestRepository::new();

    let mut user_service = UserService::new();
    let user_handler = UserRequestHandler::new(user_repository, test_bonus());
    tokio::spawn(async move {
        user_service.run(user_handler, &mut user_rx).await;
    });

    let mut request_service = RequestService::new();
    let request_handler = RequestRequestHandler::new(request_repository, user_tx.clone());
    tokio::spawn(async move {
        request_service.run(request_handler, &mut request_rx).await;
    });

    TestBackend {
        user_tx,
        request_tx,
    }
}

/// Serves the real router on an ephemeral port and returns its base URL.
pub async fn start_http_backend() -> Result<String> {
    let backend = start_backend();
    let app = http::app(
        Admin {
            ids: vec![ADMIN_ID],
        },
        backend.user_tx.clone(),
        backend.request_tx.clone(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(format!("http://{}", addr))
}

impl TestBackend {
    pub async fn try_create_user(&self, id: i64) -> Result<Result<User, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::CreateUser {
                new_user: NewUser {
                    id,
                    username: None,
                    first_name: None,
                    last_name: None,
                },
                response: tx,
            })
            .await?;
        Ok(rx.await?)
    }

    pub async fn create_user(&self, id: i64) -> Result<User> {
        Ok(self.try_create_user(id).await??)
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::GetUser { id, response: tx })
            .await?;
        Ok(rx.await??)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::ListUsers { response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::UpdateUser {
                id,
                update,
                response: tx,
            })
            .await?;
        Ok(rx.await??)
    }

    pub async fn claim_welcome_bonus(&self, id: i64) -> Result<Result<User, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::ClaimWelcomeBonus { id, response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn credit_referral(&self, id: i64) -> Result<User> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::CreditReferral { id, response: tx })
            .await?;
        Ok(rx.await??)
    }

    pub async fn submit_request(
        &self,
        user_id: i64,
        kind: RequestType,
        amount: f64,
    ) -> Result<Request> {
        let (tx, rx) = oneshot::channel();
        self.request_tx
            .send(RequestServiceRequest::CreateRequest {
                new_request: NewRequest {
                    user_id,
                    user: format!("user_{}", user_id),
                    kind,
                    amount,
                },
                response: tx,
            })
            .await?;
        Ok(rx.await??)
    }

    pub async fn decide_request(
        &self,
        id: u64,
        action: &str,
    ) -> Result<Result<Request, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.request_tx
            .send(RequestServiceRequest::DecideRequest {
                id,
                action: action.to_string(),
                response: tx,
            })
            .await?;
        Ok(rx.await?)
    }

    pub async fn list_requests(&self) -> Result<Vec<Request>> {
        let (tx, rx) = oneshot::channel();
        self.request_tx
            .send(RequestServiceRequest::ListRequests { response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn request_totals(&self) -> Result<RequestTotals> {
        let (tx, rx) = oneshot::channel();
        self.request_tx
            .send(RequestServiceRequest::GetTotals { response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn count_users(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.user_tx
            .send(UserRequest::CountUsers { response: tx })
            .await?;
        Ok(rx.await?)
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
