use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::repositories::requests::RequestRepository;
use crate::repositories::users::UserRepository;
use crate::settings::Settings;

pub mod http;
pub mod requests;
pub mod users;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User not found: {0}")]
    UserNotFound(i64),
    #[error("User already exists: {0}")]
    UserExists(i64),
    #[error("Request not found: {0}")]
    RequestNotFound(u64),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Welcome bonus already claimed: {0}")]
    BonusClaimed(i64),
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

pub async fn start_services(settings: Settings) -> Result<(), anyhow::Error> {
    let (user_tx, mut user_rx) = mpsc::channel(512);
    let (request_tx, mut request_rx) = mpsc::channel(512);

    let user_repository = UserRepository::new();
    let request_repository = RequestRepository::new();

    let mut user_service = users::UserService::new();
    let mut request_service = requests::RequestService::new();

    log::info!("Starting user service.");
    let user_repository_clone = user_repository.clone();
    let bonus = settings.bonus.clone();
    tokio::spawn(async move {
        user_service
            .run(
                users::UserRequestHandler::new(user_repository_clone, bonus),
                &mut user_rx,
            )
            .await;
    });

    log::info!("Starting request service.");
    let request_user_tx = user_tx.clone();
    tokio::spawn(async move {
        request_service
            .run(
                requests::RequestRequestHandler::new(request_repository, request_user_tx),
                &mut request_rx,
            )
            .await;
    });

    log::info!("Starting HTTP server.");
    http::start_http_server(settings.server, settings.admin, user_tx, request_tx).await
}
