use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::users::{NewUser, User, UserUpdate};
use crate::repositories::users::UserRepository;
use crate::settings::Bonus;

pub enum UserRequest {
    ListUsers {
        response: oneshot::Sender<Vec<User>>,
    },
    GetUser {
        id: i64,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    CreateUser {
        new_user: NewUser,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    UpdateUser {
        id: i64,
        update: UserUpdate,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    AdjustBalance {
        id: i64,
        delta: f64,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    ClaimWelcomeBonus {
        id: i64,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    CreditReferral {
        id: i64,
        response: oneshot::Sender<Result<User, ServiceError>>,
    },
    CountUsers {
        response: oneshot::Sender<usize>,
    },
}

#[derive(Clone)]
pub struct UserRequestHandler {
    repository: UserRepository,
    bonus: Bonus,
}

impl UserRequestHandler {
    pub fn new(repository: UserRepository, bonus: Bonus) -> Self {
        UserRequestHandler { repository, bonus }
    }

    fn create_user(&self, new_user: NewUser) -> Result<User, ServiceError> {
        self.repository
            .insert_user(new_user, self.bonus.signup_free_flips)
    }

    fn claim_welcome_bonus(&self, id: i64) -> Result<User, ServiceError> {
        self.repository.claim_welcome_bonus(
            id,
            self.bonus.welcome_amount,
            self.bonus.welcome_free_flips,
        )
    }

    fn credit_referral(&self, id: i64) -> Result<User, ServiceError> {
        self.repository.credit_referral(id, self.bonus.referral_reward)
    }
}

#[async_trait]
impl RequestHandler<UserRequest> for UserRequestHandler {
    async fn handle_request(&self, request: UserRequest) {
        match request {
            UserRequest::ListUsers { response } => {
                let _ = response.send(self.repository.list_users());
            }
            UserRequest::GetUser { id, response } => {
                let _ = response.send(self.repository.get_user_by_id(id));
            }
            UserRequest::CreateUser { new_user, response } => {
                let _ = response.send(self.create_user(new_user));
            }
            UserRequest::UpdateUser {
                id,
                update,
                response,
            } => {
                let _ = response.send(self.repository.update_user(id, update));
            }
            UserRequest::AdjustBalance {
                id,
                delta,
                response,
            } => {
                let _ = response.send(self.repository.adjust_balance(id, delta));
            }
            UserRequest::ClaimWelcomeBonus { id, response } => {
                let _ = response.send(self.claim_welcome_bonus(id));
            }
            UserRequest::CreditReferral { id, response } => {
                let _ = response.send(self.credit_referral(id));
            }
            UserRequest::CountUsers { response } => {
                let _ = response.send(self.repository.count_users());
            }
        }
    }
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService {}
    }
}

#[async_trait]
impl Service<UserRequest, UserRequestHandler> for UserService {}
