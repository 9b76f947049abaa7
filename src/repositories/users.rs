use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::users::{NewUser, User, UserUpdate};
use crate::services::ServiceError;

/// In-memory user store. Clones share the same map.
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<DashMap<i64, User>>,
}

impl UserRepository {
    pub fn new() -> Self {
        UserRepository {
            users: Arc::new(DashMap::new()),
        }
    }

    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| (user.join_date, user.id));

        users
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<User, ServiceError> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::UserNotFound(id))
    }

    pub fn insert_user(&self, new_user: NewUser, free_flips: u32) -> Result<User, ServiceError> {
        let user = User {
            id: new_user.id,
            username: new_user
                .username
                .unwrap_or_else(|| format!("user_{}", new_user.id)),
            first_name: new_user.first_name.unwrap_or_else(|| "User".to_string()),
            last_name: new_user.last_name.unwrap_or_default(),
            balance: 0.0,
            total_earned: 0.0,
            referrals: 0,
            is_new_user: true,
            has_welcome_bonus: false,
            free_flips,
            join_date: Utc::now(),
        };

        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(ServiceError::UserExists(user.id)),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    pub fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, ServiceError> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or(ServiceError::UserNotFound(id))?;
        let user = entry.value_mut();

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(balance) = update.balance {
            user.balance = balance;
        }
        if let Some(total_earned) = update.total_earned {
            user.total_earned = total_earned;
        }
        if let Some(referrals) = update.referrals {
            user.referrals = referrals;
        }
        if let Some(is_new_user) = update.is_new_user {
            user.is_new_user = is_new_user;
        }
        if let Some(has_welcome_bonus) = update.has_welcome_bonus {
            user.has_welcome_bonus = has_welcome_bonus;
        }
        if let Some(free_flips) = update.free_flips {
            user.free_flips = free_flips;
        }

        Ok(user.clone())
    }

    /// Applies a signed delta with no floor; the balance may go negative.
    pub fn adjust_balance(&self, id: i64, delta: f64) -> Result<User, ServiceError> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or(ServiceError::UserNotFound(id))?;
        let user = entry.value_mut();

        user.balance += delta;

        Ok(user.clone())
    }

    pub fn claim_welcome_bonus(
        &self,
        id: i64,
        amount: f64,
        free_flips: u32,
    ) -> Result<User, ServiceError> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or(ServiceError::UserNotFound(id))?;
        let user = entry.value_mut();

        if user.has_welcome_bonus {
            return Err(ServiceError::BonusClaimed(id));
        }

        user.has_welcome_bonus = true;
        user.is_new_user = false;
        user.balance += amount;
        user.total_earned += amount;
        user.free_flips += free_flips;

        Ok(user.clone())
    }

    pub fn credit_referral(&self, id: i64, reward: f64) -> Result<User, ServiceError> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or(ServiceError::UserNotFound(id))?;
        let user = entry.value_mut();

        user.referrals += 1;
        user.balance += reward;
        user.total_earned += reward;

        Ok(user.clone())
    }

    pub fn count_users(&self) -> usize {
        self.users.len()
    }
}
