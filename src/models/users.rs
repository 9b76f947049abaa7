use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub balance: f64,
    pub total_earned: f64,
    pub referrals: u32,
    pub is_new_user: bool,
    pub has_welcome_bonus: bool,
    pub free_flips: u32,
    pub join_date: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub balance: Option<f64>,
    pub total_earned: Option<f64>,
    pub referrals: Option<u32>,
    pub is_new_user: Option<bool>,
    pub has_welcome_bonus: Option<bool>,
    pub free_flips: Option<u32>,
}
