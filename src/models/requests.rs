use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Deposit,
    Withdraw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Parses an admin decision. `pending` is never a valid target.
    pub fn parse_action(action: &str) -> Option<RequestStatus> {
        match action {
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: u64,
    pub user_id: i64,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub amount: f64,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl Request {
    /// Balance delta applied when the request is approved.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            RequestType::Deposit => self.amount,
            RequestType::Withdraw => -self.amount,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub user_id: i64,
    pub user: String,
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub amount: f64,
}
