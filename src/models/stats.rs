use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    pub total_requests: usize,
    pub pending_requests: usize,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
}

/// Request-side aggregates; the user count is merged in at the HTTP layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestTotals {
    pub total_requests: usize,
    pub pending_requests: usize,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
}
