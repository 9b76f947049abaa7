use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;

use crate::models::requests::{NewRequest, Request, RequestStatus, RequestType};
use crate::models::stats::RequestTotals;
use crate::services::ServiceError;

/// In-memory request store. Clones share the same map.
#[derive(Clone, Default)]
pub struct RequestRepository {
    requests: Arc<DashMap<u64, Request>>,
}

impl RequestRepository {
    pub fn new() -> Self {
        RequestRepository {
            requests: Arc::new(DashMap::new()),
        }
    }

    pub fn list_requests(&self) -> Vec<Request> {
        let mut requests: Vec<Request> = self
            .requests
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by_key(|request| request.id);

        requests
    }

    pub fn insert_request(&self, new_request: NewRequest) -> Request {
        // Ids stay dense because requests are never deleted.
        let id = self.requests.len() as u64 + 1;
        let request = Request {
            id,
            user_id: new_request.user_id,
            user: new_request.user,
            kind: new_request.kind,
            amount: new_request.amount,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };

        self.requests.insert(id, request.clone());

        request
    }

    pub fn get_request(&self, id: u64) -> Result<Request, ServiceError> {
        self.requests
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(ServiceError::RequestNotFound(id))
    }

    /// Overwrites the status unconditionally; a decided request can be
    /// re-decided (see DESIGN.md on double approval).
    pub fn set_status(&self, id: u64, status: RequestStatus) -> Result<Request, ServiceError> {
        let mut entry = self
            .requests
            .get_mut(&id)
            .ok_or(ServiceError::RequestNotFound(id))?;

        let request = entry.value_mut();
        request.status = status;

        Ok(request.clone())
    }

    pub fn totals(&self) -> RequestTotals {
        let mut totals = RequestTotals::default();

        for entry in self.requests.iter() {
            let request = entry.value();
            totals.total_requests += 1;

            if request.status == RequestStatus::Pending {
                totals.pending_requests += 1;
            }
            if request.status == RequestStatus::Approved {
                match request.kind {
                    RequestType::Deposit => totals.total_deposits += request.amount,
                    RequestType::Withdraw => totals.total_withdrawals += request.amount,
                }
            }
        }

        totals
    }
}
