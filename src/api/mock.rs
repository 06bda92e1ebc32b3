//! Scripted in-memory transport for exercising the client without a backend.

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{RestavoError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
pub enum MockReply {
    Status(u16, String),
    TransportFailure,
}

impl MockReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Status(status, body.into())
    }

    pub fn ok(body: serde_json::Value) -> Self {
        MockReply::Status(200, body.to_string())
    }
}

/// Replies are queued per route (`"POST /login"`) and consumed in order.
/// An unscripted route is a test bug and panics.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<HashMap<String, VecDeque<MockReply>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, route: &str, reply: MockReply) {
        self.replies
            .borrow_mut()
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, route: &str) -> Vec<ApiRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| route_key(r) == route)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, route: &str) -> usize {
        self.requests_to(route).len()
    }
}

fn route_key(request: &ApiRequest) -> String {
    format!("{} {}", request.method, request.path)
}

impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());

        let key = route_key(request);
        let reply = self
            .replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(MockReply::Status(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(MockReply::TransportFailure) => {
                Err(RestavoError::Transport("connection refused".to_string()))
            }
            None => panic!("No scripted reply for {}", key),
        }
    }
}
