//! Mock transport for testing.
//!
//! This module provides a configurable in-memory transport that records
//! every request it receives and answers from canned responses, so client
//! code can be exercised without a network.

use crate::core::{ClientError, HttpMethod, HttpRequest, HttpResponse, Transport};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// A canned transport outcome.
#[derive(Debug, Clone)]
enum Canned {
    Response(HttpResponse),
    Failure { message: String, timed_out: bool },
}

impl Canned {
    fn into_result(self) -> Result<HttpResponse, ClientError> {
        match self {
            Self::Response(response) => Ok(response),
            Self::Failure { message, timed_out } => Err(ClientError::transport(message, timed_out)),
        }
    }
}

/// A mock transport for testing purposes.
///
/// Responses are looked up by method and path (without the query string).
/// Routes queued with [`MockTransport::push_response`] are answered in
/// order before falling back to the route's fixed response, then to the
/// default.
///
/// # Examples
///
/// ```rust
/// use shieldcortex::backends::MockTransport;
/// use shieldcortex::{HttpMethod, HttpResponse};
/// use std::time::Duration;
///
/// let transport = MockTransport::new()
///     .with_response(HttpMethod::Post, "/v1/scan", HttpResponse::new(200, "{}"))
///     .with_default_response(HttpResponse::new(404, "not found"))
///     .with_latency(Duration::from_millis(5));
///
/// assert_eq!(transport.request_count(), 0);
/// ```
#[derive(Debug)]
pub struct MockTransport {
    name: String,
    routes: Mutex<HashMap<(HttpMethod, String), Canned>>,
    queued: Mutex<HashMap<(HttpMethod, String), VecDeque<Canned>>>,
    default: Canned,
    latency: Option<Duration>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Creates a mock that answers every request with `200 {}`.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            routes: Mutex::new(HashMap::new()),
            queued: Mutex::new(HashMap::new()),
            default: Canned::Response(HttpResponse::new(200, "{}")),
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the name of this transport.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the response for requests that match no route.
    pub fn with_default_response(mut self, response: HttpResponse) -> Self {
        self.default = Canned::Response(response);
        self
    }

    /// Makes unmatched requests fail at the transport level.
    pub fn with_default_error(mut self, message: impl Into<String>, timed_out: bool) -> Self {
        self.default = Canned::Failure {
            message: message.into(),
            timed_out,
        };
        self
    }

    /// Sets a fixed response for a method and path.
    pub fn with_response(self, method: HttpMethod, path: impl Into<String>, response: HttpResponse) -> Self {
        self.add_response(method, path, response);
        self
    }

    /// Sets the simulated latency for every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sets a fixed response for a method and path (mutable version).
    pub fn add_response(&self, method: HttpMethod, path: impl Into<String>, response: HttpResponse) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.into()), Canned::Response(response));
    }

    /// Queues a one-shot response for a method and path.
    pub fn push_response(&self, method: HttpMethod, path: impl Into<String>, response: HttpResponse) {
        self.queued
            .lock()
            .unwrap()
            .entry((method, path.into()))
            .or_default()
            .push_back(Canned::Response(response));
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clears recorded requests and all configured routes.
    pub fn reset(&self) {
        self.requests.lock().unwrap().clear();
        self.routes.lock().unwrap().clear();
        self.queued.lock().unwrap().clear();
    }

    fn lookup(&self, method: HttpMethod, path: &str) -> Canned {
        let key = (method, path.to_string());
        if let Some(next) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
        {
            return next;
        }
        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let path = request
            .path_and_query()
            .split('?')
            .next()
            .unwrap_or("/")
            .to_string();
        let method = request.method;
        self.requests.lock().unwrap().push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.lookup(method, &path).into_result()
    }
}
