//! Request dispatch: URL composition, default headers, JSON encoding,
//! status classification and JSON decoding.

use crate::client::events;
use crate::core::classify::classify_response;
use crate::core::{
    normalize_base_url, ArcTransport, ClientConfig, ClientError, HttpMethod, HttpRequest,
    HttpResponse, Result,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Sends one request per call through a [`Transport`](crate::Transport).
///
/// The dispatcher holds only the read-only configuration and the
/// transport, so clones share both and can be used concurrently.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    config: Arc<ClientConfig>,
    transport: ArcTransport,
}

impl RequestDispatcher {
    /// Creates a dispatcher after normalizing the base URL and validating
    /// the configuration.
    pub fn new(mut config: ClientConfig, transport: ArcTransport) -> Result<Self> {
        config.base_url = normalize_base_url(&config.base_url);
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &ArcTransport {
        &self.transport
    }

    /// Builds the outgoing request for a service-relative `path`.
    ///
    /// `path` must already carry its query string. Default headers are set
    /// first and configured extra headers are applied over them.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut request = HttpRequest::new(method, format!("{}{}", self.config.base_url, path));
        request.set_header("Content-Type", "application/json");
        request.set_header("Authorization", self.config.bearer());
        request.set_header("User-Agent", self.config.user_agent.as_str());
        for (name, value) in &self.config.extra_headers {
            request.set_header(name.as_str(), value.as_str());
        }
        request.body = body;
        request
    }

    /// Performs the round trip and returns the raw 2xx response.
    ///
    /// Non-2xx responses are classified and returned as errors. Nothing is
    /// retried.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse> {
        let request_id = Uuid::new_v4().to_string();
        self.send_logged(&request_id, method, path, body, cancel).await
    }

    async fn send_logged(
        &self,
        request_id: &str,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse> {
        let request = self.build_request(method, path, body);

        let result = self.round_trip(request_id, method, path, request, cancel).await;
        if let Err(ref error) = result {
            events::emit_request_failed(request_id, method, path, error);
        }
        result
    }

    async fn round_trip(
        &self,
        request_id: &str,
        method: HttpMethod,
        path: &str,
        request: HttpRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse> {
        if cancel.map(|t| t.is_cancelled()).unwrap_or(false) {
            return Err(ClientError::Cancelled);
        }

        events::emit_request_dispatched(request_id, method, path, self.transport.name());
        let start = Instant::now();

        let response = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(ClientError::Cancelled),
                    result = self.transport.send(request) => result,
                }
            }
            None => self.transport.send(request).await,
        }?;

        events::emit_response_received(request_id, method, path, response.status, start.elapsed());

        match classify_response(response.status, response.body.as_str(), &response.headers) {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }

    /// Sends a request with an optional JSON body and decodes the JSON
    /// response.
    ///
    /// A 2xx body that does not decode as `T` is a
    /// [`ClientError::Decode`].
    pub async fn dispatch<B, T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        cancel: Option<&CancellationToken>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let encoded = body.map(serde_json::to_string).transpose()?;
        let request_id = Uuid::new_v4().to_string();
        let response = self
            .send_logged(&request_id, method, path, encoded, cancel)
            .await?;

        decode_body(response.body).map_err(|error| {
            events::emit_request_failed(&request_id, method, path, &error);
            error
        })
    }

    /// `GET` and decode.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<T> {
        self.dispatch::<(), T>(HttpMethod::Get, path, None, cancel).await
    }

    /// `POST` a JSON body and decode.
    pub async fn post<B, T>(&self, path: &str, body: &B, cancel: Option<&CancellationToken>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(HttpMethod::Post, path, Some(body), cancel).await
    }

    /// `POST` a JSON body and discard the success body.
    pub async fn post_discard<B>(&self, path: &str, body: &B, cancel: Option<&CancellationToken>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string(body)?;
        self.send(HttpMethod::Post, path, Some(encoded), cancel).await?;
        Ok(())
    }
}

fn decode_body<T: DeserializeOwned>(body: String) -> Result<T> {
    serde_json::from_str(&body).map_err(|e| ClientError::Decode {
        message: e.to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MockTransport;
    use crate::client::events::capture::CapturedLogs;
    use crate::core::ApiErrorKind;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn dispatcher(mock: &Arc<MockTransport>, config: ClientConfig) -> RequestDispatcher {
        RequestDispatcher::new(config, mock.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_default_headers_and_url() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "{}")));
        let d = dispatcher(&mock, ClientConfig::new("sk-1").with_base_url("https://api.test/"));

        let _: Value = d.get("/v1/audit?limit=1", None).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.url, "https://api.test/v1/audit?limit=1");
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.header("authorization"), Some("Bearer sk-1"));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_extra_headers_override_defaults() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "{}")));
        let config = ClientConfig::new("sk-1")
            .with_header("content-type", "application/vnd.shieldcortex+json")
            .with_header("X-Tenant", "acme");
        let d = dispatcher(&mock, config);

        let _: Value = d.post("/v1/scan", &json!({"content": "x"}), None).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.header("Content-Type"), Some("application/vnd.shieldcortex+json"));
        assert_eq!(sent.header("x-tenant"), Some("acme"));
        assert_eq!(sent.header("authorization"), Some("Bearer sk-1"));
        assert_eq!(sent.body.as_deref(), Some("{\"content\":\"x\"}"));
    }

    #[tokio::test]
    async fn test_non_success_is_classified() {
        let mock = Arc::new(
            MockTransport::new()
                .with_default_response(HttpResponse::new(429, "busy").with_header("Retry-After", "12")),
        );
        let d = dispatcher(&mock, ClientConfig::new("k"));

        let err = d.get::<Value>("/v1/audit/stats", None).await.unwrap_err();
        assert_eq!(err.kind(), Some(ApiErrorKind::RateLimit));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(12)));
        assert_eq!(err.body(), Some("busy"));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "<html>")));
        let d = dispatcher(&mock, ClientConfig::new("k"));

        let err = d.get::<Value>("/v1/audit", None).await.unwrap_err();
        match err {
            ClientError::Decode { body, .. } => assert_eq!(body, "<html>"),
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_failure_is_logged() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "<html>")));
        let d = dispatcher(&mock, ClientConfig::new("k"));
        d.get::<Value>("/v1/audit", None).await.unwrap_err();

        let output = logs.contents();
        assert!(output.contains("request_failed"));
        assert!(output.contains("error_kind=decode"));
    }

    #[tokio::test]
    async fn test_failure_events_never_carry_the_api_key() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(401, "bad key")));
        let d = dispatcher(&mock, ClientConfig::new("sk-live-hidden-123"));
        let err = d.get::<Value>("/v1/audit", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Auth { .. }));

        let output = logs.contents();
        assert!(output.contains("error_kind=auth"));
        assert!(!output.contains("sk-live-hidden-123"));
        assert!(!output.contains("Bearer"));
    }

    #[tokio::test]
    async fn test_base_url_set_directly_is_normalized() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "{}")));
        let mut config = ClientConfig::new("k");
        config.base_url = "https://x.test//".into();
        let d = dispatcher(&mock, config);

        assert_eq!(d.config().base_url, "https://x.test");
        let _: Value = d.post("/v1/scan", &json!({"content": "x"}), None).await.unwrap();
        assert_eq!(mock.last_request().unwrap().url, "https://x.test/v1/scan");
    }

    #[tokio::test]
    async fn test_post_discard_ignores_empty_body() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(204, "")));
        let d = dispatcher(&mock, ClientConfig::new("k"));

        d.post_discard("/v1/quarantine/1/review", &json!({"action": "reject"}), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_transport() {
        let mock = Arc::new(MockTransport::new());
        let d = dispatcher(&mock, ClientConfig::new("k"));
        let token = CancellationToken::new();
        token.cancel();

        let err = d.get::<Value>("/v1/audit", Some(&token)).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_in_flight_request() {
        let mock = Arc::new(
            MockTransport::new()
                .with_default_response(HttpResponse::new(200, "{}"))
                .with_latency(Duration::from_secs(30)),
        );
        let d = dispatcher(&mock, ClientConfig::new("k"));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = d.get::<Value>("/v1/audit", Some(&token)).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_api_error() {
        let mock = Arc::new(MockTransport::new().with_default_error("connection refused", true));
        let d = dispatcher(&mock, ClientConfig::new("k"));

        let err = d.get::<Value>("/v1/audit", None).await.unwrap_err();
        assert!(!err.is_api_error());
        assert!(matches!(err, ClientError::Transport { timed_out: true, .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mock = Arc::new(MockTransport::new());
        let err = RequestDispatcher::new(ClientConfig::new(""), mock).unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }
}
