//! The `ShieldCortex` client and its domain operations.

use crate::audit::{AuditQuery, AuditResponse, AuditStats};
use crate::client::dispatcher::RequestDispatcher;
use crate::client::events;
use crate::core::query::{serialize_query, QueryParams};
use crate::core::{ArcTransport, ClientConfig, Result, TimeRange};
use crate::quarantine::{QuarantineQuery, QuarantineResponse, ReviewAction, ReviewRequest};
use crate::scan::{BatchItem, BatchOptions, BatchRequest, BatchResult, ScanInput, ScanResult};

use tokio_util::sync::CancellationToken;

const SCAN_PATH: &str = "/v1/scan";
const SCAN_BATCH_PATH: &str = "/v1/scan/batch";
const AUDIT_PATH: &str = "/v1/audit";
const AUDIT_STATS_PATH: &str = "/v1/audit/stats";
const QUARANTINE_PATH: &str = "/v1/quarantine";

/// Client for the ShieldCortex scanning API.
///
/// Every operation issues exactly one HTTP request and returns when the
/// response (or a failure) arrives. Nothing is cached, retried or queued,
/// and clones share the same configuration and transport.
///
/// # Examples
///
/// ```rust,no_run
/// use shieldcortex::{ScanInput, ShieldCortex};
///
/// # async fn run() -> shieldcortex::Result<()> {
/// let client = ShieldCortex::new("sk-live-...")?;
/// let result = client.scan(&ScanInput::new("hello")).await?;
/// println!("verdict {} (audit #{})", result.verdict(), result.audit_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ShieldCortex {
    dispatcher: RequestDispatcher,
    cancel: Option<CancellationToken>,
}

impl ShieldCortex {
    /// Creates a client for `api_key` with default settings.
    #[cfg(feature = "reqwest-transport")]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Creates a client from a configuration, using the reqwest transport.
    #[cfg(feature = "reqwest-transport")]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = crate::backends::ReqwestTransport::new(&config)?;
        Self::with_transport(config, std::sync::Arc::new(transport))
    }

    /// Creates a client from `SHIELDCORTEX_API_KEY` / `SHIELDCORTEX_BASE_URL`.
    #[cfg(feature = "reqwest-transport")]
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a client over an explicit transport.
    pub fn with_transport(config: ClientConfig, transport: ArcTransport) -> Result<Self> {
        Ok(Self {
            dispatcher: RequestDispatcher::new(config, transport)?,
            cancel: None,
        })
    }

    /// Returns a handle whose calls are cancelled when `token` fires.
    ///
    /// A cancelled call fails with [`ClientError::Cancelled`](crate::ClientError::Cancelled).
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            cancel: Some(token),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Returns the underlying dispatcher.
    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    fn cancel(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    // --- Scan ---

    /// Scans one piece of content. `POST /v1/scan`.
    pub async fn scan(&self, input: &ScanInput) -> Result<ScanResult> {
        let result: ScanResult = self.dispatcher.post(SCAN_PATH, input, self.cancel()).await?;
        events::emit_scan_verdict(&result);
        Ok(result)
    }

    /// Scans several items with shared options. `POST /v1/scan/batch`.
    ///
    /// The options are sent next to `items` at the top level of the body.
    pub async fn scan_batch(&self, items: &[BatchItem], options: Option<&BatchOptions>) -> Result<BatchResult> {
        let defaults = BatchOptions::default();
        let body = BatchRequest {
            items,
            options: options.unwrap_or(&defaults),
        };
        let result: BatchResult = self
            .dispatcher
            .post(SCAN_BATCH_PATH, &body, self.cancel())
            .await?;
        events::emit_batch_summary(&result);
        Ok(result)
    }

    // --- Audit ---

    /// Lists audit log entries. `GET /v1/audit`.
    pub async fn get_audit_logs(&self, query: Option<&AuditQuery>) -> Result<AuditResponse> {
        let path = format!("{}{}", AUDIT_PATH, serialize_query(query));
        self.dispatcher.get(&path, self.cancel()).await
    }

    /// Fetches aggregated statistics. `GET /v1/audit/stats`.
    pub async fn get_audit_stats(&self, time_range: Option<TimeRange>) -> Result<AuditStats> {
        let params = QueryParams::new().with("timeRange", time_range);
        let path = format!("{}{}", AUDIT_STATS_PATH, params.to_query_string());
        self.dispatcher.get(&path, self.cancel()).await
    }

    // --- Quarantine ---

    /// Lists the quarantine queue. `GET /v1/quarantine`.
    pub async fn get_quarantine(&self, query: Option<&QuarantineQuery>) -> Result<QuarantineResponse> {
        let path = format!("{}{}", QUARANTINE_PATH, serialize_query(query));
        self.dispatcher.get(&path, self.cancel()).await
    }

    /// Approves or rejects a quarantined item.
    /// `POST /v1/quarantine/{id}/review`.
    pub async fn review_quarantine(&self, id: u64, action: ReviewAction) -> Result<()> {
        let path = format!("{}/{}/review", QUARANTINE_PATH, id);
        tracing::info!(quarantine_id = id, action = %action, "Reviewing quarantined item");
        self.dispatcher
            .post_discard(&path, &ReviewRequest { action }, self.cancel())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MockTransport;
    use crate::core::{ClientError, FirewallVerdict, HttpMethod, HttpResponse};
    use crate::quarantine::QuarantineStatus;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;

    fn client(mock: &Arc<MockTransport>) -> ShieldCortex {
        let config = ClientConfig::new("sk-test").with_base_url("https://api.test/");
        ShieldCortex::with_transport(config, mock.clone()).unwrap()
    }

    fn scan_json(audit_id: u64, verdict: &str) -> Value {
        json!({
            "allowed": verdict == "ALLOW",
            "firewall": {
                "result": verdict,
                "reason": "",
                "threatIndicators": [],
                "anomalyScore": 0.0,
                "blockedPatterns": []
            },
            "sensitivity": { "level": "PUBLIC", "redactionRequired": false },
            "trust": { "score": 1.0 },
            "auditId": audit_id
        })
    }

    fn body_json(mock: &MockTransport) -> Value {
        let body = mock.last_request().and_then(|r| r.body).expect("request body");
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_scan() {
        let mock = Arc::new(MockTransport::new().with_response(
            HttpMethod::Post,
            "/v1/scan",
            HttpResponse::new(200, scan_json(42, "ALLOW").to_string()),
        ));
        let client = client(&mock);

        let result = client.scan(&ScanInput::new("hello")).await.unwrap();
        assert_eq!(result.audit_id, 42);
        assert_eq!(result.verdict(), FirewallVerdict::Allow);

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "https://api.test/v1/scan");
        assert_eq!(body_json(&mock), json!({ "content": "hello" }));
    }

    #[tokio::test]
    async fn test_scan_batch_body_and_totals() {
        let batch = json!({
            "totalScanned": 2,
            "threats": 1,
            "clean": 1,
            "results": [scan_json(1, "ALLOW"), scan_json(2, "BLOCK")]
        });
        let mock = Arc::new(MockTransport::new().with_response(
            HttpMethod::Post,
            "/v1/scan/batch",
            HttpResponse::new(200, batch.to_string()),
        ));
        let client = client(&mock);

        let items = vec![BatchItem::new("a"), BatchItem::new("b")];
        let options = BatchOptions::new().with_config(
            crate::scan::ScanConfig::new().with_fragmentation_detection(true),
        );
        let result = client.scan_batch(&items, Some(&options)).await.unwrap();

        assert!(result.is_consistent());
        assert_eq!(result.total_scanned, result.clean + result.threats);
        assert_eq!(
            body_json(&mock),
            json!({
                "items": [{ "content": "a" }, { "content": "b" }],
                "config": { "enableFragmentationDetection": true }
            })
        );

        client.scan_batch(&items, None).await.unwrap();
        assert_eq!(
            body_json(&mock),
            json!({ "items": [{ "content": "a" }, { "content": "b" }] })
        );
    }

    #[tokio::test]
    async fn test_audit_logs_path_drops_unset_filters() {
        let page = json!({
            "logs": [],
            "total": 0,
            "pagination": { "limit": 50, "offset": 0, "hasMore": false }
        });
        let mock = Arc::new(
            MockTransport::new().with_default_response(HttpResponse::new(200, page.to_string())),
        );
        let client = client(&mock);

        let query = AuditQuery {
            from: Some("2024-01-01".into()),
            level: None,
            ..Default::default()
        };
        client.get_audit_logs(Some(&query)).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().path_and_query(),
            "/v1/audit?from=2024-01-01"
        );

        client.get_audit_logs(None).await.unwrap();
        assert_eq!(mock.last_request().unwrap().path_and_query(), "/v1/audit");
    }

    #[tokio::test]
    async fn test_audit_stats_time_range() {
        let stats = json!({
            "totalOperations": 0,
            "allowedCount": 0,
            "blockedCount": 0,
            "quarantinedCount": 0,
            "topSources": [],
            "threatBreakdown": {}
        });
        let mock = Arc::new(
            MockTransport::new().with_default_response(HttpResponse::new(200, stats.to_string())),
        );
        let client = client(&mock);

        client.get_audit_stats(Some(TimeRange::Last7Days)).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().path_and_query(),
            "/v1/audit/stats?timeRange=7d"
        );

        client.get_audit_stats(None).await.unwrap();
        assert_eq!(mock.last_request().unwrap().path_and_query(), "/v1/audit/stats");
    }

    #[tokio::test]
    async fn test_quarantine_listing() {
        let listing = json!({
            "items": [{
                "id": 9,
                "originalTitle": "draft",
                "sourceType": "agent",
                "sourceIdentifier": "planner",
                "reason": "suspicious instructions",
                "threatIndicators": ["instruction_override"],
                "anomalyScore": 0.66,
                "firewallResult": "QUARANTINE",
                "status": "pending",
                "createdAt": "2024-05-01T00:00:00Z",
                "expiresAt": null
            }],
            "total": 1
        });
        let mock = Arc::new(
            MockTransport::new().with_default_response(HttpResponse::new(200, listing.to_string())),
        );
        let client = client(&mock);

        let query = QuarantineQuery::new()
            .with_status(QuarantineStatus::Pending)
            .with_pagination(20, 0);
        let response = client.get_quarantine(Some(&query)).await.unwrap();

        assert_eq!(response.items[0].id, 9);
        assert_eq!(response.pending().count(), 1);
        assert_eq!(
            mock.last_request().unwrap().path_and_query(),
            "/v1/quarantine?status=pending&limit=20&offset=0"
        );
    }

    #[tokio::test]
    async fn test_review_quarantine() {
        let mock = Arc::new(MockTransport::new().with_default_response(HttpResponse::new(200, "")));
        let client = client(&mock);

        client.review_quarantine(5, ReviewAction::Approve).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.path_and_query(), "/v1/quarantine/5/review");
        assert_eq!(sent.body.as_deref(), Some("{\"action\":\"approve\"}"));
    }

    #[tokio::test]
    async fn test_errors_surface_without_retry() {
        let mock = Arc::new(
            MockTransport::new()
                .with_default_response(HttpResponse::new(429, "{\"error\":\"rate\"}")),
        );
        let client = client(&mock);

        let err = client.scan(&ScanInput::new("x")).await.unwrap_err();
        assert!(matches!(err, ClientError::RateLimited { retry_after: None, .. }));
        assert_eq!(mock.request_count(), 1);

        mock.add_response(HttpMethod::Post, "/v1/scan", HttpResponse::new(401, "nope"));
        let err = client.scan(&ScanInput::new("x")).await.unwrap_err();
        assert!(matches!(err, ClientError::Auth { .. }));
        assert_eq!(err.body(), Some("nope"));
    }

    #[tokio::test]
    async fn test_cancellation_handle() {
        let mock = Arc::new(MockTransport::new().with_latency(Duration::from_secs(30)));
        let client = client(&mock);
        let token = CancellationToken::new();
        let cancellable = client.with_cancellation(token.clone());

        let call = tokio::spawn(async move { cancellable.get_audit_logs(None).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let err = call.await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let mock = Arc::new(MockTransport::new().with_response(
            HttpMethod::Post,
            "/v1/scan",
            HttpResponse::new(200, scan_json(7, "ALLOW").to_string()),
        ));
        let client = client(&mock);

        let first = ScanInput::new("one");
        let second = ScanInput::new("two");
        let (a, b) = tokio::join!(client.scan(&first), client.scan(&second));
        assert_eq!(a.unwrap().audit_id, 7);
        assert_eq!(b.unwrap().audit_id, 7);
        assert_eq!(mock.request_count(), 2);
    }
}
