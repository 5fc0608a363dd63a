//! Structured request and verdict events.
//!
//! Events are plain `tracing` records under the `shieldcortex::requests`
//! target, so any subscriber (fmt, JSON, OpenTelemetry) can capture them.
//! The API key is never part of an event.

use crate::core::{ClientError, HttpMethod};
use crate::scan::{BatchResult, ScanResult};

use std::time::Duration;

/// Emits an event for a request about to be sent.
pub fn emit_request_dispatched(request_id: &str, method: HttpMethod, path: &str, transport: &str) {
    tracing::debug!(
        target: "shieldcortex::requests",
        event_type = "request_dispatched",
        request_id = %request_id,
        method = %method,
        path = %path,
        transport = %transport,
        "Request dispatched"
    );
}

/// Emits an event for a response received from the service.
pub fn emit_response_received(request_id: &str, method: HttpMethod, path: &str, status: u16, elapsed: Duration) {
    tracing::debug!(
        target: "shieldcortex::requests",
        event_type = "response_received",
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        elapsed_ms = elapsed.as_millis() as u64,
        "Response received"
    );
}

/// Emits an event for a failed request.
pub fn emit_request_failed(request_id: &str, method: HttpMethod, path: &str, error: &ClientError) {
    let kind = error.kind().map(|k| k.as_str()).unwrap_or(match error {
        ClientError::Transport { .. } => "transport",
        ClientError::Decode { .. } => "decode",
        ClientError::Cancelled => "cancelled",
        _ => "client",
    });

    tracing::warn!(
        target: "shieldcortex::requests",
        event_type = "request_failed",
        request_id = %request_id,
        method = %method,
        path = %path,
        error_kind = %kind,
        status = ?error.status(),
        retry_after_secs = ?error.retry_after().map(|d| d.as_secs()),
        error = %error,
        "Request failed"
    );
}

/// Emits an event for a single scan verdict.
pub fn emit_scan_verdict(result: &ScanResult) {
    tracing::info!(
        target: "shieldcortex::requests",
        event_type = "scan_verdict",
        audit_id = result.audit_id,
        verdict = %result.verdict(),
        allowed = result.allowed,
        sensitivity = ?result.sensitivity_level(),
        anomaly_score = result.firewall.anomaly_score,
        threat_indicators = ?result.firewall.threat_indicators,
        "Scan verdict received"
    );
}

/// Emits an event summarizing a batch scan.
///
/// A batch whose totals do not add up is reported but still returned.
pub fn emit_batch_summary(result: &BatchResult) {
    tracing::info!(
        target: "shieldcortex::requests",
        event_type = "batch_summary",
        total_scanned = result.total_scanned,
        threats = result.threats,
        clean = result.clean,
        results = result.results.len(),
        "Batch scan completed"
    );

    if !result.is_consistent() {
        tracing::warn!(
            target: "shieldcortex::requests",
            event_type = "batch_totals_mismatch",
            total_scanned = result.total_scanned,
            threats = result.threats,
            clean = result.clean,
            "Batch totals do not add up"
        );
    }
}
