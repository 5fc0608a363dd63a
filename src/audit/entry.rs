//! Audit log and statistics payloads.

use crate::core::types::FirewallVerdict;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable record of one scan decision.
///
/// Field names follow the service's snake_case log schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Entry id (matches `ScanResult::audit_id`).
    pub id: u64,

    /// When the decision was made, as sent by the server.
    pub timestamp: String,

    /// Source type of the scanned content.
    #[serde(default)]
    pub source_type: String,

    /// Source identifier of the scanned content.
    #[serde(default)]
    pub source_identifier: String,

    /// Trust score at decision time.
    #[serde(default)]
    pub trust_score: f64,

    /// Sensitivity level name.
    #[serde(default)]
    pub sensitivity_level: String,

    /// Firewall verdict.
    pub firewall_result: FirewallVerdict,

    /// Anomaly score.
    #[serde(default)]
    pub anomaly_score: f64,

    /// Indicators that contributed to the verdict.
    #[serde(default)]
    pub threat_indicators: Vec<String>,

    /// Human-readable explanation.
    #[serde(default)]
    pub reason: String,

    /// Server-side processing time.
    #[serde(default)]
    pub pipeline_duration_ms: u64,
}

impl AuditEntry {
    /// Parses the timestamp.
    ///
    /// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS` form (read as UTC).
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_server_timestamp(&self.timestamp)
    }
}

/// Pagination block of a list response.
///
/// `has_more` is computed by the server and is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page size used.
    pub limit: u32,
    /// Offset of this page.
    pub offset: u32,
    /// Whether further pages exist.
    pub has_more: bool,
}

impl Pagination {
    /// Returns the offset of the next page, if there is one.
    pub fn next_offset(&self) -> Option<u32> {
        if self.has_more {
            Some(self.offset.saturating_add(self.limit))
        } else {
            None
        }
    }
}

/// One page of audit log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResponse {
    /// Entries on this page.
    pub logs: Vec<AuditEntry>,
    /// Total matching entries.
    pub total: u64,
    /// Pagination state.
    pub pagination: Pagination,
}

/// Request count for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    /// Source identifier.
    pub source: String,
    /// Number of scans.
    pub count: u64,
}

/// Aggregated statistics over a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    /// All scans in the window.
    pub total_operations: u64,
    /// Scans allowed.
    pub allowed_count: u64,
    /// Scans blocked.
    pub blocked_count: u64,
    /// Scans quarantined.
    pub quarantined_count: u64,
    /// Busiest sources.
    #[serde(default)]
    pub top_sources: Vec<SourceCount>,
    /// Counts per threat indicator.
    #[serde(default)]
    pub threat_breakdown: BTreeMap<String, u64>,
}

impl AuditStats {
    /// Returns the share of operations that were blocked or quarantined.
    pub fn threat_ratio(&self) -> f64 {
        if self.total_operations == 0 {
            return 0.0;
        }
        self.blocked_count.saturating_add(self.quarantined_count) as f64 / self.total_operations as f64
    }
}

pub(crate) fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
