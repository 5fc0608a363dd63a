//! Quarantine queue items and review actions.

use crate::audit::parse_server_timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of a quarantined item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarantineStatus {
    /// Awaiting review.
    Pending,
    /// Released by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Expired without review.
    Expired,
}

impl QuarantineStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    /// Returns `true` once no further review is possible.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for QuarantineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for a pending quarantine item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    /// Release the content.
    Approve,
    /// Keep the content blocked.
    Reject,
}

impl ReviewAction {
    /// Returns the wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire body for `POST /v1/quarantine/{id}/review`.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewRequest {
    pub action: ReviewAction,
}

/// Content held back for human review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantineItem {
    /// Item id, used for review.
    pub id: u64,

    /// Title given at submission, if any.
    #[serde(default)]
    pub original_title: Option<String>,

    /// Source type of the content.
    #[serde(default)]
    pub source_type: String,

    /// Source identifier of the content.
    #[serde(default)]
    pub source_identifier: String,

    /// Why the content was held.
    #[serde(default)]
    pub reason: String,

    /// Indicators that contributed to the verdict.
    #[serde(default)]
    pub threat_indicators: Vec<String>,

    /// Anomaly score.
    #[serde(default)]
    pub anomaly_score: f64,

    /// Firewall verdict name.
    #[serde(default)]
    pub firewall_result: String,

    /// Review state.
    pub status: QuarantineStatus,

    /// When the item was created, as sent by the server.
    pub created_at: String,

    /// When the item expires, if it does.
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl QuarantineItem {
    /// Returns `true` if the item is still awaiting review.
    pub fn is_pending(&self) -> bool {
        self.status == QuarantineStatus::Pending
    }

    /// Parses `created_at`.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_server_timestamp(&self.created_at)
    }

    /// Parses `expires_at`.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at.as_deref().and_then(parse_server_timestamp)
    }

    /// Returns `true` if the item is marked expired or its expiry is
    /// before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == QuarantineStatus::Expired
            || self.expires_at_utc().map(|e| e < now).unwrap_or(false)
    }
}

/// A page of the quarantine queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarantineResponse {
    /// Items on this page.
    pub items: Vec<QuarantineItem>,
    /// Total matching items.
    pub total: u64,
}

impl QuarantineResponse {
    /// Iterates over items still awaiting review.
    pub fn pending(&self) -> impl Iterator<Item = &QuarantineItem> {
        self.items.iter().filter(|i| i.is_pending())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn make_test_item(status: &str, expires_at: Option<&str>) -> QuarantineItem {
        serde_json::from_value(json!({
            "id": 5,
            "originalTitle": null,
            "sourceType": "web",
            "sourceIdentifier": "crawler",
            "reason": "possible exfiltration",
            "threatIndicators": ["data_exfil"],
            "anomalyScore": 0.7,
            "firewallResult": "QUARANTINE",
            "status": status,
            "createdAt": "2024-05-01T00:00:00Z",
            "expiresAt": expires_at
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_item() {
        let item = make_test_item("pending", None);
        assert_eq!(item.id, 5);
        assert!(item.original_title.is_none());
        assert!(item.is_pending());
        assert_eq!(
            item.created_at_utc(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();

        let item = make_test_item("pending", Some("2024-05-01T12:00:00Z"));
        assert!(item.is_expired_at(now));

        let item = make_test_item("pending", Some("2024-05-03T00:00:00Z"));
        assert!(!item.is_expired_at(now));

        let item = make_test_item("expired", None);
        assert!(item.is_expired_at(now));

        let item = make_test_item("pending", None);
        assert!(!item.is_expired_at(now));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_value::<QuarantineItem>(json!({
            "id": 1,
            "status": "archived",
            "createdAt": "2024-05-01T00:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_review_body() {
        let body = serde_json::to_value(ReviewRequest {
            action: ReviewAction::Approve,
        })
        .unwrap();
        assert_eq!(body, json!({ "action": "approve" }));
        assert_eq!(ReviewAction::Reject.to_string(), "reject");
        assert!(QuarantineStatus::Rejected.is_final());
        assert!(!QuarantineStatus::Pending.is_final());
    }

    #[test]
    fn test_pending_filter() {
        let response = QuarantineResponse {
            items: vec![
                make_test_item("pending", None),
                make_test_item("approved", None),
            ],
            total: 2,
        };
        assert_eq!(response.pending().count(), 1);
    }
}
