//! Scan classification results.

use crate::core::types::{FirewallVerdict, SensitivityLevel};

use serde::{Deserialize, Serialize};

/// The firewall section of a scan result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallResult {
    /// The verdict.
    pub result: FirewallVerdict,

    /// Human-readable explanation.
    #[serde(default)]
    pub reason: String,

    /// Indicators that contributed to the verdict.
    #[serde(default)]
    pub threat_indicators: Vec<String>,

    /// Anomaly score computed by the firewall.
    #[serde(default)]
    pub anomaly_score: f64,

    /// Patterns that caused a block.
    #[serde(default)]
    pub blocked_patterns: Vec<String>,
}

/// The sensitivity section of a scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityResult {
    /// Classification tier.
    pub level: SensitivityLevel,

    /// Whether the content should be redacted before further use.
    #[serde(default)]
    pub redaction_required: bool,
}

/// Trust assigned to the content's source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustResult {
    /// Trust score.
    pub score: f64,
}

/// Split-payload evasion analysis, present only when enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentationResult {
    /// Fragmentation score.
    pub score: f64,

    /// Server-assigned risk label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
}

/// Plan usage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Scans used in the current period.
    pub scans_used: u64,
    /// Scans allowed in the current period.
    pub scans_limit: u64,
}

impl Usage {
    /// Returns how many scans are left, saturating at zero.
    pub fn remaining(&self) -> u64 {
        self.scans_limit.saturating_sub(self.scans_used)
    }
}

/// The classification of one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Whether the content may be used.
    pub allowed: bool,

    /// Firewall verdict and detail.
    pub firewall: FirewallResult,

    /// Sensitivity classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<SensitivityResult>,

    /// Source trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<TrustResult>,

    /// Fragmentation analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragmentation: Option<FragmentationResult>,

    /// Audit log entry recording this decision.
    pub audit_id: u64,

    /// Usage counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ScanResult {
    /// Returns the firewall verdict.
    pub fn verdict(&self) -> FirewallVerdict {
        self.firewall.result
    }

    /// Returns `true` if the content was blocked.
    pub fn is_blocked(&self) -> bool {
        self.firewall.result == FirewallVerdict::Block
    }

    /// Returns `true` if the content was sent to the quarantine queue.
    pub fn is_quarantined(&self) -> bool {
        self.firewall.result == FirewallVerdict::Quarantine
    }

    /// Returns the sensitivity level, if classified.
    pub fn sensitivity_level(&self) -> Option<SensitivityLevel> {
        self.sensitivity.as_ref().map(|s| s.level)
    }

    /// Returns the fragmentation score, if computed.
    pub fn fragmentation_score(&self) -> Option<f64> {
        self.fragmentation.as_ref().map(|f| f.score)
    }
}
