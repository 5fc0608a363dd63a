//! Shared enumerations used across scan, audit and quarantine payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The firewall's decision on submitted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FirewallVerdict {
    /// Content passed.
    Allow,
    /// Content was rejected outright.
    Block,
    /// Content is held for human review.
    Quarantine,
}

impl FirewallVerdict {
    /// Returns the wire name of the verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Block => "BLOCK",
            Self::Quarantine => "QUARANTINE",
        }
    }

    /// Returns `true` for [`FirewallVerdict::Allow`].
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for FirewallVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data-classification tier assigned to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SensitivityLevel {
    /// Safe to share publicly.
    Public,
    /// Internal use only.
    Internal,
    /// Confidential.
    Confidential,
    /// Most restricted tier.
    Restricted,
}

impl SensitivityLevel {
    /// Returns the wire name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Internal => "INTERNAL",
            Self::Confidential => "CONFIDENTIAL",
            Self::Restricted => "RESTRICTED",
        }
    }
}

impl fmt::Display for SensitivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where submitted content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Typed by a user.
    User,
    /// Command line tooling.
    Cli,
    /// A hook in another system.
    Hook,
    /// Email content.
    Email,
    /// Web content.
    Web,
    /// Produced by an agent.
    Agent,
    /// File contents.
    File,
    /// Another API.
    Api,
}

/// How aggressively the firewall should classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Lowest tolerance.
    Strict,
    /// Default tolerance.
    Balanced,
    /// Highest tolerance.
    Permissive,
}

/// Window for aggregated audit statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 24 hours.
    #[serde(rename = "24h")]
    Last24Hours,
    /// Last 7 days.
    #[serde(rename = "7d")]
    Last7Days,
    /// Last 30 days.
    #[serde(rename = "30d")]
    Last30Days,
}

impl TimeRange {
    /// Returns the query value for this range.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
