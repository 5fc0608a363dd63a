//! Batch submissions.

use crate::scan::input::{ScanConfig, ScanSource};
use crate::scan::result::ScanResult;

use serde::{Deserialize, Serialize};

/// One entry of a batch scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// The text to scan.
    pub content: String,

    /// Optional title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BatchItem {
    /// Creates an item with only content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl From<&str> for BatchItem {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for BatchItem {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Settings shared by every item of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Source applied to all items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ScanSource>,

    /// Firewall settings applied to all items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ScanConfig>,
}

impl BatchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared source.
    pub fn with_source(mut self, source: ScanSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the shared firewall config.
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Wire body for `POST /v1/scan/batch`: `items` alongside the options.
#[derive(Debug, Serialize)]
pub(crate) struct BatchRequest<'a> {
    pub items: &'a [BatchItem],
    #[serde(flatten)]
    pub options: &'a BatchOptions,
}

/// Aggregated result of a batch scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Number of items scanned.
    pub total_scanned: u64,

    /// Items that produced a threat.
    pub threats: u64,

    /// Items that were clean.
    pub clean: u64,

    /// Per-item results in submission order.
    pub results: Vec<ScanResult>,
}

impl BatchResult {
    /// Returns `true` if `total_scanned == clean + threats`.
    pub fn is_consistent(&self) -> bool {
        self.clean
            .checked_add(self.threats)
            .map(|sum| sum == self.total_scanned)
            .unwrap_or(false)
    }

    /// Iterates over results whose verdict is not `ALLOW`.
    pub fn flagged(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().filter(|r| !r.verdict().is_allow())
    }
}
