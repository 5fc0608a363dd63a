//! Audit log filters.

use crate::audit::entry::AuditResponse;
use crate::core::query::{QueryFilters, QueryParams};
use crate::core::types::FirewallVerdict;

use chrono::{DateTime, SecondsFormat, Utc};

/// Filter for listing audit log entries.
///
/// Every field is optional; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditQuery {
    /// Earliest entry to include.
    pub from: Option<String>,

    /// Latest entry to include.
    pub to: Option<String>,

    /// Only entries with this verdict.
    pub level: Option<FirewallVerdict>,

    /// Page size.
    pub limit: Option<u32>,

    /// Page offset.
    pub offset: Option<u32>,
}

impl AuditQuery {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound, in the server's date format.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the upper bound, in the server's date format.
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets both bounds from timestamps, as RFC 3339.
    pub fn with_date_range(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from.to_rfc3339_opts(SecondsFormat::Secs, true));
        self.to = Some(to.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    /// Filters by verdict.
    pub fn with_level(mut self, level: FirewallVerdict) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets pagination.
    pub fn with_pagination(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Returns the query for the page after `response`, if the server
    /// reports one.
    pub fn next_page(&self, response: &AuditResponse) -> Option<Self> {
        let offset = response.pagination.next_offset()?;
        Some(Self {
            limit: Some(response.pagination.limit),
            offset: Some(offset),
            ..self.clone()
        })
    }
}

impl QueryFilters for AuditQuery {
    fn query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("from", self.from.as_deref())
            .with("to", self.to.as_deref())
            .with("level", self.level)
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}
