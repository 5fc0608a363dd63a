//! Quarantine queue filters.

use crate::core::query::{QueryFilters, QueryParams};
use crate::quarantine::record::QuarantineStatus;

/// Filter for listing the quarantine queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuarantineQuery {
    /// Only items in this state.
    pub status: Option<QuarantineStatus>,

    /// Page size.
    pub limit: Option<u32>,

    /// Page offset.
    pub offset: Option<u32>,
}

impl QuarantineQuery {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status.
    pub fn with_status(mut self, status: QuarantineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets pagination.
    pub fn with_pagination(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

impl QueryFilters for QuarantineQuery {
    fn query_params(&self) -> QueryParams {
        QueryParams::new()
            .with("status", self.status)
            .with("limit", self.limit)
            .with("offset", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::serialize_query;

    #[test]
    fn test_quarantine_query() {
        let query = QuarantineQuery::new().with_status(QuarantineStatus::Pending);
        assert_eq!(serialize_query(Some(&query)), "?status=pending");

        let query = QuarantineQuery::new().with_pagination(10, 0);
        assert_eq!(serialize_query(Some(&query)), "?limit=10&offset=0");

        assert_eq!(serialize_query::<QuarantineQuery>(None), "");
    }
}
