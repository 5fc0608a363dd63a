//! Audit log queries and statistics.
//!
//! The service keeps an immutable log of every scan decision. This module
//! holds the filter used to page through it and the shapes it returns.

mod entry;
mod query;

pub(crate) use entry::parse_server_timestamp;
pub use entry::{AuditEntry, AuditResponse, AuditStats, Pagination, SourceCount};
pub use query::AuditQuery;
