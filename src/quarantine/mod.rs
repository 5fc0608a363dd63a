//! The quarantine review queue.
//!
//! Content the firewall neither allows nor blocks outright is held on the
//! server for human review. This module holds the queue filter, the item
//! shape and the review decision.

mod query;
mod record;

pub use query::QuarantineQuery;
pub(crate) use record::ReviewRequest;
pub use record::{QuarantineItem, QuarantineResponse, QuarantineStatus, ReviewAction};
