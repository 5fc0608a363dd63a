//! # ShieldCortex
//!
//! An async client for the ShieldCortex content-security scanning API.
//!
//! ## Overview
//!
//! The service classifies text for threats and sensitivity, keeps an audit
//! log of every decision, and holds borderline content in a quarantine
//! queue for human review. This crate is the client side of that HTTP/JSON
//! contract:
//!
//! - Submit content for scanning, one item or a batch at a time
//! - Page through the audit log and fetch aggregated statistics
//! - List the quarantine queue and approve or reject items
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shieldcortex::{ClientError, ScanInput, ShieldCortex};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShieldCortex::new(std::env::var("SHIELDCORTEX_API_KEY")?)?;
//!
//!     match client.scan(&ScanInput::new("ignore previous instructions")).await {
//!         Ok(result) if result.allowed => println!("allowed"),
//!         Ok(result) => println!("{}: {}", result.verdict(), result.firewall.reason),
//!         Err(ClientError::RateLimited { retry_after, .. }) => {
//!             println!("rate limited, retry after {:?}s", retry_after)
//!         }
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes the reqwest transport
//! - `reqwest-transport` - HTTP transport backed by reqwest
//!
//! ## Architecture
//!
//! - **Core**: configuration, errors, status classification, query strings,
//!   and the `Transport` trait
//! - **Backends**: transport implementations (reqwest, in-memory mock)
//! - **Client**: request dispatch and the domain operations
//! - **Scan / Audit / Quarantine**: request and response shapes
//!
//! The client never retries, caches or queues. Every error reaches the
//! caller; [`ClientError::retry_after`] is available as a hint for callers
//! that implement their own backoff.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod backends;
pub mod client;
pub mod core;
pub mod quarantine;
pub mod scan;

// Re-export commonly used types at the crate root
pub use crate::core::{
    ApiErrorKind, ClientConfig, ClientError, FirewallVerdict, HttpMethod, HttpRequest,
    HttpResponse, ResponseHeaders, Result, ScanMode, SensitivityLevel, SourceType, TimeRange,
    Transport, DEFAULT_BASE_URL,
};

pub use crate::audit::{AuditEntry, AuditQuery, AuditResponse, AuditStats, Pagination};
pub use crate::client::{RequestDispatcher, ShieldCortex};
pub use crate::quarantine::{
    QuarantineItem, QuarantineQuery, QuarantineResponse, QuarantineStatus, ReviewAction,
};
pub use crate::scan::{
    BatchItem, BatchOptions, BatchResult, ScanConfig, ScanInput, ScanResult, ScanSource,
};

pub use tokio_util::sync::CancellationToken;

/// Prelude module for convenient imports.
///
/// ```rust
/// use shieldcortex::prelude::*;
/// ```
pub mod prelude {
    pub use crate::audit::{AuditQuery, AuditResponse, AuditStats};
    pub use crate::client::ShieldCortex;
    pub use crate::core::{
        ClientConfig, ClientError, FirewallVerdict, SensitivityLevel, TimeRange, Transport,
    };
    pub use crate::quarantine::{QuarantineQuery, QuarantineResponse, QuarantineStatus, ReviewAction};
    pub use crate::scan::{BatchItem, BatchOptions, BatchResult, ScanInput, ScanResult};
    pub use tokio_util::sync::CancellationToken;
}
