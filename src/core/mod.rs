//! Core building blocks for the shieldcortex client.
//!
//! - [`config`] - `ClientConfig` and base URL normalization
//! - [`error`] - The `ClientError` taxonomy
//! - [`classify`] - Mapping of failed responses onto `ClientError`
//! - [`query`] - Query-string serialization for list endpoints
//! - [`traits`] - The `Transport` trait and raw HTTP shapes
//! - [`types`] - Shared enums (verdicts, sensitivity levels, ...)

pub mod classify;
pub mod config;
pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use classify::{classify, classify_response, parse_retry_after};
pub use config::{normalize_base_url, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiErrorKind, ClientError, Result};
pub use query::{serialize_query, QueryFilters, QueryParams};
pub use traits::{ArcTransport, HttpMethod, HttpRequest, HttpResponse, ResponseHeaders, Transport};
pub use types::{FirewallVerdict, ScanMode, SensitivityLevel, SourceType, TimeRange};
