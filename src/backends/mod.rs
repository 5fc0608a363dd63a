//! Transport implementations.
//!
//! This module contains implementations of the `Transport` trait.
//!
//! ## Available Backends
//!
//! - [`mock`] - An in-memory transport for tests
//! - [`http`] - reqwest over HTTPS (requires `reqwest-transport` feature)
//!
//! ## Implementing a Custom Transport
//!
//! Any HTTP stack can be plugged in by implementing `Transport`:
//!
//! ```rust,ignore
//! use shieldcortex::{ClientError, HttpRequest, HttpResponse, Transport};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyTransport;
//!
//! #[async_trait]
//! impl Transport for MyTransport {
//!     fn name(&self) -> &str {
//!         "my-transport"
//!     }
//!
//!     async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
//!         // Perform exactly one round trip
//!         todo!()
//!     }
//! }
//! ```

pub mod mock;

#[cfg(feature = "reqwest-transport")]
pub mod http;

// Re-exports
pub use mock::MockTransport;

#[cfg(feature = "reqwest-transport")]
pub use http::ReqwestTransport;
