//! The transport seam between the client and the network.
//!
//! The dispatcher never talks to an HTTP library directly. It hands a fully
//! built [`HttpRequest`] to a [`Transport`] and gets back status, headers
//! and body. The default implementation is backed by reqwest; tests use
//! [`MockTransport`](crate::backends::MockTransport).

use crate::core::error::ClientError;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// HTTP verbs used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    /// Header name/value pairs, in the order they were applied.
    pub headers: Vec<(String, String)>,
    /// Encoded JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any existing value with the same name.
    ///
    /// Header names are compared case-insensitively.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the path and query portion of the URL.
    pub fn path_and_query(&self) -> &str {
        let after_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        after_scheme
            .find('/')
            .map(|idx| &after_scheme[idx..])
            .unwrap_or("/")
    }
}

/// Response headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: BTreeMap<String, String>,
}

impl ResponseHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header. Later values for the same name win.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Adds a header, builder style.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns a header value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A raw response as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: ResponseHeaders,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: ResponseHeaders::new(),
            body: body.into(),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform one HTTP round trip.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` so one client can serve
///   concurrent callers.
/// - Exactly one network round trip per call; no retries.
/// - Any non-2xx status is a successful `send`. Only failures to obtain a
///   response at all are returned as errors, as
///   [`ClientError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Returns a short name for this transport, used in logs.
    fn name(&self) -> &str;

    /// Sends the request and returns the raw response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// An arc-wrapped transport for shared ownership.
pub type ArcTransport = Arc<dyn Transport>;
