//! Mapping of failed HTTP responses onto [`ClientError`].

use crate::core::error::ClientError;
use crate::core::traits::{HttpResponse, ResponseHeaders};

/// Classifies a response by status.
///
/// Returns `None` for 2xx statuses. Every other status maps to exactly one
/// API error variant, and the body is carried through verbatim.
pub fn classify_response(
    status: u16,
    body: impl Into<String>,
    headers: &ResponseHeaders,
) -> Option<ClientError> {
    if (200..300).contains(&status) {
        return None;
    }

    let body = body.into();
    let error = match status {
        401 => ClientError::Auth { body },
        429 => ClientError::RateLimited {
            body,
            retry_after: parse_retry_after(headers.get("retry-after")),
        },
        400 => ClientError::Validation { body },
        status => ClientError::Api { status, body },
    };
    Some(error)
}

/// Classifies a full transport response. See [`classify_response`].
pub fn classify(response: HttpResponse) -> Option<ClientError> {
    classify_response(response.status, response.body, &response.headers)
}

/// Parses a `retry-after` header holding delay seconds.
///
/// HTTP-date values and anything else non-numeric yield `None`.
pub fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    value.and_then(|raw| raw.trim().parse::<u64>().ok())
}
