//! API client errors.

use thiserror::Error;

/// Errors raised by the backend API client.
///
/// Reasons are kept as text so that test doubles can construct every variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response (connection refused, DNS, timeout).
    #[error("cannot reach the server at {url}: {reason}")]
    Unreachable {
        /// Endpoint that was called.
        url: String,
        /// Transport error text.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error(
        "the server rejected the request ({status}){}",
        detail.as_ref().map(|detail| format!(": {detail}")).unwrap_or_default()
    )]
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason from the error body, when it carried one.
        detail: Option<String>,
    },

    /// A success response could not be decoded.
    #[error("the server sent an unreadable response: {reason}")]
    Decode {
        /// Decoder error text.
        reason: String,
    },

    /// A pre-order was accepted but the response carried no order id.
    #[error("the server did not return an order id")]
    MissingOrderId,
}

impl ApiError {
    pub(crate) fn unreachable(url: &str, error: &reqwest::Error) -> Self {
        Self::Unreachable {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }

    pub(crate) fn decode(error: impl ToString) -> Self {
        Self::Decode {
            reason: error.to_string(),
        }
    }
}
