//! Error types for the API client.

use crate::fetch::ResponseOutcome;
use crate::types::Collection;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client or request was misconfigured. No network call was made.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The request never produced an HTTP response (connection refused,
    /// timeout, DNS failure) or a successful body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status after the retry budget ran out.
    ///
    /// `body` is `None` when the response text could not be read. The full
    /// response is kept for diagnostics.
    #[error("{}", status_message(*status, body.as_deref()))]
    HttpStatus {
        status: u16,
        body: Option<String>,
        response: Box<ResponseOutcome>,
    },
    /// A successful response did not contain the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// HTTP status code, if the error came from a received response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_message(status: u16, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("non-OK status code {}, body: {}", status, body),
        None => format!(
            "non-OK status code {} and could not parse response text",
            status
        ),
    }
}

/// A paginated fetch stopped on a failing page.
///
/// Items from every page fetched before the failure are kept in `partial`.
#[derive(thiserror::Error, Debug)]
#[error("failed to fetch page {page}")]
pub struct PaginationError<T> {
    /// Page number whose fetch failed.
    pub page: i64,
    /// Everything accumulated before the failing page.
    pub partial: Collection<T>,
    #[source]
    pub source: Error,
}

impl<T> PaginationError<T> {
    /// Splits into the accumulated items and the underlying error.
    pub fn into_parts(self) -> (Collection<T>, Error) {
        (self.partial, self.source)
    }
}

impl<T> From<PaginationError<T>> for Error {
    fn from(err: PaginationError<T>) -> Self {
        err.source
    }
}
