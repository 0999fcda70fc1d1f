//! Client error surface.
//!
//! Three failure categories are kept strictly apart and are never merged:
//!
//! 1. transport failures (connection refused, timeout) surface as
//!    [`Error::CommunicationError`] with the underlying `reqwest` error
//!    untouched;
//! 2. error responses documented for the endpoint (specific 4xx statuses)
//!    decode into the endpoint's error model and surface as
//!    [`Error::ErrorResponse`];
//! 3. statuses the endpoint does not document are handled according to the
//!    per-client [`UnexpectedStatusPolicy`]: either
//!    [`Error::UnexpectedResponse`] or a parsed value of `None`.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::types::ErrorResponse;

/// What to do with a response status the endpoint does not document.
///
/// Selected once per client instance, not per call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnexpectedStatusPolicy {
    /// Fail the call with [`Error::UnexpectedResponse`].
    #[default]
    Raise,
    /// Swallow the response and yield a parsed value of `None`.
    ReturnNone,
}

/// Full response envelope: status, headers and raw body are retained
/// alongside the parsed payload.
#[derive(Clone, Debug)]
pub struct ResponseValue<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    parsed: T,
}

impl<T> ResponseValue<T> {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes, parsed: T) -> Self {
        Self {
            status,
            headers,
            body,
            parsed,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw response body, exactly as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn parsed(&self) -> &T {
        &self.parsed
    }

    /// Discard the envelope metadata and keep only the parsed payload.
    pub fn into_inner(self) -> T {
        self.parsed
    }
}

/// Error returned by every endpoint operation.
///
/// `E` is the endpoint's documented error model, [`ErrorResponse`] for all
/// current endpoints.
#[derive(Debug, Error)]
pub enum Error<E: Debug = ErrorResponse> {
    /// The request could not be constructed from the supplied arguments.
    /// Signals a programmer-level contract violation, never a network
    /// condition.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The network round trip itself failed. The underlying error is
    /// propagated unmodified.
    #[error("communication error: {0}")]
    CommunicationError(#[from] reqwest::Error),

    /// The server answered with a status documented for this endpoint and a
    /// body that decoded into the endpoint's error model.
    #[error("error response from server (status {})", .0.status())]
    ErrorResponse(ResponseValue<E>),

    /// The server answered with a documented status but the body did not
    /// decode into the documented model.
    #[error("invalid response payload: {1}")]
    InvalidResponsePayload(Bytes, #[source] serde_json::Error),

    /// The server answered with a status not documented for this endpoint
    /// and the client is configured with [`UnexpectedStatusPolicy::Raise`].
    #[error("unexpected response status {status}")]
    UnexpectedResponse { status: StatusCode, body: Bytes },
}

impl<E: Debug> Error<E> {
    /// HTTP status carried by the error, if it got as far as a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::InvalidRequest(_) => None,
            Error::CommunicationError(e) => e.status(),
            Error::ErrorResponse(r) => Some(r.status()),
            Error::InvalidResponsePayload(_, _) => None,
            Error::UnexpectedResponse { status, .. } => Some(*status),
        }
    }
}

/// Build-step failure. Converted into [`Error::InvalidRequest`] at the call
/// site so build helpers stay independent of the endpoint's error model.
#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct InvalidRequest(pub String);

impl<E: Debug> From<InvalidRequest> for Error<E> {
    fn from(err: InvalidRequest) -> Self {
        Error::InvalidRequest(err.0)
    }
}
