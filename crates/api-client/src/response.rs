//! Pure response interpretation.
//!
//! The dispatch step reduces a response to a [`RawResponse`]; everything
//! after that is a pure function of status, headers and body bytes, shared
//! verbatim between the async and the blocking client. Per-endpoint parsers
//! match on the documented status set and delegate to the helpers here.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{Error, ResponseValue, UnexpectedStatusPolicy};

/// Status, headers and body of a completed round trip, before parsing.
#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Decode the body as the endpoint's success model.
pub(crate) fn success<T, E>(raw: RawResponse) -> Result<ResponseValue<Option<T>>, Error<E>>
where
    T: DeserializeOwned,
    E: Debug,
{
    let parsed: T = serde_json::from_slice(&raw.body)
        .map_err(|e| Error::InvalidResponsePayload(raw.body.clone(), e))?;
    Ok(ResponseValue::new(
        raw.status,
        raw.headers,
        raw.body,
        Some(parsed),
    ))
}

/// Success without a body to decode (`200 OK` / `202 Accepted` with empty
/// payload).
pub(crate) fn success_empty<E>(raw: RawResponse) -> Result<ResponseValue<Option<()>>, Error<E>>
where
    E: Debug,
{
    Ok(ResponseValue::new(
        raw.status,
        raw.headers,
        raw.body,
        Some(()),
    ))
}

/// Decode the body as the endpoint's documented error model.
pub(crate) fn error_response<T, E>(raw: RawResponse) -> Result<ResponseValue<Option<T>>, Error<E>>
where
    E: DeserializeOwned + Debug,
{
    let parsed: E = serde_json::from_slice(&raw.body)
        .map_err(|e| Error::InvalidResponsePayload(raw.body.clone(), e))?;
    Err(Error::ErrorResponse(ResponseValue::new(
        raw.status,
        raw.headers,
        raw.body,
        parsed,
    )))
}

/// Apply the client's policy to a status the endpoint does not document.
pub(crate) fn undeclared<T, E>(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<T>>, Error<E>>
where
    E: Debug,
{
    match policy {
        UnexpectedStatusPolicy::Raise => Err(Error::UnexpectedResponse {
            status: raw.status,
            body: raw.body,
        }),
        UnexpectedStatusPolicy::ReturnNone => {
            Ok(ResponseValue::new(raw.status, raw.headers, raw.body, None))
        }
    }
}
