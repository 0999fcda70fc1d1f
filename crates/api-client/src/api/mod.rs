//! Per-endpoint request builders and response parsers.
//!
//! Each operation contributes a pure `*_request` builder and a pure
//! `parse_*` function; [`Client`](crate::Client) and
//! [`blocking::Client`](crate::blocking::Client) wrap the same pair around
//! their respective dispatch step, so the two calling conventions cannot
//! drift apart.

pub(crate) mod connector;
pub(crate) mod pipeline;
pub(crate) mod program;

use crate::error::InvalidRequest;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Encode a request body model. Failure here is a programmer-level error
/// (a model that cannot be represented as JSON), not a network condition.
pub(crate) fn json_body<T: Serialize>(body: &T) -> Result<JsonValue, InvalidRequest> {
    serde_json::to_value(body)
        .map_err(|e| InvalidRequest(format!("request body cannot be encoded as JSON: {e}")))
}
