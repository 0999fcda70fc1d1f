//! Pure request construction.
//!
//! A [`RequestParts`] is built from typed arguments with no side effects and
//! no network access; the async and the blocking client both turn the same
//! parts into an actual request. Optional query parameters that were left
//! unset are dropped entirely rather than serialized as null or empty.

use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::error::InvalidRequest;

/// Request body, if any. All endpoints speak JSON except the UDF upload,
/// which submits a raw TOML document.
#[derive(Clone, Debug)]
pub(crate) enum RequestBody {
    None,
    Json(JsonValue),
    Toml(String),
}

/// Method, path, query and body of a not-yet-dispatched request.
#[derive(Clone, Debug)]
pub(crate) struct RequestParts {
    pub method: Method,
    /// Path relative to the base URL, starting with `/v0`.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl RequestParts {
    pub(crate) fn new(method: Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Append a query parameter unless its argument was left unset.
    pub(crate) fn query_opt(mut self, key: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value));
        }
        self
    }

    pub(crate) fn json(mut self, body: JsonValue) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub(crate) fn toml(mut self, body: String) -> Self {
        self.body = RequestBody::Toml(body);
        self
    }
}

/// Percent-encode a resource name used as a path segment.
pub(crate) fn encode_path(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Resource names interpolated into a path must be non-empty; an empty name
/// would silently address a different route.
pub(crate) fn validate_name(what: &str, name: &str) -> Result<(), InvalidRequest> {
    if name.is_empty() {
        Err(InvalidRequest(format!("{what} name must not be empty")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unset_query_parameters_are_dropped() {
        let parts = RequestParts::new(Method::GET, "/v0/program".to_string())
            .query_opt("id", None)
            .query_opt("name", Some("demo".to_string()));
        assert_eq!(parts.query, vec![("name", "demo".to_string())]);
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_path("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(validate_name("program", "").is_err());
        assert!(validate_name("program", "p").is_ok());
    }
}
