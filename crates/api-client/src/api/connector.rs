//! Connector endpoints.

use reqwest::Method;

use crate::error::{Error, InvalidRequest, ResponseValue, UnexpectedStatusPolicy};
use crate::request::{encode_path, validate_name, RequestParts};
use crate::response::{self, RawResponse};
use crate::types::{
    ConnectorDescr, ConnectorId, CreateOrReplaceConnectorRequest,
    CreateOrReplaceConnectorResponse,
};

/// GET `/v0/connector?id&name`
pub(crate) fn status_request(
    id: Option<ConnectorId>,
    name: Option<&str>,
) -> Result<RequestParts, InvalidRequest> {
    if id.is_none() && name.is_none() {
        return Err(InvalidRequest(
            "connector lookup requires `id` or `name`".to_string(),
        ));
    }
    Ok(RequestParts::new(Method::GET, "/v0/connector".to_string())
        .query_opt("id", id.map(|id| id.to_string()))
        .query_opt("name", name.map(str::to_string)))
}

pub(crate) fn parse_status(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<ConnectorDescr>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// GET `/v0/connectors`
pub(crate) fn list_request() -> RequestParts {
    RequestParts::new(Method::GET, "/v0/connectors".to_string())
}

pub(crate) fn parse_list(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<Vec<ConnectorDescr>>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// PUT `/v0/connectors/{connector_name}`
pub(crate) fn create_or_replace_request(
    connector_name: &str,
    body: &CreateOrReplaceConnectorRequest,
) -> Result<RequestParts, InvalidRequest> {
    validate_name("connector", connector_name)?;
    Ok(RequestParts::new(
        Method::PUT,
        format!("/v0/connectors/{}", encode_path(connector_name)),
    )
    .json(super::json_body(body)?))
}

pub(crate) fn parse_create_or_replace(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<CreateOrReplaceConnectorResponse>>, Error> {
    match raw.status.as_u16() {
        200 | 201 => response::success(raw),
        400 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// DELETE `/v0/connectors/{connector_name}`
pub(crate) fn delete_request(connector_name: &str) -> Result<RequestParts, InvalidRequest> {
    validate_name("connector", connector_name)?;
    Ok(RequestParts::new(
        Method::DELETE,
        format!("/v0/connectors/{}", encode_path(connector_name)),
    ))
}

pub(crate) fn parse_delete(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<()>>, Error> {
    match raw.status.as_u16() {
        200 => response::success_empty(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}
