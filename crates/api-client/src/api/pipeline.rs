//! Pipeline endpoints.

use reqwest::Method;

use crate::error::{Error, InvalidRequest, ResponseValue, UnexpectedStatusPolicy};
use crate::request::{encode_path, validate_name, RequestParts};
use crate::response::{self, RawResponse};
use crate::types::{
    CreateOrReplacePipelineRequest, CreateOrReplacePipelineResponse, Pipeline, PipelineId,
};

/// GET `/v0/pipeline?id&name`
pub(crate) fn status_request(
    id: Option<PipelineId>,
    name: Option<&str>,
) -> Result<RequestParts, InvalidRequest> {
    if id.is_none() && name.is_none() {
        return Err(InvalidRequest(
            "pipeline lookup requires `id` or `name`".to_string(),
        ));
    }
    Ok(RequestParts::new(Method::GET, "/v0/pipeline".to_string())
        .query_opt("id", id.map(|id| id.to_string()))
        .query_opt("name", name.map(str::to_string)))
}

pub(crate) fn parse_status(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<Pipeline>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// GET `/v0/pipelines`
pub(crate) fn list_request() -> RequestParts {
    RequestParts::new(Method::GET, "/v0/pipelines".to_string())
}

pub(crate) fn parse_list(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<Vec<Pipeline>>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// PUT `/v0/pipelines/{pipeline_name}`
pub(crate) fn create_or_replace_request(
    pipeline_name: &str,
    body: &CreateOrReplacePipelineRequest,
) -> Result<RequestParts, InvalidRequest> {
    validate_name("pipeline", pipeline_name)?;
    Ok(RequestParts::new(
        Method::PUT,
        format!("/v0/pipelines/{}", encode_path(pipeline_name)),
    )
    .json(super::json_body(body)?))
}

pub(crate) fn parse_create_or_replace(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<CreateOrReplacePipelineResponse>>, Error> {
    match raw.status.as_u16() {
        200 | 201 => response::success(raw),
        // 404: the referenced program or connector name does not exist.
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// POST `/v0/pipelines/{pipeline_name}/start`
pub(crate) fn start_request(pipeline_name: &str) -> Result<RequestParts, InvalidRequest> {
    validate_name("pipeline", pipeline_name)?;
    Ok(RequestParts::new(
        Method::POST,
        format!("/v0/pipelines/{}/start", encode_path(pipeline_name)),
    ))
}

/// POST `/v0/pipelines/{pipeline_name}/shutdown`
pub(crate) fn shutdown_request(pipeline_name: &str) -> Result<RequestParts, InvalidRequest> {
    validate_name("pipeline", pipeline_name)?;
    Ok(RequestParts::new(
        Method::POST,
        format!("/v0/pipelines/{}/shutdown", encode_path(pipeline_name)),
    ))
}

/// Shared by `start` and `shutdown`: the action is accepted asynchronously,
/// progress is observed via `pipeline_status`.
pub(crate) fn parse_action(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<()>>, Error> {
    match raw.status.as_u16() {
        202 => response::success_empty(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// DELETE `/v0/pipelines/{pipeline_name}`
pub(crate) fn delete_request(pipeline_name: &str) -> Result<RequestParts, InvalidRequest> {
    validate_name("pipeline", pipeline_name)?;
    Ok(RequestParts::new(
        Method::DELETE,
        format!("/v0/pipelines/{}", encode_path(pipeline_name)),
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
