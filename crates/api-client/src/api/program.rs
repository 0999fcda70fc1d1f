//! Program endpoints.

use reqwest::Method;

use crate::error::{Error, InvalidRequest, ResponseValue, UnexpectedStatusPolicy};
use crate::request::{encode_path, validate_name, RequestParts};
use crate::response::{self, RawResponse};
use crate::types::{
    CompileProgramRequest, CreateOrReplaceProgramRequest, CreateOrReplaceProgramResponse,
    ProgramDescr, ProgramId, UdfResponse,
};

/// GET `/v0/program?id&name`
pub(crate) fn status_request(
    id: Option<ProgramId>,
    name: Option<&str>,
) -> Result<RequestParts, InvalidRequest> {
    if id.is_none() && name.is_none() {
        return Err(InvalidRequest(
            "program lookup requires `id` or `name`".to_string(),
        ));
    }
    Ok(RequestParts::new(Method::GET, "/v0/program".to_string())
        .query_opt("id", id.map(|id| id.to_string()))
        .query_opt("name", name.map(str::to_string)))
}

pub(crate) fn parse_status(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<ProgramDescr>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// GET `/v0/programs`
pub(crate) fn list_request() -> RequestParts {
    RequestParts::new(Method::GET, "/v0/programs".to_string())
}

pub(crate) fn parse_list(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<Vec<ProgramDescr>>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// PUT `/v0/programs/{program_name}`
pub(crate) fn create_or_replace_request(
    program_name: &str,
    body: &CreateOrReplaceProgramRequest,
) -> Result<RequestParts, InvalidRequest> {
    validate_name("program", program_name)?;
    Ok(RequestParts::new(
        Method::PUT,
        format!("/v0/programs/{}", encode_path(program_name)),
    )
    .json(super::json_body(body)?))
}

pub(crate) fn parse_create_or_replace(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<CreateOrReplaceProgramResponse>>, Error> {
    match raw.status.as_u16() {
        // 201 on creation, 200 on replacement; same body either way.
        200 | 201 => response::success(raw),
        409 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// POST `/v0/programs/{program_name}/compile`
pub(crate) fn compile_request(
    program_name: &str,
    body: &CompileProgramRequest,
) -> Result<RequestParts, InvalidRequest> {
    validate_name("program", program_name)?;
    Ok(RequestParts::new(
        Method::POST,
        format!("/v0/programs/{}/compile", encode_path(program_name)),
    )
    .json(super::json_body(body)?))
}

pub(crate) fn parse_compile(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<()>>, Error> {
    match raw.status.as_u16() {
        202 => response::success_empty(raw),
        404 | 409 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}

/// DELETE `/v0/programs/{program_name}`
pub(crate) fn delete_request(program_name: &str) -> Result<RequestParts, InvalidRequest> {
    validate_name("program", program_name)?;
    Ok(RequestParts::new(
        Method::DELETE,
        format!("/v0/programs/{}", encode_path(program_name)),
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

/// PUT `/v0/programs/{program_name}/udf`
///
/// The one non-JSON endpoint: the body is the TOML dependency table used
/// when compiling the program's user-defined functions.
pub(crate) fn udf_request(
    program_name: &str,
    udf_toml: &str,
) -> Result<RequestParts, InvalidRequest> {
    validate_name("program", program_name)?;
    Ok(RequestParts::new(
        Method::PUT,
        format!("/v0/programs/{}/udf", encode_path(program_name)),
    )
    .toml(udf_toml.to_string()))
}

pub(crate) fn parse_udf(
    policy: UnexpectedStatusPolicy,
    raw: RawResponse,
) -> Result<ResponseValue<Option<UdfResponse>>, Error> {
    match raw.status.as_u16() {
        200 => response::success(raw),
        400 | 404 => response::error_response(raw),
        _ => response::undeclared(policy, raw),
    }
}
