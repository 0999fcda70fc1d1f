//! Blocking client.
//!
//! Same build and parse steps as the async [`Client`](crate::Client); only
//! the dispatch differs (a blocking round trip on a
//! `reqwest::blocking::Client` instead of an awaited one). Suitable for
//! strictly sequential tools; multiple threads may share one instance.

use log::debug;
use reqwest::header::CONTENT_TYPE;

use crate::api;
use crate::error::{Error, ResponseValue, UnexpectedStatusPolicy};
use crate::request::{RequestBody, RequestParts};
use crate::response::RawResponse;
use crate::types::{
    CompileProgramRequest, ConnectorDescr, ConnectorId, CreateOrReplaceConnectorRequest,
    CreateOrReplaceConnectorResponse, CreateOrReplacePipelineRequest,
    CreateOrReplacePipelineResponse, CreateOrReplaceProgramRequest,
    CreateOrReplaceProgramResponse, Pipeline, PipelineId, ProgramDescr, ProgramId, UdfResponse,
};

/// Blocking client for the pipeline manager REST API.
#[derive(Clone, Debug)]
pub struct Client {
    baseurl: String,
    client: reqwest::blocking::Client,
    policy: UnexpectedStatusPolicy,
}

impl Client {
    /// Client with default transport settings.
    pub fn new(baseurl: &str) -> Self {
        Self::new_with_client(baseurl, reqwest::blocking::Client::new())
    }

    /// Client over a caller-configured transport (timeouts, default
    /// headers, TLS settings).
    pub fn new_with_client(baseurl: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            baseurl: baseurl.trim_end_matches('/').to_string(),
            client,
            policy: UnexpectedStatusPolicy::default(),
        }
    }

    /// Select what happens on response statuses an endpoint does not
    /// document. Applies to every call made through this instance.
    pub fn with_unexpected_status_policy(mut self, policy: UnexpectedStatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn baseurl(&self) -> &str {
        &self.baseurl
    }

    fn execute(&self, parts: RequestParts) -> Result<RawResponse, reqwest::Error> {
        let url = format!("{}{}", self.baseurl, parts.path);
        let mut request = self.client.request(parts.method.clone(), &url);
        if !parts.query.is_empty() {
            request = request.query(&parts.query);
        }
        request = match parts.body {
            RequestBody::None => request,
            RequestBody::Json(body) => request.json(&body),
            RequestBody::Toml(body) => request
                .header(CONTENT_TYPE, "application/toml")
                .body(body),
        };
        let response = request.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        debug!("{} {} -> {}", parts.method, url, status);
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    // Programs

    pub fn program_status(
        &self,
        id: Option<ProgramId>,
        name: Option<&str>,
    ) -> Result<Option<ProgramDescr>, Error> {
        Ok(self.program_status_detailed(id, name)?.into_inner())
    }

    pub fn program_status_detailed(
        &self,
        id: Option<ProgramId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<ProgramDescr>>, Error> {
        let parts = api::program::status_request(id, name)?;
        let raw = self.execute(parts)?;
        api::program::parse_status(self.policy, raw)
    }

    pub fn list_programs(&self) -> Result<Option<Vec<ProgramDescr>>, Error> {
        Ok(self.list_programs_detailed()?.into_inner())
    }

    pub fn list_programs_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<ProgramDescr>>>, Error> {
        let raw = self.execute(api::program::list_request())?;
        api::program::parse_list(self.policy, raw)
    }

    pub fn create_or_replace_program(
        &self,
        program_name: &str,
        body: &CreateOrReplaceProgramRequest,
    ) -> Result<Option<CreateOrReplaceProgramResponse>, Error> {
        Ok(self
            .create_or_replace_program_detailed(program_name, body)?
            .into_inner())
    }

    pub fn create_or_replace_program_detailed(
        &self,
        program_name: &str,
        body: &CreateOrReplaceProgramRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplaceProgramResponse>>, Error> {
        let parts = api::program::create_or_replace_request(program_name, body)?;
        let raw = self.execute(parts)?;
        api::program::parse_create_or_replace(self.policy, raw)
    }

    pub fn compile_program(
        &self,
        program_name: &str,
        body: &CompileProgramRequest,
    ) -> Result<Option<()>, Error> {
        Ok(self.compile_program_detailed(program_name, body)?.into_inner())
    }

    pub fn compile_program_detailed(
        &self,
        program_name: &str,
        body: &CompileProgramRequest,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::program::compile_request(program_name, body)?;
        let raw = self.execute(parts)?;
        api::program::parse_compile(self.policy, raw)
    }

    pub fn delete_program(&self, program_name: &str) -> Result<Option<()>, Error> {
        Ok(self.delete_program_detailed(program_name)?.into_inner())
    }

    pub fn delete_program_detailed(
        &self,
        program_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::program::delete_request(program_name)?;
        let raw = self.execute(parts)?;
        api::program::parse_delete(self.policy, raw)
    }

    pub fn upload_program_udf(
        &self,
        program_name: &str,
        udf_toml: &str,
    ) -> Result<Option<UdfResponse>, Error> {
        Ok(self
            .upload_program_udf_detailed(program_name, udf_toml)?
            .into_inner())
    }

    pub fn upload_program_udf_detailed(
        &self,
        program_name: &str,
        udf_toml: &str,
    ) -> Result<ResponseValue<Option<UdfResponse>>, Error> {
        let parts = api::program::udf_request(program_name, udf_toml)?;
        let raw = self.execute(parts)?;
        api::program::parse_udf(self.policy, raw)
    }

    // Pipelines

    pub fn pipeline_status(
        &self,
        id: Option<PipelineId>,
        name: Option<&str>,
    ) -> Result<Option<Pipeline>, Error> {
        Ok(self.pipeline_status_detailed(id, name)?.into_inner())
    }

    pub fn pipeline_status_detailed(
        &self,
        id: Option<PipelineId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<Pipeline>>, Error> {
        let parts = api::pipeline::status_request(id, name)?;
        let raw = self.execute(parts)?;
        api::pipeline::parse_status(self.policy, raw)
    }

    pub fn list_pipelines(&self) -> Result<Option<Vec<Pipeline>>, Error> {
        Ok(self.list_pipelines_detailed()?.into_inner())
    }

    pub fn list_pipelines_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<Pipeline>>>, Error> {
        let raw = self.execute(api::pipeline::list_request())?;
        api::pipeline::parse_list(self.policy, raw)
    }

    pub fn create_or_replace_pipeline(
        &self,
        pipeline_name: &str,
        body: &CreateOrReplacePipelineRequest,
    ) -> Result<Option<CreateOrReplacePipelineResponse>, Error> {
        Ok(self
            .create_or_replace_pipeline_detailed(pipeline_name, body)?
            .into_inner())
    }

    pub fn create_or_replace_pipeline_detailed(
        &self,
        pipeline_name: &str,
        body: &CreateOrReplacePipelineRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplacePipelineResponse>>, Error> {
        let parts = api::pipeline::create_or_replace_request(pipeline_name, body)?;
        let raw = self.execute(parts)?;
        api::pipeline::parse_create_or_replace(self.policy, raw)
    }

    pub fn start_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self.start_pipeline_detailed(pipeline_name)?.into_inner())
    }

    pub fn start_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::start_request(pipeline_name)?;
        let raw = self.execute(parts)?;
        api::pipeline::parse_action(self.policy, raw)
    }

    pub fn shutdown_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self.shutdown_pipeline_detailed(pipeline_name)?.into_inner())
    }

    pub fn shutdown_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::shutdown_request(pipeline_name)?;
        let raw = self.execute(parts)?;
        api::pipeline::parse_action(self.policy, raw)
    }

    pub fn delete_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self.delete_pipeline_detailed(pipeline_name)?.into_inner())
    }

    pub fn delete_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::delete_request(pipeline_name)?;
        let raw = self.execute(parts)?;
        api::pipeline::parse_delete(self.policy, raw)
    }

    // Connectors

    pub fn connector_status(
        &self,
        id: Option<ConnectorId>,
        name: Option<&str>,
    ) -> Result<Option<ConnectorDescr>, Error> {
        Ok(self.connector_status_detailed(id, name)?.into_inner())
    }

    pub fn connector_status_detailed(
        &self,
        id: Option<ConnectorId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<ConnectorDescr>>, Error> {
        let parts = api::connector::status_request(id, name)?;
        let raw = self.execute(parts)?;
        api::connector::parse_status(self.policy, raw)
    }

    pub fn list_connectors(&self) -> Result<Option<Vec<ConnectorDescr>>, Error> {
        Ok(self.list_connectors_detailed()?.into_inner())
    }

    pub fn list_connectors_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<ConnectorDescr>>>, Error> {
        let raw = self.execute(api::connector::list_request())?;
        api::connector::parse_list(self.policy, raw)
    }

    pub fn create_or_replace_connector(
        &self,
        connector_name: &str,
        body: &CreateOrReplaceConnectorRequest,
    ) -> Result<Option<CreateOrReplaceConnectorResponse>, Error> {
        Ok(self
            .create_or_replace_connector_detailed(connector_name, body)?
            .into_inner())
    }

    pub fn create_or_replace_connector_detailed(
        &self,
        connector_name: &str,
        body: &CreateOrReplaceConnectorRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplaceConnectorResponse>>, Error> {
        let parts = api::connector::create_or_replace_request(connector_name, body)?;
        let raw = self.execute(parts)?;
        api::connector::parse_create_or_replace(self.policy, raw)
    }

    pub fn delete_connector(&self, connector_name: &str) -> Result<Option<()>, Error> {
        Ok(self.delete_connector_detailed(connector_name)?.into_inner())
    }

    pub fn delete_connector_detailed(
        &self,
        connector_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::connector::delete_request(connector_name)?;
        let raw = self.execute(parts)?;
        api::connector::parse_delete(self.policy, raw)
    }
}
