//! Asynchronous client.
//!
//! Thin dispatch wrapper around the pure builders and parsers in
//! [`crate::api`]: every operation builds a request, performs exactly one
//! network round trip (the only suspension point), and interprets the
//! response. The client holds no mutable state and can be shared freely
//! across tasks.

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

/// Client for the pipeline manager REST API.
///
/// The base URL and any authentication (configured on the injected
/// `reqwest::Client`, e.g. a default `Authorization` header) are
/// per-instance; request builders never embed either.
#[derive(Clone, Debug)]
pub struct Client {
    baseurl: String,
    client: reqwest::Client,
    policy: UnexpectedStatusPolicy,
}

impl Client {
    /// Client with default transport settings.
    pub fn new(baseurl: &str) -> Self {
        Self::new_with_client(baseurl, reqwest::Client::new())
    }

    /// Client over a caller-configured transport (timeouts, default
    /// headers, TLS settings).
    pub fn new_with_client(baseurl: &str, client: reqwest::Client) -> Self {
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

    /// Dispatch step: the sole point where the network is touched.
    async fn execute(&self, parts: RequestParts) -> Result<RawResponse, reqwest::Error> {
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
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!("{} {} -> {}", parts.method, url, status);
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    // Programs

    /// Program descriptor, including current version and compilation
    /// status. At least one of `id` and `name` must be provided.
    pub async fn program_status(
        &self,
        id: Option<ProgramId>,
        name: Option<&str>,
    ) -> Result<Option<ProgramDescr>, Error> {
        Ok(self.program_status_detailed(id, name).await?.into_inner())
    }

    pub async fn program_status_detailed(
        &self,
        id: Option<ProgramId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<ProgramDescr>>, Error> {
        let parts = api::program::status_request(id, name)?;
        let raw = self.execute(parts).await?;
        api::program::parse_status(self.policy, raw)
    }

    pub async fn list_programs(&self) -> Result<Option<Vec<ProgramDescr>>, Error> {
        Ok(self.list_programs_detailed().await?.into_inner())
    }

    pub async fn list_programs_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<ProgramDescr>>>, Error> {
        let raw = self.execute(api::program::list_request()).await?;
        api::program::parse_list(self.policy, raw)
    }

    /// Create a program, or replace an existing one by name.
    pub async fn create_or_replace_program(
        &self,
        program_name: &str,
        body: &CreateOrReplaceProgramRequest,
    ) -> Result<Option<CreateOrReplaceProgramResponse>, Error> {
        Ok(self
            .create_or_replace_program_detailed(program_name, body)
            .await?
            .into_inner())
    }

    pub async fn create_or_replace_program_detailed(
        &self,
        program_name: &str,
        body: &CreateOrReplaceProgramRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplaceProgramResponse>>, Error> {
        let parts = api::program::create_or_replace_request(program_name, body)?;
        let raw = self.execute(parts).await?;
        api::program::parse_create_or_replace(self.policy, raw)
    }

    /// Queue a program for compilation. Progress is observed by polling
    /// [`program_status`](Self::program_status).
    pub async fn compile_program(
        &self,
        program_name: &str,
        body: &CompileProgramRequest,
    ) -> Result<Option<()>, Error> {
        Ok(self
            .compile_program_detailed(program_name, body)
            .await?
            .into_inner())
    }

    pub async fn compile_program_detailed(
        &self,
        program_name: &str,
        body: &CompileProgramRequest,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::program::compile_request(program_name, body)?;
        let raw = self.execute(parts).await?;
        api::program::parse_compile(self.policy, raw)
    }

    pub async fn delete_program(&self, program_name: &str) -> Result<Option<()>, Error> {
        Ok(self
            .delete_program_detailed(program_name)
            .await?
            .into_inner())
    }

    pub async fn delete_program_detailed(
        &self,
        program_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::program::delete_request(program_name)?;
        let raw = self.execute(parts).await?;
        api::program::parse_delete(self.policy, raw)
    }

    /// Upload the TOML dependency table used when compiling the program's
    /// user-defined functions.
    pub async fn upload_program_udf(
        &self,
        program_name: &str,
        udf_toml: &str,
    ) -> Result<Option<UdfResponse>, Error> {
        Ok(self
            .upload_program_udf_detailed(program_name, udf_toml)
            .await?
            .into_inner())
    }

    pub async fn upload_program_udf_detailed(
        &self,
        program_name: &str,
        udf_toml: &str,
    ) -> Result<ResponseValue<Option<UdfResponse>>, Error> {
        let parts = api::program::udf_request(program_name, udf_toml)?;
        let raw = self.execute(parts).await?;
        api::program::parse_udf(self.policy, raw)
    }

    // Pipelines

    /// Pipeline state: static descriptor plus a snapshot of the runtime
    /// status. At least one of `id` and `name` must be provided.
    pub async fn pipeline_status(
        &self,
        id: Option<PipelineId>,
        name: Option<&str>,
    ) -> Result<Option<Pipeline>, Error> {
        Ok(self.pipeline_status_detailed(id, name).await?.into_inner())
    }

    pub async fn pipeline_status_detailed(
        &self,
        id: Option<PipelineId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<Pipeline>>, Error> {
        let parts = api::pipeline::status_request(id, name)?;
        let raw = self.execute(parts).await?;
        api::pipeline::parse_status(self.policy, raw)
    }

    pub async fn list_pipelines(&self) -> Result<Option<Vec<Pipeline>>, Error> {
        Ok(self.list_pipelines_detailed().await?.into_inner())
    }

    pub async fn list_pipelines_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<Pipeline>>>, Error> {
        let raw = self.execute(api::pipeline::list_request()).await?;
        api::pipeline::parse_list(self.policy, raw)
    }

    pub async fn create_or_replace_pipeline(
        &self,
        pipeline_name: &str,
        body: &CreateOrReplacePipelineRequest,
    ) -> Result<Option<CreateOrReplacePipelineResponse>, Error> {
        Ok(self
            .create_or_replace_pipeline_detailed(pipeline_name, body)
            .await?
            .into_inner())
    }

    pub async fn create_or_replace_pipeline_detailed(
        &self,
        pipeline_name: &str,
        body: &CreateOrReplacePipelineRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplacePipelineResponse>>, Error> {
        let parts = api::pipeline::create_or_replace_request(pipeline_name, body)?;
        let raw = self.execute(parts).await?;
        api::pipeline::parse_create_or_replace(self.policy, raw)
    }

    pub async fn start_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self
            .start_pipeline_detailed(pipeline_name)
            .await?
            .into_inner())
    }

    pub async fn start_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::start_request(pipeline_name)?;
        let raw = self.execute(parts).await?;
        api::pipeline::parse_action(self.policy, raw)
    }

    pub async fn shutdown_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self
            .shutdown_pipeline_detailed(pipeline_name)
            .await?
            .into_inner())
    }

    pub async fn shutdown_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::shutdown_request(pipeline_name)?;
        let raw = self.execute(parts).await?;
        api::pipeline::parse_action(self.policy, raw)
    }

    pub async fn delete_pipeline(&self, pipeline_name: &str) -> Result<Option<()>, Error> {
        Ok(self
            .delete_pipeline_detailed(pipeline_name)
            .await?
            .into_inner())
    }

    pub async fn delete_pipeline_detailed(
        &self,
        pipeline_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::pipeline::delete_request(pipeline_name)?;
        let raw = self.execute(parts).await?;
        api::pipeline::parse_delete(self.policy, raw)
    }

    // Connectors

    /// Connector descriptor. At least one of `id` and `name` must be
    /// provided.
    pub async fn connector_status(
        &self,
        id: Option<ConnectorId>,
        name: Option<&str>,
    ) -> Result<Option<ConnectorDescr>, Error> {
        Ok(self.connector_status_detailed(id, name).await?.into_inner())
    }

    pub async fn connector_status_detailed(
        &self,
        id: Option<ConnectorId>,
        name: Option<&str>,
    ) -> Result<ResponseValue<Option<ConnectorDescr>>, Error> {
        let parts = api::connector::status_request(id, name)?;
        let raw = self.execute(parts).await?;
        api::connector::parse_status(self.policy, raw)
    }

    pub async fn list_connectors(&self) -> Result<Option<Vec<ConnectorDescr>>, Error> {
        Ok(self.list_connectors_detailed().await?.into_inner())
    }

    pub async fn list_connectors_detailed(
        &self,
    ) -> Result<ResponseValue<Option<Vec<ConnectorDescr>>>, Error> {
        let raw = self.execute(api::connector::list_request()).await?;
        api::connector::parse_list(self.policy, raw)
    }

    pub async fn create_or_replace_connector(
        &self,
        connector_name: &str,
        body: &CreateOrReplaceConnectorRequest,
    ) -> Result<Option<CreateOrReplaceConnectorResponse>, Error> {
        Ok(self
            .create_or_replace_connector_detailed(connector_name, body)
            .await?
            .into_inner())
    }

    pub async fn create_or_replace_connector_detailed(
        &self,
        connector_name: &str,
        body: &CreateOrReplaceConnectorRequest,
    ) -> Result<ResponseValue<Option<CreateOrReplaceConnectorResponse>>, Error> {
        let parts = api::connector::create_or_replace_request(connector_name, body)?;
        let raw = self.execute(parts).await?;
        api::connector::parse_create_or_replace(self.policy, raw)
    }

    pub async fn delete_connector(&self, connector_name: &str) -> Result<Option<()>, Error> {
        Ok(self
            .delete_connector_detailed(connector_name)
            .await?
            .into_inner())
    }

    pub async fn delete_connector_detailed(
        &self,
        connector_name: &str,
    ) -> Result<ResponseValue<Option<()>>, Error> {
        let parts = api::connector::delete_request(connector_name)?;
        let raw = self.execute(parts).await?;
        api::connector::parse_delete(self.policy, raw)
    }
}
