//! Wire models of the pipeline manager REST API.
//!
//! Every model is an open representation of its wire object: declared fields
//! are typed, and any key the server sends beyond them is retained verbatim
//! in the model's `extra` map and re-emitted unchanged on encode. Optional
//! fields use [`MaybeUnset`](crate::MaybeUnset) so that an absent key and an
//! explicit `null` survive a decode/encode round trip unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use uuid::Uuid;

mod connector;
mod pipeline;
mod program;

pub use connector::{
    ConnectorConfig, ConnectorDescr, CreateOrReplaceConnectorRequest,
    CreateOrReplaceConnectorResponse, FormatConfig, InputEndpointConfig, OutputEndpointConfig,
    TransportConfig,
};
pub use pipeline::{
    AttachedConnector, CreateOrReplacePipelineRequest, CreateOrReplacePipelineResponse, Pipeline,
    PipelineConfig, PipelineConfigInputs, PipelineConfigOutputs, PipelineDescr,
    PipelineRuntimeState, PipelineStatus, RuntimeConfig,
};
pub use program::{
    CompileProgramRequest, CreateOrReplaceProgramRequest, CreateOrReplaceProgramResponse,
    ProgramDescr, ProgramStatus, SqlCompilerMessage, UdfResponse,
};

/// Side table for wire keys that do not match any declared field.
pub type ExtraFields = BTreeMap<String, JsonValue>;

/// Unique program id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProgramId(
    #[cfg_attr(test, proptest(value = "Uuid::nil()"))] pub Uuid,
);

impl Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique pipeline id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct PipelineId(pub Uuid);

impl Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique connector id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ConnectorId(pub Uuid);

impl Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Version number, incremented by the server on every successful update.
/// Used as an optimistic concurrency guard on compile requests.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(transparent)]
#[serde(transparent)]
pub struct Version(#[cfg_attr(test, proptest(strategy = "1..100i64"))] pub i64);

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Information returned by REST API endpoints on error.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable string identifying the error type.
    pub error_code: String,
    /// Detailed error metadata; its shape is determined by `error_code`.
    pub details: JsonValue,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod test;
