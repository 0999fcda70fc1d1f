//! Pipeline resource models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

use super::{ErrorResponse, ExtraFields, PipelineId, ProgramId, Version};
use crate::MaybeUnset;

/// Lifecycle status of a pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum PipelineStatus {
    /// The pipeline has not been started or has been shut down.
    Shutdown,
    /// Compute resources for the pipeline are being allocated.
    Provisioning,
    /// The pipeline process is initializing.
    Initializing,
    /// The pipeline is initialized but data processing is paused.
    Paused,
    /// The pipeline is processing data.
    Running,
    /// The pipeline is in the process of shutting down.
    ShuttingDown,
    /// The pipeline remains in an error state until shut down.
    Failed,
}

/// Global pipeline execution settings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Number of DBSP worker threads.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub workers: MaybeUnset<u16>,
    /// Enable the CPU profiler.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub cpu_profiler: MaybeUnset<bool>,
    /// Minimal input batch size the pipeline waits for before processing.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub min_batch_size_records: MaybeUnset<u64>,
    /// Maximal delay in microseconds to wait for `min_batch_size_records`.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub max_buffering_delay_usecs: MaybeUnset<u64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Attachment of a named connector to a pipeline: direction plus the
/// relation it feeds or drains.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttachedConnector {
    /// A unique identifier for this attachment.
    pub name: String,
    /// Is this an input or an output?
    pub is_input: bool,
    /// The name of the connector to attach.
    pub connector_name: String,
    /// The table or view this connector is attached to.
    pub relation_name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Pipeline descriptor: the static configuration half of a [`Pipeline`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescr {
    pub pipeline_id: PipelineId,
    /// Program bound to the pipeline, if any.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub program_id: MaybeUnset<ProgramId>,
    pub version: Version,
    pub name: String,
    pub description: String,
    pub config: RuntimeConfig,
    pub attached_connectors: Vec<AttachedConnector>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Runtime state of a pipeline, maintained by the server; the client only
/// ever holds a point-in-time snapshot of it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PipelineRuntimeState {
    /// Location where the pipeline can be reached at runtime.
    pub location: String,
    /// Status requested by the user.
    pub desired_status: PipelineStatus,
    /// Current status of the pipeline.
    pub current_status: PipelineStatus,
    /// Time when the pipeline was assigned its current status.
    pub status_since: DateTime<Utc>,
    /// Error that caused the pipeline to fail, if any.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub error: MaybeUnset<ErrorResponse>,
    /// Time when the pipeline started executing.
    pub created: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// State of a pipeline: static configuration plus runtime status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Static configuration of the pipeline.
    pub descriptor: PipelineDescr,
    /// Runtime state of the pipeline.
    pub state: PipelineRuntimeState,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Request body of `create_or_replace_pipeline`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplacePipelineRequest {
    /// Pipeline description.
    pub description: String,
    /// Global pipeline configuration.
    pub config: RuntimeConfig,
    /// Name of the program to bind; explicit `null` unbinds.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub program_name: MaybeUnset<String>,
    /// Connector attachments.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub connectors: MaybeUnset<Vec<AttachedConnector>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Response body of `create_or_replace_pipeline`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplacePipelineResponse {
    /// Unique id assigned to the pipeline.
    pub pipeline_id: PipelineId,
    /// Pipeline version.
    pub version: Version,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Input endpoint collection of an expanded pipeline configuration, keyed
/// by endpoint name. A map-shaped model: it declares no fields of its own,
/// all of its content is keyed entries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineConfigInputs(BTreeMap<String, super::InputEndpointConfig>);

impl PipelineConfigInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&super::InputEndpointConfig> {
        self.0.get(name)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        endpoint: super::InputEndpointConfig,
    ) -> Option<super::InputEndpointConfig> {
        self.0.insert(name.into(), endpoint)
    }

    pub fn remove(&mut self, name: &str) -> Option<super::InputEndpointConfig> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, super::InputEndpointConfig> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output endpoint collection of an expanded pipeline configuration, keyed
/// by endpoint name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineConfigOutputs(BTreeMap<String, super::OutputEndpointConfig>);

impl PipelineConfigOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&super::OutputEndpointConfig> {
        self.0.get(name)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        endpoint: super::OutputEndpointConfig,
    ) -> Option<super::OutputEndpointConfig> {
        self.0.insert(name.into(), endpoint)
    }

    pub fn remove(&mut self, name: &str) -> Option<super::OutputEndpointConfig> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, super::OutputEndpointConfig> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pipeline configuration as expanded by the server: global settings plus
/// the fully resolved input and output endpoint collections.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name assigned by the server, `pipeline-{id}`.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub name: MaybeUnset<String>,
    /// Global execution settings.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub global: MaybeUnset<RuntimeConfig>,
    /// Input endpoints, keyed by endpoint name.
    pub inputs: PipelineConfigInputs,
    /// Output endpoints, keyed by endpoint name.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub outputs: MaybeUnset<PipelineConfigOutputs>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
