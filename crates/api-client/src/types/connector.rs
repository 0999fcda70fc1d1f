//! Connector resource models.
//!
//! A connector binds one relation to one transport/format pair; the
//! direction (input vs output) is decided when it is attached to a
//! pipeline. Connectors are created independently of pipelines and are
//! referenced by name; deleting a pipeline does not delete its connectors.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::{ConnectorId, ExtraFields};
use crate::MaybeUnset;

/// Transport endpoint configuration: a transport name (`kafka_input`,
/// `kafka_output`, ...) plus the transport-specific settings, which are
/// passed through verbatim (e.g. librdkafka options).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Name of the transport.
    pub name: String,
    /// Transport-specific configuration, opaque to this client.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub config: MaybeUnset<BTreeMap<String, JsonValue>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Parser/encoder configuration: a format name (`csv`, `json`, `avro`, ...)
/// plus format-specific settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Name of the format.
    pub name: String,
    /// Format-specific configuration, opaque to this client.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub config: MaybeUnset<BTreeMap<String, JsonValue>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A data connector's configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Transport endpoint configuration.
    pub transport: TransportConfig,
    /// Parser configuration.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub format: MaybeUnset<FormatConfig>,
    /// Backpressure threshold: maximal number of records queued by the
    /// endpoint before it is paused.
    #[serde(default, skip_serializing_if = "MaybeUnset::is_unset")]
    pub max_queued_records: MaybeUnset<u64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Describes an input connector configuration inside an expanded pipeline
/// configuration. Undeclared keys are captured by the flattened
/// [`ConnectorConfig`]'s `extra` map.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InputEndpointConfig {
    /// The name of the input stream of the circuit that this endpoint is
    /// connected to.
    pub stream: String,
    /// Connector configuration.
    #[serde(flatten)]
    pub connector_config: ConnectorConfig,
}

/// Describes an output connector configuration inside an expanded pipeline
/// configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutputEndpointConfig {
    /// The name of the output stream of the circuit that this endpoint is
    /// connected to.
    pub stream: String,
    /// Connector configuration.
    #[serde(flatten)]
    pub connector_config: ConnectorConfig,
}

/// Connector descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConnectorDescr {
    pub connector_id: ConnectorId,
    pub name: String,
    pub description: String,
    pub config: ConnectorConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Request body of `create_or_replace_connector`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplaceConnectorRequest {
    /// Connector description.
    pub description: String,
    /// Connector configuration.
    pub config: ConnectorConfig,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Response body of `create_or_replace_connector`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateOrReplaceConnectorResponse {
    /// Unique id assigned to the connector.
    pub connector_id: ConnectorId,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
