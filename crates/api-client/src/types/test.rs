use proptest::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use super::*;
use crate::MaybeUnset;

/// Decoding a wire object into a model and encoding it back must reproduce
/// the same key set and values; key order is not significant and
/// `serde_json::Value` equality is already order-independent.
fn assert_round_trip<T>(wire: JsonValue)
where
    T: Serialize + DeserializeOwned,
{
    let model: T = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(serde_json::to_value(&model).unwrap(), wire);
}

#[test]
fn error_response_round_trip() {
    assert_round_trip::<ErrorResponse>(json!({
        "message": "Unknown program name 'x'.",
        "error_code": "UnknownProgramName",
        "details": { "program_name": "x" }
    }));
}

#[test]
fn required_keys_are_not_silently_defaulted() {
    // A re-encode must never emit a key the wire did not carry, so fields
    // the server always sends are required rather than defaulted on decode.
    let truncated = json!({
        "message": "Unknown program name 'x'.",
        "error_code": "UnknownProgramName"
    });
    assert!(serde_json::from_value::<ErrorResponse>(truncated).is_err());

    let no_inputs = json!({
        "name": "pipeline-00000000-0000-0000-0000-000000000003",
        "outputs": {}
    });
    assert!(serde_json::from_value::<PipelineConfig>(no_inputs).is_err());
}

#[test]
fn program_descr_round_trip_with_extra_fields() {
    assert_round_trip::<ProgramDescr>(json!({
        "program_id": "00000000-0000-0000-0000-000000000001",
        "name": "tpc-h-program",
        "description": "",
        "version": 3,
        "status": "CompilingRust",
        // `schema` explicitly null, `code` absent: both must survive.
        "schema": null,
        "introduced_by_a_newer_server": { "nested": [1, 2, 3] }
    }));

    let descr: ProgramDescr = serde_json::from_value(json!({
        "program_id": "00000000-0000-0000-0000-000000000001",
        "name": "p",
        "description": "",
        "version": 1,
        "status": "Pending",
        "schema": null
    }))
    .unwrap();
    assert!(descr.schema.is_null());
    assert!(descr.code.is_unset());
}

#[test]
fn program_status_with_sql_errors_round_trip() {
    assert_round_trip::<ProgramDescr>(json!({
        "program_id": "00000000-0000-0000-0000-000000000002",
        "name": "broken",
        "description": "",
        "version": 2,
        "status": {
            "SqlError": [{
                "startLineNumber": 14,
                "startColumn": 13,
                "endLineNumber": 14,
                "endColumn": 13,
                "warning": false,
                "errorType": "Error parsing SQL",
                "message": "Encountered \"<EOF>\" at line 14, column 13."
            }]
        }
    }));
}

#[test]
fn pipeline_round_trip_null_vs_unset_program_id() {
    // program_id present-as-null and absent are different wire states.
    let with_null = json!({
        "pipeline_id": "00000000-0000-0000-0000-000000000003",
        "program_id": null,
        "version": 1,
        "name": "p",
        "description": "",
        "config": { "workers": 8 },
        "attached_connectors": []
    });
    assert_round_trip::<PipelineDescr>(with_null.clone());

    let without = json!({
        "pipeline_id": "00000000-0000-0000-0000-000000000003",
        "version": 1,
        "name": "p",
        "description": "",
        "config": { "workers": 8 },
        "attached_connectors": []
    });
    assert_round_trip::<PipelineDescr>(without.clone());

    let a: PipelineDescr = serde_json::from_value(with_null).unwrap();
    let b: PipelineDescr = serde_json::from_value(without).unwrap();
    assert!(a.program_id.is_null());
    assert!(b.program_id.is_unset());
    assert_ne!(a, b);
}

#[test]
fn connector_config_passthrough_settings_round_trip() {
    assert_round_trip::<ConnectorDescr>(json!({
        "connector_id": "00000000-0000-0000-0000-000000000004",
        "name": "tpch_lineitem",
        "description": "",
        "config": {
            "transport": {
                "name": "kafka_input",
                "config": {
                    "auto.offset.reset": "earliest",
                    "bootstrap.servers": "localhost:9092",
                    "topics": ["tpch_lineitems"]
                }
            },
            "format": { "name": "csv", "config": {} }
        }
    }));
}

#[test]
fn map_shaped_model_point_operations() {
    let endpoint: OutputEndpointConfig = serde_json::from_value(json!({
        "stream": "V",
        "transport": { "name": "kafka_output", "config": { "topic": "t" } },
        "format": { "name": "csv" }
    }))
    .unwrap();

    let mut outputs = PipelineConfigOutputs::new();
    for name in ["a", "b", "c"] {
        outputs.insert(name, endpoint.clone());
    }
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert!(outputs.contains("b"));
    assert_eq!(outputs.get("b"), Some(&endpoint));

    assert!(outputs.remove("b").is_some());
    assert_eq!(outputs.len(), 2);
    assert!(!outputs.contains("b"));
    assert!(outputs.get("b").is_none());
}

#[test]
fn map_shaped_model_is_all_extra_fields_by_construction() {
    // Assign {"foo": {...}} to the dict form, decode, re-encode: exactly
    // one key "foo" whose value round-trips.
    let wire = json!({
        "foo": {
            "stream": "OUTPUT_USERS",
            "transport": {
                "name": "kafka_output",
                "config": { "topic": "out", "bootstrap.servers": "localhost:9092" }
            },
            "format": { "name": "avro", "config": { "registry_urls": ["http://localhost:8081"] } },
            "some_future_option": true
        }
    });
    let outputs: PipelineConfigOutputs = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(outputs.keys().collect::<Vec<_>>(), vec!["foo"]);
    // The undeclared endpoint key was captured by the flattened connector
    // config, not dropped.
    assert_eq!(
        outputs.get("foo").unwrap().connector_config.extra["some_future_option"],
        json!(true)
    );
    assert_eq!(serde_json::to_value(&outputs).unwrap(), wire);
}

#[test]
fn pipeline_config_round_trip() {
    assert_round_trip::<PipelineConfig>(json!({
        "name": "pipeline-00000000-0000-0000-0000-000000000003",
        "global": { "workers": 8, "cpu_profiler": true },
        "inputs": {
            "tpch_nation": {
                "stream": "NATION",
                "transport": { "name": "kafka_input", "config": { "topics": ["tpch_nations"] } },
                "format": { "name": "csv", "config": {} }
            }
        },
        "outputs": {}
    }));
}

#[test]
fn runtime_config_null_and_extra_fields_round_trip() {
    assert_round_trip::<RuntimeConfig>(json!({
        "workers": 8,
        "cpu_profiler": null,
        "resources": { "cpu_cores_min": 2 }
    }));
}

#[test]
fn pipeline_runtime_state_round_trip() {
    assert_round_trip::<Pipeline>(json!({
        "descriptor": {
            "pipeline_id": "00000000-0000-0000-0000-000000000003",
            "program_id": "00000000-0000-0000-0000-000000000001",
            "version": 2,
            "name": "tpc-h-pipeline",
            "description": "",
            "config": { "workers": 8 },
            "attached_connectors": [{
                "name": "tpch_nation",
                "is_input": true,
                "connector_name": "tpch_nation",
                "relation_name": "NATION"
            }]
        },
        "state": {
            "location": "localhost:34567",
            "desired_status": "Running",
            "current_status": "Provisioning",
            "status_since": "2023-11-05T08:15:30Z",
            "error": null,
            "created": "2023-11-05T08:15:00Z"
        }
    }));
}

#[test]
fn unset_request_fields_are_omitted_from_the_body() {
    let request = CreateOrReplacePipelineRequest {
        description: String::new(),
        config: RuntimeConfig {
            workers: MaybeUnset::Set(8),
            ..Default::default()
        },
        program_name: MaybeUnset::Unset,
        connectors: MaybeUnset::Unset,
        extra: ExtraFields::new(),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "description": "", "config": { "workers": 8 } })
    );
}

proptest! {
    #[test]
    fn program_status_round_trips(status in any::<ProgramStatus>()) {
        let wire = serde_json::to_value(&status).unwrap();
        let back: ProgramStatus = serde_json::from_value(wire).unwrap();
        prop_assert_eq!(status, back);
    }

    #[test]
    fn pipeline_status_round_trips(status in any::<PipelineStatus>()) {
        let wire = serde_json::to_value(status).unwrap();
        let back: PipelineStatus = serde_json::from_value(wire).unwrap();
        prop_assert_eq!(status, back);
    }

    #[test]
    fn version_round_trips(version in any::<Version>()) {
        let wire = serde_json::to_value(version).unwrap();
        let back: Version = serde_json::from_value(wire).unwrap();
        prop_assert_eq!(version, back);
    }
}
