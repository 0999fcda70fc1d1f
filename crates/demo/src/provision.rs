//! Control-plane provisioning: program, connectors and pipeline.

use std::collections::BTreeMap;
use std::thread::sleep;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use log::info;
use serde_json::{json, Value as JsonValue};

use dbsp_api_client::blocking::Client;
use dbsp_api_client::types::{
    AttachedConnector, CompileProgramRequest, ConnectorConfig, CreateOrReplaceConnectorRequest,
    CreateOrReplacePipelineRequest, CreateOrReplaceProgramRequest, FormatConfig, PipelineStatus,
    RuntimeConfig, TransportConfig,
};
use dbsp_api_client::MaybeUnset;

pub const PROGRAM_NAME: &str = "tpc-h-program";
pub const PIPELINE_NAME: &str = "tpc-h-pipeline";

const PIPELINE_WORKERS: u16 = 8;

/// Interval between pipeline status polls while waiting for a transition.
const PIPELINE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One TPC-H base relation: its input connector, the SQL table it feeds,
/// the Kafka topic backing it and the `dbgen` export file it is loaded
/// from.
pub struct Table {
    pub connector: &'static str,
    pub relation: &'static str,
    pub topic: &'static str,
    pub file: &'static str,
}

pub const TABLES: [Table; 8] = [
    Table {
        connector: "tpch_nation",
        relation: "NATION",
        topic: "tpch_nations",
        file: "nation.csv",
    },
    Table {
        connector: "tpch_region",
        relation: "REGION",
        topic: "tpch_regions",
        file: "region.csv",
    },
    Table {
        connector: "tpch_part",
        relation: "PART",
        topic: "tpch_parts",
        file: "part.csv",
    },
    Table {
        connector: "tpch_supplier",
        relation: "SUPPLIER",
        topic: "tpch_suppliers",
        file: "supplier.csv",
    },
    Table {
        connector: "tpch_partsupp",
        relation: "PARTSUPP",
        topic: "tpch_partsupp",
        file: "partsupp.csv",
    },
    Table {
        connector: "tpch_customer",
        relation: "CUSTOMER",
        topic: "tpch_customers",
        file: "customer.csv",
    },
    Table {
        connector: "tpch_orders",
        relation: "ORDERS",
        topic: "tpch_orders",
        file: "order.csv",
    },
    Table {
        connector: "tpch_lineitem",
        relation: "LINEITEM",
        topic: "tpch_lineitems",
        file: "lineitem.csv",
    },
];

/// The Avro output connector draining the pricing summary view.
const OUTPUT_CONNECTOR: &str = "tpch_pricing_summary";
const OUTPUT_RELATION: &str = "PRICING_SUMMARY";
const OUTPUT_TOPIC: &str = "tpch_pricing_summary";

fn settings<const N: usize>(pairs: [(&str, JsonValue); N]) -> BTreeMap<String, JsonValue> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// A CSV-over-Kafka input reading one topic from the beginning.
fn kafka_csv_input(kafka_url: &str, topic: &str) -> ConnectorConfig {
    ConnectorConfig {
        transport: TransportConfig {
            name: "kafka_input".to_string(),
            config: MaybeUnset::Set(settings([
                ("bootstrap.servers", json!(kafka_url)),
                ("topics", json!([topic])),
                ("auto.offset.reset", json!("earliest")),
            ])),
            extra: Default::default(),
        },
        format: MaybeUnset::Set(FormatConfig {
            name: "csv".to_string(),
            config: MaybeUnset::Set(BTreeMap::new()),
            extra: Default::default(),
        }),
        max_queued_records: MaybeUnset::Unset,
        extra: Default::default(),
    }
}

/// An Avro-over-Kafka output registering its schema with the registry.
fn kafka_avro_output(kafka_url: &str, registry_url: &str, topic: &str) -> ConnectorConfig {
    ConnectorConfig {
        transport: TransportConfig {
            name: "kafka_output".to_string(),
            config: MaybeUnset::Set(settings([
                ("bootstrap.servers", json!(kafka_url)),
                ("topic", json!(topic)),
            ])),
            extra: Default::default(),
        },
        format: MaybeUnset::Set(FormatConfig {
            name: "avro".to_string(),
            config: MaybeUnset::Set(settings([("registry_urls", json!([registry_url]))])),
            extra: Default::default(),
        }),
        max_queued_records: MaybeUnset::Unset,
        extra: Default::default(),
    }
}

/// Shuts down every pipeline, then deletes all pipelines, programs and
/// connectors the demo does not own. Shutdowns are fired for all pipelines
/// first and awaited in a second pass, so slow teardowns overlap.
pub fn teardown(client: &Client) -> Result<()> {
    let pipelines = client
        .list_pipelines()?
        .ok_or_else(|| anyhow!("pipeline listing returned no body"))?;
    for pipeline in &pipelines {
        client.shutdown_pipeline(&pipeline.descriptor.name)?;
    }
    for pipeline in &pipelines {
        wait_for_pipeline_status(client, &pipeline.descriptor.name, PipelineStatus::Shutdown)?;
    }
    for pipeline in &pipelines {
        if pipeline.descriptor.name != PIPELINE_NAME {
            info!("deleting pipeline {}", pipeline.descriptor.name);
            client.delete_pipeline(&pipeline.descriptor.name)?;
        }
    }

    let programs = client
        .list_programs()?
        .ok_or_else(|| anyhow!("program listing returned no body"))?;
    for program in &programs {
        if program.name != PROGRAM_NAME {
            info!("deleting program {}", program.name);
            client.delete_program(&program.name)?;
        }
    }

    let retained: Vec<&str> = TABLES
        .iter()
        .map(|table| table.connector)
        .chain([OUTPUT_CONNECTOR])
        .collect();
    let connectors = client
        .list_connectors()?
        .ok_or_else(|| anyhow!("connector listing returned no body"))?;
    for connector in &connectors {
        if !retained.contains(&connector.name.as_str()) {
            info!("deleting connector {}", connector.name);
            client.delete_connector(&connector.name)?;
        }
    }
    Ok(())
}

/// Registers the SQL program, kicks off compilation of the registered
/// version and polls until it succeeds. Aborts on any terminal status
/// other than `Success`; polls forever while compilation is in progress.
pub fn deploy_program(client: &Client, sql: &str, poll_interval: Duration) -> Result<()> {
    let response = client
        .create_or_replace_program(
            PROGRAM_NAME,
            &CreateOrReplaceProgramRequest {
                description: String::new(),
                code: sql.to_string(),
                extra: Default::default(),
            },
        )?
        .ok_or_else(|| anyhow!("create-or-replace program returned no body"))?;

    info!(
        "compiling program {PROGRAM_NAME} (version: {})",
        response.version
    );
    client.compile_program(
        PROGRAM_NAME,
        &CompileProgramRequest {
            version: response.version,
            extra: Default::default(),
        },
    )?;

    loop {
        let program = client
            .program_status(None, Some(PROGRAM_NAME))?
            .ok_or_else(|| anyhow!("program {PROGRAM_NAME} not found"))?;
        info!("program status: {:?}", program.status);
        if program.status.is_fully_compiled() {
            return Ok(());
        }
        if !program.status.is_compiling() {
            bail!("program compilation failed with status {:?}", program.status);
        }
        sleep(poll_interval);
    }
}

/// Creates the eight CSV inputs and the Avro output, and returns the
/// attachments to declare on the pipeline.
pub fn deploy_connectors(
    client: &Client,
    kafka_url: &str,
    registry_url: &str,
) -> Result<Vec<AttachedConnector>> {
    let mut attached = Vec::with_capacity(TABLES.len() + 1);

    for table in &TABLES {
        client.create_or_replace_connector(
            table.connector,
            &CreateOrReplaceConnectorRequest {
                description: String::new(),
                config: kafka_csv_input(kafka_url, table.topic),
                extra: Default::default(),
            },
        )?;
        attached.push(AttachedConnector {
            name: table.connector.to_string(),
            is_input: true,
            connector_name: table.connector.to_string(),
            relation_name: table.relation.to_string(),
            extra: Default::default(),
        });
    }

    client.create_or_replace_connector(
        OUTPUT_CONNECTOR,
        &CreateOrReplaceConnectorRequest {
            description: String::new(),
            config: kafka_avro_output(kafka_url, registry_url, OUTPUT_TOPIC),
            extra: Default::default(),
        },
    )?;
    attached.push(AttachedConnector {
        name: OUTPUT_CONNECTOR.to_string(),
        is_input: false,
        connector_name: OUTPUT_CONNECTOR.to_string(),
        relation_name: OUTPUT_RELATION.to_string(),
        extra: Default::default(),
    });

    Ok(attached)
}

/// Creates or replaces the demo pipeline binding the program and the
/// connector attachments.
pub fn deploy_pipeline(client: &Client, connectors: Vec<AttachedConnector>) -> Result<()> {
    client.create_or_replace_pipeline(
        PIPELINE_NAME,
        &CreateOrReplacePipelineRequest {
            description: String::new(),
            config: RuntimeConfig {
                workers: MaybeUnset::Set(PIPELINE_WORKERS),
                ..Default::default()
            },
            program_name: MaybeUnset::Set(PROGRAM_NAME.to_string()),
            connectors: MaybeUnset::Set(connectors),
            extra: Default::default(),
        },
    )?;
    Ok(())
}

/// Stops the pipeline if it is running, starts it again and waits until it
/// reports `Running`.
pub fn restart_pipeline(client: &Client) -> Result<()> {
    info!("(re)starting pipeline {PIPELINE_NAME}");
    client.shutdown_pipeline(PIPELINE_NAME)?;
    wait_for_pipeline_status(client, PIPELINE_NAME, PipelineStatus::Shutdown)?;
    client.start_pipeline(PIPELINE_NAME)?;
    wait_for_pipeline_status(client, PIPELINE_NAME, PipelineStatus::Running)?;
    info!("pipeline {PIPELINE_NAME} running");
    Ok(())
}

fn wait_for_pipeline_status(client: &Client, name: &str, status: PipelineStatus) -> Result<()> {
    loop {
        let pipeline = client
            .pipeline_status(None, Some(name))?
            .ok_or_else(|| anyhow!("pipeline {name} not found"))?;
        if pipeline.state.current_status == status {
            return Ok(());
        }
        sleep(PIPELINE_POLL_INTERVAL);
    }
}
