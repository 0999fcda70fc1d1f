use std::path::PathBuf;

use clap::Parser;

/// Provisions the TPC-H demo end to end: Kafka topics, test data, the SQL
/// program, its connectors and the pipeline binding them together.
#[derive(Debug, Parser)]
#[command(name = "dbsp-demo", version)]
pub struct Args {
    /// URL of the pipeline manager API.
    #[arg(long, env = "DBSP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Kafka broker address as reachable from the pipeline (not necessarily
    /// the same address this tool reaches it at).
    #[arg(
        long,
        env = "DBSP_KAFKA_URL_FOR_CONNECTOR",
        default_value = "localhost:9092"
    )]
    pub kafka_url_for_connector: String,

    /// Schema registry URL as reachable from the pipeline.
    #[arg(
        long,
        env = "DBSP_REGISTRY_URL_FOR_CONNECTOR",
        default_value = "http://localhost:8081"
    )]
    pub registry_url_for_connector: String,

    /// Directory holding the TPC-H `dbgen` CSV exports (`nation.csv`,
    /// `region.csv`, ...). When omitted, topic provisioning and data
    /// loading are skipped and only the control plane is set up.
    #[arg(long, env = "DBSP_DEMO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// SQL program to deploy instead of the bundled TPC-H program.
    #[arg(long)]
    pub sql_file: Option<PathBuf>,

    /// Start the pipeline once everything is provisioned.
    #[arg(long)]
    pub start: bool,

    /// Keep pre-existing programs, pipelines and connectors instead of
    /// deleting everything the demo does not own.
    #[arg(long)]
    pub no_teardown: bool,

    /// Seconds between program compilation status polls.
    #[arg(long, default_value_t = 5)]
    pub poll_interval_secs: u64,
}
