//! TPC-H demo runner for the DBSP pipeline manager.
//!
//! Strictly sequential: topics, data, program, connectors, pipeline, in
//! that order, aborting on the first failure. All durable state lives in
//! Kafka and the pipeline manager; rerunning the tool converges to the
//! same setup.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use dbsp_api_client::blocking::Client;

mod cli;
mod kafka;
mod provision;

use cli::Args;

const BUNDLED_SQL: &str = include_str!("../sql/project.sql");

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(data_dir) = &args.data_dir {
        info!("(re-)creating Kafka topics");
        for table in &provision::TABLES {
            kafka::delete_topic(table.topic)?;
        }
        for table in &provision::TABLES {
            kafka::create_topic(table.topic)?;
        }
        for table in &provision::TABLES {
            kafka::produce_file(table.topic, &data_dir.join(table.file))?;
        }
    }

    let client = Client::new(&args.api_url);

    if !args.no_teardown {
        provision::teardown(&client)?;
    }

    let sql = match &args.sql_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => BUNDLED_SQL.to_string(),
    };
    provision::deploy_program(
        &client,
        &sql,
        Duration::from_secs(args.poll_interval_secs),
    )?;

    let connectors = provision::deploy_connectors(
        &client,
        &args.kafka_url_for_connector,
        &args.registry_url_for_connector,
    )?;
    provision::deploy_pipeline(&client, connectors)?;

    if args.start {
        provision::restart_pipeline(&client)?;
    }

    info!("demo provisioned");
    Ok(())
}
