//! Topic provisioning and data loading through the `rpk` CLI.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{bail, Context, Result};
use log::{debug, info};

/// Records pushed per `rpk topic produce` invocation.
const PRODUCE_BATCH_LINES: usize = 1000;

fn run_rpk(args: &[&str]) -> Result<Output> {
    Command::new("rpk")
        .args(args)
        .output()
        .context("failed to run `rpk`; is it installed and on the PATH?")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Deletes a topic. Deleting a topic that does not exist is not an error.
pub fn delete_topic(topic: &str) -> Result<()> {
    let output = run_rpk(&["topic", "delete", topic])?;
    if !output.status.success() {
        debug!("rpk topic delete {topic}: {}", stderr_of(&output));
    }
    Ok(())
}

/// Creates a topic with unbounded retention, so replaying the demo data
/// into a restarted pipeline always sees the full history.
pub fn create_topic(topic: &str) -> Result<()> {
    let output = run_rpk(&[
        "topic",
        "create",
        topic,
        "-c",
        "retention.ms=-1",
        "-c",
        "retention.bytes=-1",
    ])?;
    if !output.status.success() {
        bail!("rpk topic create {topic} failed: {}", stderr_of(&output));
    }
    Ok(())
}

/// Streams a delimited file into a topic, one record per line, in batches
/// of [`PRODUCE_BATCH_LINES`] lines per `rpk` invocation.
pub fn produce_file(topic: &str, file: &Path) -> Result<()> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("cannot open {}", file.display()))?,
    );
    let mut batch = Vec::with_capacity(PRODUCE_BATCH_LINES);
    let mut total = 0usize;
    for line in reader.lines() {
        batch.push(line?);
        if batch.len() == PRODUCE_BATCH_LINES {
            produce_batch(topic, &batch)?;
            total += batch.len();
            batch.clear();
        }
    }
    if !batch.is_empty() {
        produce_batch(topic, &batch)?;
        total += batch.len();
    }
    info!(
        "pushed {total} records from {} to topic {topic}",
        file.display()
    );
    Ok(())
}

fn produce_batch(topic: &str, lines: &[String]) -> Result<()> {
    let mut child = Command::new("rpk")
        .args(["topic", "produce", topic, "-f", "%v"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to run `rpk`; is it installed and on the PATH?")?;
    {
        let mut stdin = child
            .stdin
            .take()
            .context("rpk child process has no stdin handle")?;
        for line in lines {
            stdin.write_all(line.as_bytes())?;
            stdin.write_all(b"\n")?;
        }
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!("rpk topic produce {topic} failed: {}", stderr_of(&output));
    }
    Ok(())
}
