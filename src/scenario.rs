//! The reproduction as one linear procedure.
//!
//! prepare fixture -> stalled read -> verify. Errors from any step are
//! returned unchanged; nothing is caught or retried.

use std::path::Path;
use std::time::Duration;

use aws_sdk_s3::Client;
use tracing::Instrument;

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::fixture::prepare_fixture;
use crate::reader::StalledReader;
use crate::verify::verify_byte_count;

/// Outcome of a run that reached the verifier and passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Bytes uploaded
    pub expected: u64,
    /// Bytes accumulated from decoded lines
    pub actual: u64,
    /// Bytes received on the wire, line terminators included
    pub raw_bytes: u64,
    pub line_count: usize,
    pub stall: Duration,
    /// Open-to-end-of-stream time, stall included
    pub elapsed: Duration,
}

pub struct Scenario {
    client: Client,
    config: ScenarioConfig,
}

impl Scenario {
    pub fn new(client: Client, config: ScenarioConfig) -> Self {
        Self { client, config }
    }

    /// Run the full procedure, writing the local payload into `temp_dir`
    pub async fn run(&self, temp_dir: &Path) -> Result<ScenarioReport> {
        let config = &self.config;
        let span = tracing::info_span!(
            "scenario",
            bucket = %config.bucket,
            key = %config.key,
            payload_size = config.payload_size,
            stall_ms = config.stall_ms
        );
        self.run_steps(temp_dir).instrument(span).await
    }

    async fn run_steps(&self, temp_dir: &Path) -> Result<ScenarioReport> {
        let config = &self.config;
        let uploaded = prepare_fixture(&self.client, config, temp_dir).await?;

        let read = StalledReader::new(config.stall())
            .read_object(&self.client, &uploaded.bucket, &uploaded.key)
            .await?;

        let actual = verify_byte_count(&read.lines, uploaded.size)?;

        Ok(ScenarioReport {
            expected: uploaded.size,
            actual,
            raw_bytes: read.raw_bytes,
            line_count: read.lines.len(),
            stall: config.stall(),
            elapsed: read.elapsed,
        })
    }
}
