// Configuration module

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    BUCKET_NAME, MAX_BUCKET_NAME_LEN, MIN_BUCKET_NAME_LEN, OBJECT_KEY, PAYLOAD_SIZE_BYTES,
    STALL_DURATION_MS,
};
use crate::error::{ReproError, Result};

pub mod endpoint;

pub use endpoint::S3Endpoint;

fn default_bucket() -> String {
    BUCKET_NAME.to_string()
}

fn default_key() -> String {
    OBJECT_KEY.to_string()
}

fn default_payload_size() -> u64 {
    PAYLOAD_SIZE_BYTES
}

fn default_stall_ms() -> u64 {
    STALL_DURATION_MS
}

/// Parameters of one stalled download run
///
/// Every field defaults to the literals the defect was reported with, so an
/// empty YAML document yields the canonical scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Bucket the payload is uploaded to (created if absent)
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Object key of the payload
    #[serde(default = "default_key")]
    pub key: String,

    /// Payload size in bytes; zero is allowed
    #[serde(default = "default_payload_size")]
    pub payload_size: u64,

    /// Pause between opening the stream and the first read, in milliseconds
    #[serde(default = "default_stall_ms")]
    pub stall_ms: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            key: default_key(),
            payload_size: default_payload_size(),
            stall_ms: default_stall_ms(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ReproError::Config(format!("Invalid scenario YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ReproError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.bucket.len();
        if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
            return Err(ReproError::Config(format!(
                "Bucket name '{}' must be between {} and {} characters",
                self.bucket, MIN_BUCKET_NAME_LEN, MAX_BUCKET_NAME_LEN
            )));
        }

        if self.key.is_empty() {
            return Err(ReproError::Config("Object key cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Stall duration as a `Duration`
    pub fn stall(&self) -> Duration {
        Duration::from_millis(self.stall_ms)
    }

    /// Same scenario with the stall removed, used as the baseline
    pub fn without_stall(&self) -> Self {
        Self {
            stall_ms: 0,
            ..self.clone()
        }
    }

    pub fn with_payload_size(mut self, payload_size: u64) -> Self {
        self.payload_size = payload_size;
        self
    }

    pub fn with_stall(mut self, stall: Duration) -> Self {
        self.stall_ms = u64::try_from(stall.as_millis()).unwrap_or(u64::MAX);
        self
    }
}
