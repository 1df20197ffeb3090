// Stalled S3 download reproduction library
//
// Uploads a fixed-size object to an S3-compatible backend, opens a streamed
// read, pauses before consuming it, then drains and checks the byte count.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod reader;
pub mod s3;
pub mod scenario;
pub mod verify;

pub use config::{S3Endpoint, ScenarioConfig};
pub use error::{ReproError, Result};
pub use scenario::{Scenario, ScenarioReport};
