// Logging module for structured logging using the tracing crate

use std::error::Error;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,aws_smithy_runtime=warn,aws_config=warn";

/// Output format of the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines, captured by the test harness
    #[default]
    Pretty,
    /// One JSON object per event, for CI log collection
    Json,
}

/// Initialize the tracing subscriber for structured logging
///
/// Installs a `tracing-subscriber` fmt subscriber filtered by `RUST_LOG`
/// (falling back to [`DEFAULT_LOG_FILTER`]). Output goes through the test
/// writer so `cargo test` captures it per test.
///
/// Safe to call from every test: only the first call installs anything,
/// later calls return `Ok(())`.
///
/// # Examples
///
/// ```
/// use s3_stall_repro::logging::init_subscriber;
///
/// init_subscriber().expect("Failed to initialize logging");
/// tracing::info!("scenario started");
/// ```
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    init_subscriber_with_format(LogFormat::default())
}

pub fn init_subscriber_with_format(format: LogFormat) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = install(format);
    });
    result
}

fn install(format: LogFormat) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer();

    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
