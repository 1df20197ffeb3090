// S3 client module

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;

use crate::config::S3Endpoint;
use crate::error::{ReproError, Result};

/// Provider name attached to the static credentials
const CREDENTIALS_PROVIDER: &str = "s3-stall-repro";

fn validate_endpoint(endpoint: &S3Endpoint) -> Result<()> {
    if endpoint.endpoint_url.is_empty() {
        return Err(ReproError::Config(
            "S3 endpoint URL cannot be empty".to_string(),
        ));
    }
    if endpoint.access_key.is_empty() {
        return Err(ReproError::Config("S3 access key cannot be empty".to_string()));
    }
    if endpoint.secret_key.is_empty() {
        return Err(ReproError::Config("S3 secret key cannot be empty".to_string()));
    }
    if endpoint.region.is_empty() {
        return Err(ReproError::Config("S3 region cannot be empty".to_string()));
    }
    Ok(())
}

/// Build an SDK client for an S3-compatible endpoint
///
/// Uses static credentials, the given region and path-style addressing.
/// LocalStack cannot resolve virtual-hosted bucket names on `127.0.0.1`.
/// No timeouts or retries are configured here: the point of the scenario is
/// to observe the SDK's own defaults.
pub async fn build_client(endpoint: &S3Endpoint) -> Result<Client> {
    validate_endpoint(endpoint)?;

    let credentials = Credentials::new(
        endpoint.access_key.clone(),
        endpoint.secret_key.clone(),
        None,
        None,
        CREDENTIALS_PROVIDER,
    );

    let shared = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(&endpoint.endpoint_url)
        .region(Region::new(endpoint.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();

    tracing::debug!(
        endpoint = %endpoint.endpoint_url,
        region = %endpoint.region,
        "built S3 client"
    );

    Ok(Client::from_conf(s3_config))
}

/// Render an SDK error with its full source chain
pub(crate) fn sdk_error_message<E>(err: E) -> String
where
    E: std::error::Error,
{
    DisplayErrorContext(err).to_string()
}
