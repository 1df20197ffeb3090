//! Fixture preparation: a zero-filled payload on disk, uploaded as one object.
//!
//! The payload's contents are irrelevant to the scenario, only its length
//! matters. It is written into a caller-owned temp dir so cleanup follows
//! the caller's `TempDir` guard.

use std::path::{Path, PathBuf};

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::ScenarioConfig;
use crate::constants::{PAYLOAD_FILE_NAME, S3_DEFAULT_REGION};
use crate::error::{ReproError, Result};
use crate::s3::sdk_error_message;

/// An object known to exist in the backend with a known length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}

/// Write exactly `size` zero bytes to `dir/testFile.txt`, truncating any previous file
pub async fn write_payload(dir: &Path, size: u64) -> Result<PathBuf> {
    let path = dir.join(PAYLOAD_FILE_NAME);
    let mut file = tokio::fs::File::create(&path).await?;

    let mut zeros = tokio::io::repeat(0).take(size);
    let written = tokio::io::copy(&mut zeros, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;

    tracing::debug!(path = %path.display(), bytes = written, "wrote local payload");
    Ok(path)
}

/// Create `bucket` unless it already exists
pub async fn ensure_bucket(client: &Client, bucket: &str) -> Result<()> {
    if client.head_bucket().bucket(bucket).send().await.is_ok() {
        tracing::debug!(bucket, "bucket already exists");
        return Ok(());
    }

    let mut request = client.create_bucket().bucket(bucket);

    // us-east-1 rejects an explicit location constraint, every other region needs one.
    if let Some(region) = client.config().region().map(|r| r.as_ref().to_string()) {
        if region != S3_DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }
    }

    match request.send().await {
        Ok(_) => {
            tracing::info!(bucket, "created bucket");
            Ok(())
        }
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_bucket_already_owned_by_you()) =>
        {
            tracing::debug!(bucket, "bucket created concurrently, already owned");
            Ok(())
        }
        Err(err) => Err(ReproError::CreateBucket {
            bucket: bucket.to_string(),
            message: sdk_error_message(err),
        }),
    }
}

/// Upload the file at `path` as `s3://bucket/key` and confirm its stored length
pub async fn upload_payload(
    client: &Client,
    bucket: &str,
    key: &str,
    path: &Path,
) -> Result<UploadedObject> {
    let size = tokio::fs::metadata(path).await?.len();

    let upload_error = |message: String| ReproError::Upload {
        bucket: bucket.to_string(),
        key: key.to_string(),
        message,
    };

    let body = ByteStream::from_path(path)
        .await
        .map_err(|e| upload_error(sdk_error_message(e)))?;

    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_length(size as i64)
        .body(body)
        .send()
        .await
        .map_err(|e| upload_error(sdk_error_message(e)))?;

    let head = client
        .head_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| upload_error(sdk_error_message(e)))?;

    let stored = head.content_length().unwrap_or(-1);
    if stored != size as i64 {
        return Err(ReproError::FixtureSizeMismatch {
            expected: size,
            actual: stored,
        });
    }

    tracing::info!(bucket, key, bytes = size, "uploaded payload");
    Ok(UploadedObject {
        bucket: bucket.to_string(),
        key: key.to_string(),
        size,
    })
}

/// Write the payload into `dir`, create the bucket and upload the object
///
/// Fails fast on the first error; nothing is retried.
pub async fn prepare_fixture(
    client: &Client,
    config: &ScenarioConfig,
    dir: &Path,
) -> Result<UploadedObject> {
    config.validate()?;

    let path = write_payload(dir, config.payload_size).await?;
    ensure_bucket(client, &config.bucket).await?;
    upload_payload(client, &config.bucket, &config.key, &path).await
}
