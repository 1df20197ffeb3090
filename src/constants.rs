// Constants module - fixed values of the stalled download scenario
//
// The bucket, key, payload size and stall length are the literals the
// reproduction was first reported with. Configuration defaults to them.

// =============================================================================
// Scenario defaults
// =============================================================================

/// Bucket the payload is uploaded to
pub const BUCKET_NAME: &str = "test-bucket";

/// Object key the payload is uploaded under
pub const OBJECT_KEY: &str = "test-file";

/// Payload size in bytes (10 MB, decimal)
pub const PAYLOAD_SIZE_BYTES: u64 = 10_000_000;

/// How long the reader sits on the open stream before the first read (90 seconds)
pub const STALL_DURATION_MS: u64 = 90_000;

/// File name of the locally generated payload inside the scoped temp dir
pub const PAYLOAD_FILE_NAME: &str = "testFile.txt";

// =============================================================================
// LocalStack defaults
// =============================================================================

/// LocalStack image tag the defect was observed on
pub const LOCALSTACK_IMAGE_TAG: &str = "3.4.0";

/// LocalStack edge port (all services, including S3)
pub const LOCALSTACK_EDGE_PORT: u16 = 4566;

/// Access key LocalStack accepts by default
pub const LOCALSTACK_ACCESS_KEY: &str = "test";

/// Secret key LocalStack accepts by default
pub const LOCALSTACK_SECRET_KEY: &str = "test";

/// Region LocalStack reports by default
pub const LOCALSTACK_REGION: &str = "us-east-1";

// =============================================================================
// S3 protocol rules
// =============================================================================

/// Region where CreateBucket must be sent without a location constraint
pub const S3_DEFAULT_REGION: &str = "us-east-1";

/// Minimum bucket name length accepted by S3
pub const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length accepted by S3
pub const MAX_BUCKET_NAME_LEN: usize = 63;
