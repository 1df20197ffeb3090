//! Connection details for an S3-compatible backend.
//!
//! The values come from whoever provisioned the backend (the LocalStack
//! harness in the integration tests). Nothing here reads the environment.

use serde::{Deserialize, Serialize};

use crate::constants::{LOCALSTACK_ACCESS_KEY, LOCALSTACK_REGION, LOCALSTACK_SECRET_KEY};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Endpoint {
    /// Base URL, e.g. `http://127.0.0.1:49153`
    pub endpoint_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl S3Endpoint {
    pub fn new(
        endpoint_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
        }
    }

    /// Endpoint on the given host port with LocalStack's default credentials
    pub fn localstack(host_port: u16) -> Self {
        Self::new(
            format!("http://127.0.0.1:{}", host_port),
            LOCALSTACK_ACCESS_KEY,
            LOCALSTACK_SECRET_KEY,
            LOCALSTACK_REGION,
        )
    }
}

// Keep the secret out of logs and assertion output.
impl std::fmt::Debug for S3Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Endpoint")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}
