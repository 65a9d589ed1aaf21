use crate::adapters::csv_store::load_profiles_from_bytes;
use crate::adapters::memory::InMemoryProfileProvider;
use crate::utils::error::{EstimateError, Result};
use aws_sdk_s3::Client as S3Client;

/// Reference CSV stored in S3, read once when the Lambda starts.
#[derive(Debug, Clone)]
pub struct S3ProfileSource {
    client: S3Client,
    bucket: String,
    key: String,
}

impl S3ProfileSource {
    pub fn new(client: S3Client, bucket: String, key: String) -> Self {
        Self {
            client,
            bucket,
            key,
        }
    }

    pub async fn load(&self) -> Result<InMemoryProfileProvider> {
        tracing::info!("📥 Loading reference data from s3://{}/{}", self.bucket, self.key);

        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| EstimateError::ReferenceDataError {
                message: format!("Failed to read from S3: {}", e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| EstimateError::ReferenceDataError {
                message: format!("Failed to collect S3 data: {}", e),
            })?;

        let provider = load_profiles_from_bytes(&data.into_bytes())?;
        tracing::info!("✅ Loaded {} neighborhood profiles", provider.len());
        Ok(provider)
    }
}
