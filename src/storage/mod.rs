//! Pre-signed upload URL issuer.
//!
//! Produces temporary S3 PUT URLs so clients upload binary assets directly to
//! object storage. Signing happens locally with the configured credentials;
//! the backend never touches the uploaded object afterwards.

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::errors::AppError;

/// Lifetime of an issued upload URL.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(3600);

/// Issues pre-signed PUT URLs against the configured bucket.
#[derive(Clone)]
pub struct UploadUrlIssuer {
    client: Client,
    bucket: String,
}

impl UploadUrlIssuer {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "study-resources-config",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }

    /// Issue a one-hour upload URL for a file owned by a user. Objects are
    /// keyed `{userId}/{filename}`.
    pub async fn upload_url(&self, filename: &str, user_id: i64) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL).map_err(|e| {
            tracing::error!("Invalid presigning configuration: {:?}", e);
            AppError::Internal("Failed to configure upload URL signing".to_string())
        })?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(format!("{}/{}", user_id, filename))
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!("Failed to presign upload URL: {:?}", e);
                AppError::Internal("Failed to create upload URL".to_string())
            })?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StorageConfig {
        StorageConfig {
            bucket: "study-resources-test".to_string(),
            region: "eu-central-1".to_string(),
            endpoint: None,
            access_key: "test-access-key".to_string(),
            secret_key: "test-secret-key".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_url_contains_key_and_expiry() {
        let issuer = UploadUrlIssuer::new(&test_config());
        let url = issuer.upload_url("notes.pdf", 7).await.unwrap();

        assert!(url.contains("study-resources-test"));
        assert!(url.contains("7/notes.pdf"));
        assert!(url.contains("X-Amz-Expires=3600"));
    }
}
