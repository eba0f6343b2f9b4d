// S3 storage backend

use super::{ObjectStore, StorageError};
use crate::config::StorageConfig;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client as S3Client;

/// [`ObjectStore`] backed by an S3-compatible bucket.
///
/// Uses static credentials and path-style addressing so it works with R2,
/// MinIO and LocalStack as well as AWS.
#[derive(Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    public_base_url: String,
    public_read: bool,
}

impl S3Storage {
    /// Build the client from storage configuration.
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "brandgate-config",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(aws_config::Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self::from_client(S3Client::from_conf(s3_config), config)
    }

    /// Wrap an existing client.
    pub fn from_client(client: S3Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket_name.clone(),
            public_base_url: config.custom_domain.trim_end_matches('/').to_string(),
            public_read: config.public_read,
        }
    }

    /// Public URL for an object key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn put(
        &self,
        data: Vec<u8>,
        key: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data));

        if self.public_read {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request.send().await.map_err(|e| StorageError::Put {
            key: key.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let url = self.public_url(key);
        tracing::info!(bucket = %self.bucket, url = %url, "Object stored");
        Ok(url)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::info!(bucket = %self.bucket, "Object deleted");
        Ok(())
    }

    fn resolve_key(&self, reference: &str) -> String {
        let prefix = format!("{}/", self.public_base_url);
        reference
            .strip_prefix(&prefix)
            .unwrap_or(reference)
            .to_string()
    }
}
