//! Object storage configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STORAGE_REGION;

fn default_region() -> String {
    DEFAULT_STORAGE_REGION.to_string()
}

fn default_public_read() -> bool {
    true
}

/// Credentials and addressing for the S3-compatible bucket.
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    /// S3 API endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`
    pub endpoint: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Base URL that public object URLs are built from
    pub custom_domain: String,
    /// Upload objects with the `public-read` canned ACL (default: true)
    #[serde(default = "default_public_read")]
    pub public_read: bool,
}

// Keep credentials out of logs
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("custom_domain", &self.custom_domain)
            .field("public_read", &self.public_read)
            .finish()
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
            ("bucket_name", &self.bucket_name),
            ("endpoint", &self.endpoint),
            ("region", &self.region),
            ("custom_domain", &self.custom_domain),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("storage.{} cannot be empty", name));
            }
        }

        for (name, url) in [("endpoint", &self.endpoint), ("custom_domain", &self.custom_domain)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "storage.{} '{}' must start with http:// or https://",
                    name, url
                ));
            }
        }

        Ok(())
    }
}
