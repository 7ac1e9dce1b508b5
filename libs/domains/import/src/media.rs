//! Image download and blob storage plumbing
//!
//! Imported recipes reference images on the recipe API's CDN. The importer
//! downloads each image and re-hosts it in our own blob container so meal
//! documents never point at third-party URLs. Both steps are best-effort;
//! a failed image never fails the recipe.

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_required};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ImportError, ImportResult};

/// Per-call timeout for image downloads
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Trait for fetching image bytes from a URL
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ImportResult<Vec<u8>>;
}

/// Plain HTTP implementation of ImageFetcher
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> ImportResult<Vec<u8>> {
        let response = self.client.get(url).timeout(FETCH_TIMEOUT).send().await?;

        if !response.status().is_success() {
            return Err(ImportError::Api(format!(
                "Image download returned status: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        debug!(url = url, size = bytes.len(), "Image downloaded");
        Ok(bytes.to_vec())
    }
}

/// Trait for storing uploaded media and returning its public URL
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload bytes under the given blob name; returns the public URL
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> ImportResult<String>;
}

/// Blob storage configuration (Azure Blob REST with SAS-token auth)
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Storage account endpoint, e.g. "https://myaccount.blob.core.windows.net"
    pub account_url: String,
    /// Container holding meal images
    pub container: String,
    /// SAS token granting create/write on the container
    pub sas_token: String,
}

/// Load BlobConfig from environment variables
///
/// Environment variables (all required for the config to load; the importer
/// skips images entirely when any is missing):
/// - `BLOB_ACCOUNT_URL`
/// - `BLOB_CONTAINER`
/// - `BLOB_SAS_TOKEN`
impl FromEnv for BlobConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            account_url: env_required("BLOB_ACCOUNT_URL")?
                .trim_end_matches('/')
                .to_string(),
            container: env_required("BLOB_CONTAINER")?,
            sas_token: env_required("BLOB_SAS_TOKEN")?
                .trim_start_matches('?')
                .to_string(),
        })
    }
}

/// Azure Blob implementation of MediaStore
///
/// Talks to the Blob REST API directly with SAS-token auth; no SDK needed
/// for put-blob and create-container.
pub struct AzureBlobStore {
    config: BlobConfig,
    client: Client,
}

impl AzureBlobStore {
    pub fn new(config: BlobConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create the container if it does not exist yet.
    ///
    /// Called once at startup; an existing container (409) is fine.
    pub async fn ensure_container(&self) -> ImportResult<()> {
        let url = format!(
            "{}/{}?restype=container&{}",
            self.config.account_url, self.config.container, self.config.sas_token
        );

        let response = self.client.put(&url).send().await?;
        let status = response.status();

        if status.is_success() || status == reqwest::StatusCode::CONFLICT {
            info!(container = %self.config.container, "Blob container ready");
            Ok(())
        } else {
            Err(ImportError::Storage(format!(
                "Container creation returned status: {}",
                status
            )))
        }
    }

    fn blob_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.account_url, self.config.container, name
        )
    }
}

#[async_trait]
impl MediaStore for AzureBlobStore {
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> ImportResult<String> {
        let url = format!("{}?{}", self.blob_url(name), self.config.sas_token);

        let response = self
            .client
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("Content-Type", content_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImportError::Storage(format!(
                "Blob upload returned status: {}",
                response.status()
            )));
        }

        debug!(blob = name, size = bytes.len(), "Image uploaded");
        // Public URL without the SAS token
        Ok(self.blob_url(name))
    }
}
