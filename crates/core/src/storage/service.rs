//! Storage client wrapper.

use std::path::Path;
use std::sync::Arc;

use blobrelay_shared::StorageSettings;
use bytes::Bytes;
use tracing::debug;

use super::backend::{BlobBackend, OpendalBackend, object_url};
use super::error::StorageError;

/// Uploads blobs into the configured container.
///
/// Owns the one client handle for the process. The handle is built up front
/// in [`BlobStorage::connect`], so concurrent requests never race to create it.
pub struct BlobStorage {
    settings: StorageSettings,
    client: Arc<dyn BlobBackend>,
}

impl BlobStorage {
    /// Build the Azure client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot produce a client.
    pub fn connect(settings: StorageSettings) -> Result<Self, StorageError> {
        let backend = OpendalBackend::azure(&settings.connection_string, &settings.container_name)?;
        Ok(Self::with_backend(settings, Arc::new(backend)))
    }

    /// Wrap an already-built backend.
    #[must_use]
    pub fn with_backend(settings: StorageSettings, client: Arc<dyn BlobBackend>) -> Self {
        Self { settings, client }
    }

    /// The shared client handle. Every call returns the same instance.
    #[must_use]
    pub fn client(&self) -> Arc<dyn BlobBackend> {
        Arc::clone(&self.client)
    }

    /// Name of the target container.
    #[must_use]
    pub fn container_name(&self) -> &str {
        &self.settings.container_name
    }

    /// Base URL of the target container.
    #[must_use]
    pub fn container_url(&self) -> &str {
        self.client.container_url()
    }

    /// Write `data` as `object_name`, replacing any existing blob.
    ///
    /// Returns `{container_url}/{object_name}`. The name is used verbatim.
    ///
    /// # Errors
    ///
    /// Returns the backend's error unchanged; nothing is retried.
    pub async fn upload_buffer(
        &self,
        data: impl Into<Bytes>,
        object_name: &str,
    ) -> Result<String, StorageError> {
        let data = data.into();
        let client = self.client();
        let size = data.len();

        client.write(object_name, data).await?;

        debug!(
            container = %self.settings.container_name,
            object_name,
            size,
            "Blob written"
        );
        Ok(object_url(client.container_url(), object_name))
    }

    /// Read the file at `path` fully and upload it as `object_name`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be read, otherwise
    /// whatever [`Self::upload_buffer`] returns.
    pub async fn upload_local_file(
        &self,
        path: impl AsRef<Path>,
        object_name: &str,
    ) -> Result<String, StorageError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.upload_buffer(data, object_name).await
    }
}
