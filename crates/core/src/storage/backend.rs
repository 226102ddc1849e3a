//! Storage backends.

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};
use tracing::debug;

use super::connection::ConnectionString;
use super::error::StorageError;

/// Handle to one blob container.
///
/// Built once per process and shared behind an `Arc` by every request.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Base URL of the container, without a trailing slash.
    fn container_url(&self) -> &str;

    /// Write `data` under `name`, replacing any existing blob of that name.
    async fn write(&self, name: &str, data: Bytes) -> Result<(), StorageError>;
}

/// Public URL of `name` inside a container.
///
/// Plain concatenation: the name is neither escaped nor normalized.
#[must_use]
pub fn object_url(container_url: &str, name: &str) -> String {
    format!("{container_url}/{name}")
}

/// [`BlobBackend`] on top of an OpenDAL operator.
pub struct OpendalBackend {
    operator: Operator,
    container_url: String,
}

impl OpendalBackend {
    /// Azure Blob Storage container reached through a connection string.
    ///
    /// The endpoint handed to OpenDAL is the one the container URL is built
    /// from, so reported URLs always address the written objects.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the connection string is malformed or
    /// OpenDAL rejects it.
    pub fn azure(connection_string: &str, container: &str) -> Result<Self, StorageError> {
        let parsed: ConnectionString = connection_string.parse()?;
        let endpoint = parsed.blob_endpoint()?;

        let mut builder = services::Azblob::default()
            .endpoint(&endpoint)
            .container(container);
        if let Some(account) = parsed.account_name() {
            builder = builder.account_name(account);
        }
        if let Some(key) = parsed.account_key() {
            builder = builder.account_key(key);
        }
        if let Some(sas) = parsed.sas_token() {
            builder = builder.sas_token(sas);
        }

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();
        let container_url = format!("{endpoint}/{container}");

        debug!(container_url = %container_url, "Azure blob client created");
        Ok(Self {
            operator,
            container_url,
        })
    }

    /// In-process container, for local runs and tests.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the operator cannot be built.
    pub fn memory(container_url: impl Into<String>) -> Result<Self, StorageError> {
        let operator = Operator::new(services::Memory::default())
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        let mut container_url = container_url.into();
        while container_url.ends_with('/') {
            container_url.pop();
        }

        Ok(Self {
            operator,
            container_url,
        })
    }

    /// Underlying operator.
    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }
}

#[async_trait]
impl BlobBackend for OpendalBackend {
    fn container_url(&self) -> &str {
        &self.container_url
    }

    async fn write(&self, name: &str, data: Bytes) -> Result<(), StorageError> {
        self.operator.write(name, data).await?;
        Ok(())
    }
}
