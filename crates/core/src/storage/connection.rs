//! Azure storage connection string parsing.
//!
//! The blob endpoint and credentials are resolved here and handed to OpenDAL
//! explicitly, so the address objects are written to and the URL reported
//! back come from the same values.

use std::fmt;
use std::str::FromStr;

use super::error::StorageError;

/// Proxy URI of the local storage emulator (Azurite).
pub const DEVELOPMENT_STORAGE_PROXY_URI: &str = "http://127.0.0.1:10000";

/// Account name of the local storage emulator.
pub const DEVELOPMENT_ACCOUNT_NAME: &str = "devstoreaccount1";

/// Well-known, public account key of the local storage emulator.
const DEVELOPMENT_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Parsed `Key=Value;Key=Value` connection string.
#[derive(Clone)]
pub struct ConnectionString {
    pairs: Vec<(String, String)>,
}

impl ConnectionString {
    /// Look up a value by key, ignoring key case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Whether the string points at the local storage emulator.
    #[must_use]
    pub fn is_development_storage(&self) -> bool {
        self.get("UseDevelopmentStorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Storage account name; the emulator falls back to its fixed account.
    #[must_use]
    pub fn account_name(&self) -> Option<&str> {
        match self.get("AccountName") {
            Some(account) => Some(account),
            None if self.is_development_storage() => Some(DEVELOPMENT_ACCOUNT_NAME),
            None => None,
        }
    }

    /// Shared key; the emulator falls back to its well-known key.
    #[must_use]
    pub fn account_key(&self) -> Option<&str> {
        match self.get("AccountKey") {
            Some(key) => Some(key),
            None if self.is_development_storage() => Some(DEVELOPMENT_ACCOUNT_KEY),
            None => None,
        }
    }

    /// Shared access signature, if the string carries one.
    #[must_use]
    pub fn sas_token(&self) -> Option<&str> {
        self.get("SharedAccessSignature")
    }

    /// Base URL of the blob service.
    ///
    /// The emulator resolves to `{DevelopmentStorageProxyUri}/{AccountName}`,
    /// then an explicit `BlobEndpoint` wins, then the URL assembled from
    /// protocol, account name and endpoint suffix.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no endpoint can be derived.
    pub fn blob_endpoint(&self) -> Result<String, StorageError> {
        if self.is_development_storage() {
            let proxy = self
                .get("DevelopmentStorageProxyUri")
                .unwrap_or(DEVELOPMENT_STORAGE_PROXY_URI)
                .trim_end_matches('/');
            let account = self.account_name().unwrap_or(DEVELOPMENT_ACCOUNT_NAME);
            return Ok(format!("{proxy}/{account}"));
        }
        if let Some(endpoint) = self.get("BlobEndpoint") {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }

        let account = self.account_name().ok_or_else(|| {
            StorageError::configuration("connection string has no AccountName or BlobEndpoint")
        })?;
        let protocol = self.get("DefaultEndpointsProtocol").unwrap_or(DEFAULT_PROTOCOL);
        let suffix = self.get("EndpointSuffix").unwrap_or(DEFAULT_ENDPOINT_SUFFIX);

        Ok(format!("{protocol}://{account}.blob.{suffix}"))
    }

    /// URL of `container` on this account.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no endpoint can be derived.
    pub fn container_url(&self, container: &str) -> Result<String, StorageError> {
        Ok(format!("{}/{container}", self.blob_endpoint()?))
    }
}

impl FromStr for ConnectionString {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        for segment in s.split(';').map(str::trim).filter(|seg| !seg.is_empty()) {
            // Values such as AccountKey are base64 and may contain '='.
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                StorageError::configuration(format!(
                    "malformed connection string segment without '=' near `{}`",
                    key_hint(segment)
                ))
            })?;
            pairs.push((key.trim().to_string(), value.trim().to_string()));
        }

        if pairs.is_empty() {
            return Err(StorageError::configuration("connection string is empty"));
        }

        Ok(Self { pairs })
    }
}

/// First few characters of a segment, for error messages that must not echo secrets.
fn key_hint(segment: &str) -> String {
    segment.chars().take(8).collect()
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("keys", &self.pairs.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}
