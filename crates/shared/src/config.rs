//! Application configuration management.

use std::fmt;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Container used when `AZURE_STORAGE_CONTAINER_NAME` is not set.
pub const DEFAULT_CONTAINER_NAME: &str = "uploads";

/// Environment variable holding the storage connection string.
pub const CONNECTION_STRING_VAR: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Environment variable holding the target container name.
pub const CONTAINER_NAME_VAR: &str = "AZURE_STORAGE_CONTAINER_NAME";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Blob storage settings.
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Loads server and storage configuration and validates it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if anything cannot be loaded or a
    /// required storage value is empty.
    pub fn load() -> AppResult<Self> {
        let server = ServerConfig::load()?;
        let storage = StorageSettings::from_env()?;
        storage.validate()?;
        Ok(Self { server, storage })
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request body cap for uploads. `None` leaves uploads unbounded.
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: None,
        }
    }
}

#[derive(Deserialize)]
struct Layered {
    #[serde(default)]
    server: ServerConfig,
}

impl ServerConfig {
    /// Loads server configuration from config files and `BLOBRELAY__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let layered: Layered = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("BLOBRELAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(layered.server)
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Blob storage settings.
///
/// Immutable once validated; handed by value to the storage wrapper.
#[derive(Clone, Deserialize)]
pub struct StorageSettings {
    /// Opaque credential used to reach the storage account.
    #[serde(default)]
    pub connection_string: String,
    /// Container every upload is written to.
    #[serde(default = "default_container_name")]
    pub container_name: String,
}

fn default_container_name() -> String {
    DEFAULT_CONTAINER_NAME.to_string()
}

impl StorageSettings {
    /// Create settings from explicit values.
    #[must_use]
    pub fn new(connection_string: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            container_name: container_name.into(),
        }
    }

    /// Reads `AZURE_STORAGE_CONNECTION_STRING` and `AZURE_STORAGE_CONTAINER_NAME`.
    ///
    /// An unset connection string becomes empty; an unset container name
    /// falls back to [`DEFAULT_CONTAINER_NAME`]. Call [`Self::validate`]
    /// before use.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be deserialized.
    pub fn from_env() -> AppResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("AZURE_STORAGE").prefix_separator("_"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Checks that both values are present.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` naming the first empty variable.
    pub fn validate(&self) -> AppResult<()> {
        if self.connection_string.is_empty() {
            return Err(AppError::configuration(format!(
                "{CONNECTION_STRING_VAR} is required in environment"
            )));
        }
        if self.container_name.is_empty() {
            return Err(AppError::configuration(format!(
                "{CONTAINER_NAME_VAR} is required in environment"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("connection_string", &"<redacted>")
            .field("container_name", &self.container_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const CONN: &str =
        "DefaultEndpointsProtocol=https;AccountName=relay;AccountKey=a2V5;EndpointSuffix=core.windows.net";

    #[test]
    fn test_from_env_reads_both_values() {
        temp_env::with_vars(
            [
                (CONNECTION_STRING_VAR, Some(CONN)),
                (CONTAINER_NAME_VAR, Some("invoices")),
            ],
            || {
                let settings = StorageSettings::from_env().expect("should load");
                assert_eq!(settings.connection_string, CONN);
                assert_eq!(settings.container_name, "invoices");
            },
        );
    }

    #[test]
    fn test_from_env_defaults_container_name() {
        temp_env::with_vars(
            [
                (CONNECTION_STRING_VAR, Some(CONN)),
                (CONTAINER_NAME_VAR, None),
            ],
            || {
                let settings = StorageSettings::from_env().expect("should load");
                assert_eq!(settings.container_name, DEFAULT_CONTAINER_NAME);
            },
        );
    }

    #[test]
    fn test_missing_connection_string_fails_validation() {
        temp_env::with_vars(
            [
                (CONNECTION_STRING_VAR, None::<&str>),
                (CONTAINER_NAME_VAR, None),
            ],
            || {
                let settings = StorageSettings::from_env().expect("should load");
                assert!(settings.connection_string.is_empty());
                let err = settings.validate().unwrap_err();
                assert!(err.to_string().contains(CONNECTION_STRING_VAR));
            },
        );
    }

    #[test]
    fn test_app_config_load_is_fatal_without_credential() {
        temp_env::with_vars(
            [
                (CONNECTION_STRING_VAR, None::<&str>),
                (CONTAINER_NAME_VAR, None),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(matches!(err, AppError::Configuration(_)));
            },
        );
    }

    #[test]
    fn test_server_config_from_env() {
        temp_env::with_vars(
            [
                ("BLOBRELAY__SERVER__PORT", Some("9090")),
                ("BLOBRELAY__SERVER__MAX_UPLOAD_BYTES", Some("1048576")),
            ],
            || {
                let server = ServerConfig::load().expect("should load");
                assert_eq!(server.port, 9090);
                assert_eq!(server.max_upload_bytes, Some(1_048_576));
                assert_eq!(server.bind_addr(), "0.0.0.0:9090");
            },
        );
    }

    #[test]
    fn test_server_config_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_addr(), "0.0.0.0:8080");
        assert!(server.max_upload_bytes.is_none());
    }

    #[rstest]
    #[case("", "uploads", CONNECTION_STRING_VAR)]
    #[case(CONN, "", CONTAINER_NAME_VAR)]
    #[case("", "", CONNECTION_STRING_VAR)]
    fn test_validate_names_first_empty_value(
        #[case] conn: &str,
        #[case] container: &str,
        #[case] expected: &str,
    ) {
        let err = StorageSettings::new(conn, container).validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains(expected));
    }

    #[test]
    fn test_debug_redacts_connection_string() {
        let rendered = format!("{:?}", StorageSettings::new(CONN, "uploads"));
        assert!(!rendered.contains("a2V5"));
        assert!(rendered.contains("uploads"));
    }

    proptest! {
        #[test]
        fn prop_validate_accepts_non_empty_pairs(
            conn in ".{1,64}",
            container in "[a-z0-9-]{1,63}",
        ) {
            prop_assert!(StorageSettings::new(conn, container).validate().is_ok());
        }

        #[test]
        fn prop_validate_rejects_any_empty_value(
            value in ".{0,32}",
            empty_first in any::<bool>(),
        ) {
            let settings = if empty_first {
                StorageSettings::new("", value)
            } else {
                StorageSettings::new(value, "")
            };
            prop_assert!(settings.validate().is_err());
        }
    }
}
