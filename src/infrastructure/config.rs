//! # Configuration
//!
//! Layered configuration for both binaries.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults (the `Default` impls below)
//! 2. `config/default.toml`, if present
//! 3. the file named by `VEHICLES_CONFIG` (or `PRICING_CONFIG`), if set
//! 4. environment variables such as `VEHICLES__PRICING__TIMEOUT_MS=1500`
//!
//! A `.env` file is loaded into the process environment first.
//!
//! # Examples
//!
//! ```ignore
//! use vehicle_catalog::infrastructure::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

use crate::application::services::EnrichmentConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Directory-relative path of the optional base configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is not acceptable.
    #[error("invalid configuration for {field}: {message}")]
    Invalid {
        /// Dotted key of the offending value.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }

    /// Returns true if a value failed validation.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Externally visible base URL used in hypermedia links.
    ///
    /// Falls back to `http://{host}:{port}` when unset.
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    fn with_port(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            public_base_url: None,
        }
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL for links, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_port(8080)
    }
}

/// Settings for one downstream lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownstreamConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_client_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum concurrent requests to this service.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_client_timeout_ms() -> u64 {
    2000
}

fn default_max_in_flight() -> usize {
    32
}

impl DownstreamConfig {
    fn for_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_ms: default_client_timeout_ms(),
            max_in_flight: default_max_in_flight(),
        }
    }

    fn validate(&self, url_field: &'static str, timeout_field: &'static str) -> ConfigResult<()> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid(url_field, e.to_string()))?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid(timeout_field, "must be greater than zero"));
        }
        Ok(())
    }
}

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Pool size for PostgreSQL.
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
        }
    }
}

/// Logging settings. `RUST_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Installs the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Logging` if the filter is malformed or a
    /// subscriber is already installed.
    pub fn init(&self) -> ConfigResult<()> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.filter)
                .map_err(|e| ConfigError::Logging(e.to_string()))?,
        };

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

/// Configuration of the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Pricing service client.
    pub pricing: DownstreamConfig,
    /// Maps service client.
    pub maps: DownstreamConfig,
    /// Enrichment policy.
    pub enrichment: EnrichmentConfig,
    /// Storage backend.
    pub storage: StorageConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pricing: DownstreamConfig::for_url("http://localhost:8082"),
            maps: DownstreamConfig::for_url("http://localhost:9191"),
            enrichment: EnrichmentConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Environment prefix for overrides.
    pub const ENV_PREFIX: &'static str = "VEHICLES";
    /// Environment variable naming an extra configuration file.
    pub const FILE_ENV: &'static str = "VEHICLES_CONFIG";

    /// Loads and validates configuration from all layered sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or validation fails.
    pub fn load() -> ConfigResult<Self> {
        let config: Self = load_layered(Self::ENV_PREFIX, Self::FILE_ENV)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a TOML document over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or validation fails.
    pub fn from_toml(toml: &str) -> ConfigResult<Self> {
        let sources = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        let config: Self = build(sources)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.enrichment.lookup_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "enrichment.lookup_timeout_ms",
                "must be greater than zero",
            ));
        }
        if self.enrichment.list_concurrency == 0 {
            return Err(ConfigError::invalid(
                "enrichment.list_concurrency",
                "must be at least 1",
            ));
        }
        self.pricing
            .validate("pricing.base_url", "pricing.timeout_ms")?;
        self.maps.validate("maps.base_url", "maps.timeout_ms")?;

        for (field, client) in [
            ("pricing.timeout_ms", &self.pricing),
            ("maps.timeout_ms", &self.maps),
        ] {
            if client.timeout_ms >= self.enrichment.lookup_timeout_ms {
                return Err(ConfigError::invalid(
                    field,
                    format!(
                        "{}ms must be below enrichment.lookup_timeout_ms ({}ms)",
                        client.timeout_ms, self.enrichment.lookup_timeout_ms
                    ),
                ));
            }
        }

        if let Some(url) = &self.server.public_base_url {
            reqwest::Url::parse(url)
                .map_err(|e| ConfigError::invalid("server.public_base_url", e.to_string()))?;
        }
        Ok(())
    }
}

/// Configuration of the pricing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingServiceConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Seed for the generated price table; random when unset.
    pub seed: Option<u64>,
    /// Logging.
    pub logging: LoggingConfig,
}

impl Default for PricingServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::with_port(8082),
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl PricingServiceConfig {
    /// Environment prefix for overrides.
    pub const ENV_PREFIX: &'static str = "PRICING";
    /// Environment variable naming an extra configuration file.
    pub const FILE_ENV: &'static str = "PRICING_CONFIG";

    /// Loads configuration from all layered sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed.
    pub fn load() -> ConfigResult<Self> {
        load_layered(Self::ENV_PREFIX, Self::FILE_ENV)
    }
}

fn load_layered<T>(prefix: &str, file_env: &str) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    // Missing .env is the normal case outside development.
    let _ = dotenvy::dotenv();

    let mut builder =
        Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
    if let Ok(path) = std::env::var(file_env) {
        builder = builder.add_source(File::with_name(&path).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(prefix)
            .separator("__")
            .try_parsing(true),
    );
    build(builder)
}

// Defaults go in as the lowest layer so that a partial section such as a
// lone `VEHICLES__PRICING__TIMEOUT_MS` keeps the remaining keys.
fn build<T>(sources: ConfigBuilder<DefaultState>) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let defaults = Config::try_from(&T::default())?;
    let layered = Config::builder()
        .add_source(defaults)
        .add_source(sources.build()?)
        .build()?;
    Ok(layered.try_deserialize()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enrichment.lookup_timeout_ms, 3000);
        assert_eq!(config.pricing.timeout_ms, 2000);
        assert_eq!(config.enrichment.list_concurrency, 8);
        assert_eq!(config.pricing.max_in_flight, 32);
        assert!(config.storage.database_url.is_none());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000
            public_base_url = "https://cars.example.com/"

            [pricing]
            base_url = "http://pricing:8082"
            timeout_ms = 500

            [maps]
            timeout_ms = 600

            [enrichment]
            lookup_timeout_ms = 800
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.base_url(), "https://cars.example.com");
        assert_eq!(config.pricing.base_url, "http://pricing:8082");
        assert_eq!(config.pricing.timeout_ms, 500);
        assert_eq!(config.pricing.max_in_flight, 32);
        assert_eq!(config.maps.timeout_ms, 600);
        assert_eq!(config.maps.base_url, "http://localhost:9191");
        assert_eq!(config.enrichment.lookup_timeout_ms, 800);
        assert_eq!(config.enrichment.list_concurrency, 8);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml("[maps]\ntimeout_ms = 1500\n").unwrap();
        assert_eq!(config.maps.timeout_ms, 1500);
        assert_eq!(config.maps.base_url, "http://localhost:9191");
    }

    #[test]
    fn client_timeout_must_be_below_lookup_budget() {
        let err = AppConfig::from_toml(
            r#"
            [enrichment]
            lookup_timeout_ms = 1000
            "#,
        )
        .unwrap_err();
        assert!(err.is_invalid());
        assert!(err.to_string().contains("pricing.timeout_ms"));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = AppConfig::from_toml("[enrichment]\nlist_concurrency = 0\n").unwrap_err();
        assert!(err.to_string().contains("list_concurrency"));
    }

    #[test]
    fn bad_url_is_rejected() {
        let err = AppConfig::from_toml("[maps]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(err.is_invalid());
        assert!(err.to_string().contains("maps.base_url"));
    }

    #[test]
    fn malformed_document_is_load_error() {
        let err = AppConfig::from_toml("[server]\nport = \"eighty\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn server_base_url_falls_back_to_bind_address() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "0.0.0.0:8080");
        assert_eq!(server.base_url(), "http://0.0.0.0:8080");
    }

    #[test]
    fn pricing_service_defaults() {
        let config = PricingServiceConfig::default();
        assert_eq!(config.server.port, 8082);
        assert!(config.seed.is_none());
    }
}
