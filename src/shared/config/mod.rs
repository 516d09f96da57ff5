//! Application configuration module
//!
//! Provides the server configuration, its builder, and the parsing helpers
//! used by `backend::server::config` to layer a TOML file and environment
//! variables over the built-in defaults.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 9405;

/// Default upload cap (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// File extensions accepted by the file relay
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "zip",
    "rar",
];

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listening port; also used to build the direct LAN URL
    pub port: u16,
    /// Address the listener binds to
    pub bind_address: String,
    /// Note log backing file
    pub data_file: PathBuf,
    /// Templates document
    pub templates_file: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Largest accepted upload, in bytes
    pub max_upload_bytes: u64,
    /// Lower-case file extensions accepted by the relay
    pub allowed_extensions: Vec<String>,
    /// Outbound frames buffered per connection before it counts as failed
    pub connection_queue_capacity: usize,
    /// Timeout for the direct-address reachability probe
    pub probe_timeout_ms: u64,
    /// Public address dialed (without sending) to learn the outbound interface
    pub discovery_target: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            data_file: PathBuf::from("messages.json"),
            templates_file: PathBuf::from("templates_config.json"),
            static_dir: PathBuf::from("static"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            connection_queue_capacity: 64,
            probe_timeout_ms: 1500,
            discovery_target: "8.8.8.8:80".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override fields from `LANSHARE_*` variables supplied by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("LANSHARE_PORT") {
            self.port = parse_number("LANSHARE_PORT", &port)?;
        }
        if let Some(bind) = lookup("LANSHARE_BIND") {
            self.bind_address = bind;
        }
        if let Some(path) = lookup("LANSHARE_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("LANSHARE_TEMPLATES_FILE") {
            self.templates_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("LANSHARE_STATIC_DIR") {
            self.static_dir = PathBuf::from(path);
        }
        if let Some(mb) = lookup("LANSHARE_MAX_UPLOAD_MB") {
            let parsed: u64 = parse_number("LANSHARE_MAX_UPLOAD_MB", &mb)?;
            self.max_upload_bytes =
                parsed
                    .checked_mul(1024 * 1024)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        field: "LANSHARE_MAX_UPLOAD_MB",
                        message: format!("'{}' megabytes does not fit in a byte count", mb),
                    })?;
        }
        if let Some(ms) = lookup("LANSHARE_PROBE_TIMEOUT_MS") {
            self.probe_timeout_ms = parse_number("LANSHARE_PROBE_TIMEOUT_MS", &ms)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "bind_address",
                message: format!("'{}' is not an IP address", self.bind_address),
            });
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_upload_bytes",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.connection_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connection_queue_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::MissingValue("allowed_extensions"));
        }
        if self.discovery_target.trim().is_empty() {
            return Err(ConfigError::MissingValue("discovery_target"));
        }
        Ok(())
    }

    /// Whether `ext` (any case) is on the upload allow-list
    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == ext)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: var,
        message: format!("'{}' is not a valid number", value),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the bind address
    pub fn bind_address(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_address = addr.into();
        self
    }

    /// Set the note log file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the templates file
    pub fn templates_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.templates_file = path.into();
        self
    }

    /// Set the static directory
    pub fn static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.static_dir = path.into();
        self
    }

    /// Set the upload cap in bytes
    pub fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Set the per-connection outbound queue size
    pub fn connection_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.connection_queue_capacity = capacity;
        self
    }

    /// Set the probe timeout in milliseconds
    pub fn probe_timeout_ms(mut self, ms: u64) -> Self {
        self.config.probe_timeout_ms = ms;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
