//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bootstrap
//! helper. All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a bootstrap session.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Listener configuration (bind address, backlog).
    pub listener: ListenerConfig,

    /// Input and output file locations.
    pub files: FilesConfig,

    /// Optional read bounds. Everything is unbounded by default.
    pub limits: LimitsConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:12345").
    pub bind_address: String,

    /// Pending connection queue length passed to `listen`.
    pub backlog: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:12345".to_string(),
            backlog: 3,
        }
    }
}

/// Locations of the CSR input and the two decoded outputs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FilesConfig {
    /// Text file holding the CSR served on the GET phase.
    pub csr_path: PathBuf,

    /// Destination for the decoded `cert` field.
    pub cert_path: PathBuf,

    /// Destination for the decoded `reference` field.
    pub reference_path: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            csr_path: PathBuf::from("csr.txt"),
            cert_path: PathBuf::from("fullchain.pem"),
            reference_path: PathBuf::from("reference.json"),
        }
    }
}

/// Read limits.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-read timeout in seconds. A timed out read ends like a closed peer.
    pub read_timeout_secs: Option<u64>,

    /// Stop accumulating the request head past this many bytes.
    pub max_header_bytes: Option<usize>,

    /// Reject POST bodies declaring more than this many bytes.
    pub max_body_bytes: Option<usize>,
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,

    /// Human readable or JSON lines.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "csr_bootstrap=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bootstrap_layout() {
        let config = BootstrapConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:12345");
        assert_eq!(config.listener.backlog, 3);
        assert_eq!(config.files.csr_path, PathBuf::from("csr.txt"));
        assert_eq!(config.files.cert_path, PathBuf::from("fullchain.pem"));
        assert_eq!(config.files.reference_path, PathBuf::from("reference.json"));
        assert!(config.limits.read_timeout_secs.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.backlog, 3);
        assert_eq!(config.files, FilesConfig::default());
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "csr_bootstrap=info");
    }
}
