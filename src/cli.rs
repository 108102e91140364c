//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, BootstrapConfig, ConfigError, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "csr-bootstrap")]
#[command(about = "Serve a CSR once, then receive and store the issued certificate", long_about = None)]
pub struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:12345.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Listen backlog.
    #[arg(long)]
    pub backlog: Option<u32>,

    /// CSR file served on the GET exchange.
    #[arg(long)]
    pub csr: Option<PathBuf>,

    /// Where the decoded certificate is written.
    #[arg(long)]
    pub cert_out: Option<PathBuf>,

    /// Where the decoded reference document is written.
    #[arg(long)]
    pub reference_out: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Load the config file (if any), apply flag overrides, validate.
    pub fn resolve_config(&self) -> Result<BootstrapConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BootstrapConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(backlog) = self.backlog {
            config.listener.backlog = backlog;
        }
        if let Some(csr) = &self.csr {
            config.files.csr_path = csr.clone();
        }
        if let Some(cert_out) = &self.cert_out {
            config.files.cert_path = cert_out.clone();
        }
        if let Some(reference_out) = &self.reference_out {
            config.files.reference_path = reference_out.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_flags_yield_defaults() {
        let cli = Cli::try_parse_from(["csr-bootstrap"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap(), BootstrapConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:7000\"\nbacklog = 8").unwrap();

        let cli = Cli::try_parse_from([
            "csr-bootstrap",
            "--config",
            file.path().to_str().unwrap(),
            "--bind",
            "127.0.0.1:7001",
            "--cert-out",
            "/tmp/out/chain.pem",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:7001");
        assert_eq!(config.listener.backlog, 8);
        assert_eq!(config.files.cert_path, PathBuf::from("/tmp/out/chain.pem"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn overrides_are_validated() {
        let cli = Cli::try_parse_from([
            "csr-bootstrap",
            "--cert-out",
            "same.bin",
            "--reference-out",
            "same.bin",
        ])
        .unwrap();
        assert!(matches!(
            cli.resolve_config(),
            Err(ConfigError::Validation(_))
        ));
    }
}
