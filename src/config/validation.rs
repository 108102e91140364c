//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and value ranges (backlog > 0, limits > 0)
//! - Detect output paths that would overwrite each other
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootstrapConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BootstrapConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.backlog must be greater than zero")]
    ZeroBacklog,

    #[error("files.{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("files.cert_path and files.reference_path point to the same file")]
    OutputCollision,

    #[error("limits.{0} must be greater than zero when set")]
    ZeroLimit(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &BootstrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }

    let files = &config.files;
    for (name, path) in [
        ("csr_path", &files.csr_path),
        ("cert_path", &files.cert_path),
        ("reference_path", &files.reference_path),
    ] {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyPath(name));
        }
    }
    if !files.cert_path.as_os_str().is_empty() && files.cert_path == files.reference_path {
        errors.push(ValidationError::OutputCollision);
    }

    let limits = &config.limits;
    if limits.read_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroLimit("read_timeout_secs"));
    }
    if limits.max_header_bytes == Some(0) {
        errors.push(ValidationError::ZeroLimit("max_header_bytes"));
    }
    if limits.max_body_bytes == Some(0) {
        errors.push(ValidationError::ZeroLimit("max_body_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&BootstrapConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = BootstrapConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.listener.backlog = 0;
        config.files.csr_path = PathBuf::new();
        config.limits.read_timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::ZeroBacklog,
                ValidationError::EmptyPath("csr_path"),
                ValidationError::ZeroLimit("read_timeout_secs"),
            ]
        );
    }

    #[test]
    fn rejects_shared_output_path() {
        let mut config = BootstrapConfig::default();
        config.files.reference_path = config.files.cert_path.clone();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::OutputCollision])
        );
    }
}
