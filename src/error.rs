//! Session error types.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::Method;

/// Errors that end a bootstrap session with a failure status.
///
/// Non-fatal data problems (bad JSON, undecodable fields, unwritable output
/// files) never surface here; they are logged and the session carries on.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Socket creation, bind, or listen failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Bind address could not be parsed.
    #[error("invalid bind address {0:?}")]
    InvalidAddress(String),

    /// Accepting the next connection failed.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    /// Request did not start with the method this phase expects.
    #[error("expected {expected} request, received {received:?}")]
    UnexpectedMethod { expected: Method, received: String },

    /// POST head carried no `Content-Length` header.
    #[error("request has no Content-Length header")]
    MissingContentLength,

    /// `Content-Length` value is not a base-10 integer.
    #[error("invalid Content-Length value {0:?}")]
    InvalidContentLength(String),

    /// Declared body exceeds the configured cap.
    #[error("declared body of {declared} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { declared: usize, limit: usize },
}

impl BootstrapError {
    /// True for errors caused by what the peer sent rather than local setup.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            BootstrapError::UnexpectedMethod { .. }
                | BootstrapError::MissingContentLength
                | BootstrapError::InvalidContentLength(_)
                | BootstrapError::BodyTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_violations_are_classified() {
        assert!(BootstrapError::MissingContentLength.is_protocol_violation());
        assert!(BootstrapError::UnexpectedMethod {
            expected: Method::Get,
            received: "PUT".into(),
        }
        .is_protocol_violation());

        let accept = BootstrapError::Accept(std::io::Error::other("reset"));
        assert!(!accept.is_protocol_violation());
    }

    #[test]
    fn messages_name_the_cause() {
        let err = BootstrapError::UnexpectedMethod {
            expected: Method::Post,
            received: "GET".into(),
        };
        assert_eq!(err.to_string(), "expected POST request, received \"GET\"");

        let err = BootstrapError::InvalidContentLength("12a".into());
        assert_eq!(err.to_string(), "invalid Content-Length value \"12a\"");
    }
}
