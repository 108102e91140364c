//! The two-exchange bootstrap session.
//!
//! # Responsibilities
//! - Accept exactly one GET, answer it with the CSR, close
//! - Accept exactly one POST, persist its payloads, answer 204, close
//! - Turn protocol violations into errors for the caller to act on
//!
//! # Design Decisions
//! - Sequential: the second accept is only issued after the first
//!   connection is closed
//! - Handlers never exit the process; `main` owns the exit status

use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::Instrument;

use crate::bootstrap::artifacts::{store_artifacts, ArtifactReport};
use crate::bootstrap::csr::{csr_document, read_csr};
use crate::config::{BootstrapConfig, FilesConfig};
use crate::error::BootstrapError;
use crate::http::{
    read_head, read_request_body, write_response, Method, ReadLimits, RequestHead, Response,
};
use crate::lifecycle::{Phase, PhaseTracker};
use crate::net::{ConnectionId, Listener};

/// Summary of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub get_peer: SocketAddr,
    pub post_peer: SocketAddr,
    /// Length of the CSR value served.
    pub csr_len: usize,
    pub artifacts: ArtifactReport,
}

/// One bootstrap run over a bound listener.
#[derive(Debug)]
pub struct Session {
    listener: Listener,
    files: FilesConfig,
    read_limits: ReadLimits,
    max_body_bytes: Option<usize>,
    phase: PhaseTracker,
}

impl Session {
    /// Bind the configured listener and prepare a session on it.
    pub async fn bind(config: &BootstrapConfig) -> Result<Self, BootstrapError> {
        let listener = Listener::bind(&config.listener).await?;
        Ok(Self::new(listener, config))
    }

    pub fn new(listener: Listener, config: &BootstrapConfig) -> Self {
        Self {
            listener,
            files: config.files.clone(),
            read_limits: ReadLimits::from(&config.limits),
            max_body_bytes: config.limits.max_body_bytes,
            phase: PhaseTracker::new(),
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    pub fn phase(&self) -> Phase {
        self.phase.current()
    }

    /// Serve the GET exchange, then the POST exchange, then release the listener.
    pub async fn run(mut self) -> Result<SessionReport, BootstrapError> {
        let result = self.drive().await;
        match &result {
            Ok(report) => tracing::info!(
                csr_len = report.csr_len,
                artifacts = ?report.artifacts,
                "Bootstrap session complete"
            ),
            Err(e) => tracing::error!(
                phase = %self.phase.current(),
                error = %e,
                "Bootstrap session failed"
            ),
        }
        result
    }

    async fn drive(&mut self) -> Result<SessionReport, BootstrapError> {
        tracing::info!(address = %self.local_addr(), "Waiting for GET request");
        self.phase.advance();
        let (stream, get_peer) = self.listener.accept().await?;

        self.phase.advance();
        let span = connection_span(Phase::ServeGet, get_peer);
        let csr_len = self.serve_get(stream).instrument(span).await?;

        tracing::info!("Waiting for POST request");
        self.phase.advance();
        let (stream, post_peer) = self.listener.accept().await?;

        self.phase.advance();
        let span = connection_span(Phase::ServePost, post_peer);
        let artifacts = self.serve_post(stream).instrument(span).await?;

        self.phase.advance();
        Ok(SessionReport {
            get_peer,
            post_peer,
            csr_len,
            artifacts,
        })
    }

    async fn serve_get(&self, mut stream: TcpStream) -> Result<usize, BootstrapError> {
        let head = read_head(&mut stream, self.read_limits).await;
        tracing::debug!(head = %head.text(), "Received GET request");

        if !head.starts_with_method(Method::Get) {
            return Err(reject(stream, &head, Method::Get).await);
        }

        let csr = read_csr(&self.files.csr_path).await;
        send(&mut stream, &Response::json(csr_document(&csr))).await;
        close(stream).await;

        tracing::info!(csr_len = csr.len(), "GET handled");
        Ok(csr.len())
    }

    async fn serve_post(&self, mut stream: TcpStream) -> Result<ArtifactReport, BootstrapError> {
        let head = read_head(&mut stream, self.read_limits).await;
        tracing::debug!(head = %head.text(), "Received POST request");

        if !head.starts_with_method(Method::Post) {
            return Err(reject(stream, &head, Method::Post).await);
        }

        let length = head
            .content_length()?
            .ok_or(BootstrapError::MissingContentLength)?;

        if let Some(limit) = self.max_body_bytes {
            if length > limit {
                send(&mut stream, &Response::payload_too_large()).await;
                close(stream).await;
                return Err(BootstrapError::BodyTooLarge {
                    declared: length,
                    limit,
                });
            }
        }

        let body = read_request_body(&mut stream, &head, length, self.read_limits).await;
        tracing::info!(received = body.len(), declared = length, "POST body read");

        let artifacts = store_artifacts(&body, &self.files).await;
        send(&mut stream, &Response::no_content()).await;
        close(stream).await;

        tracing::info!("POST handled");
        Ok(artifacts)
    }
}

fn connection_span(phase: Phase, peer: SocketAddr) -> tracing::Span {
    tracing::info_span!(
        "connection",
        id = %ConnectionId::new(),
        phase = %phase,
        peer = %peer,
    )
}

/// Answer 400 and build the error for a wrong method.
async fn reject(mut stream: TcpStream, head: &RequestHead, expected: Method) -> BootstrapError {
    send(&mut stream, &Response::bad_request()).await;
    close(stream).await;
    BootstrapError::UnexpectedMethod {
        expected,
        received: head.method_token(),
    }
}

/// Send failures are logged, never fatal.
async fn send(stream: &mut TcpStream, response: &Response) {
    if let Err(e) = write_response(stream, response).await {
        tracing::error!(
            status = response.status().as_u16(),
            error = %e,
            "Failed to send response"
        );
    }
}

async fn close(mut stream: TcpStream) {
    if let Err(e) = stream.shutdown().await {
        tracing::debug!(error = %e, "Connection shutdown failed");
    }
}
