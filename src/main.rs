//! csr-bootstrap
//!
//! Serves a certificate signing request to exactly one client, then accepts
//! exactly one upload of the issued certificate and its reference document.
//!
//! # Exchange
//!
//! ```text
//!     Issuer                                   csr-bootstrap
//!       │  GET ───────────────────────────────────▶ │ read csr.txt
//!       │ ◀─────────────── 200 {"csr": "..."} ───── │
//!       │                                           │ (connection closed)
//!       │  POST {"cert": b64, "reference": b64} ──▶ │ decode, write
//!       │ ◀───────────────────────── 204 ────────── │ fullchain.pem, reference.json
//!       │                                           │ exit 0
//! ```
//!
//! Any protocol violation (wrong method, missing Content-Length) ends the
//! process with a non-zero status.

use std::process::ExitCode;

use clap::Parser;

use csr_bootstrap::cli::Cli;
use csr_bootstrap::config::LoggingConfig;
use csr_bootstrap::observability::logging;
use csr_bootstrap::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init(&LoggingConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("failed to initialize logging: {e}");
    }

    tracing::info!("csr-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        csr_path = %config.files.csr_path.display(),
        cert_path = %config.files.cert_path.display(),
        reference_path = %config.files.reference_path.display(),
        "Configuration loaded"
    );

    let session = match Session::bind(&config).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "Listener setup failed");
            return ExitCode::FAILURE;
        }
    };

    // The session logs its own outcome.
    match session.run().await {
        Ok(_) => {
            tracing::info!("Server done");
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
