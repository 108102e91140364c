//! POST body handling: decode `cert` and `reference`, persist both.
//!
//! # Design Decisions
//! - Every failure in here is non-fatal; the POST is always answered with 204
//! - Fields are handled independently, one failing never blocks the other
//! - Outputs are overwritten whole, never appended

use std::path::Path;

use serde_json::Value;

use crate::bootstrap::decode::decode_payload;
use crate::config::FilesConfig;

pub const CERT_FIELD: &str = "cert";
pub const REFERENCE_FIELD: &str = "reference";

/// What happened to one payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Decoded and written.
    Saved { bytes: usize },
    /// Not valid base64; the output was overwritten with nothing.
    DecodeFailed,
    /// Absent or not a string; output left untouched.
    Skipped,
    /// Output file could not be written.
    WriteFailed,
}

/// Result of handling one POST body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactReport {
    /// Body was not JSON. Nothing was written.
    Malformed,
    Processed {
        cert: FieldOutcome,
        reference: FieldOutcome,
    },
}

/// Parse the body and write whichever fields it carries.
pub async fn store_artifacts(body: &[u8], files: &FilesConfig) -> ArtifactReport {
    let document: Value = match serde_json::from_slice(body) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(error = %e, body_len = body.len(), "POST body is not valid JSON");
            return ArtifactReport::Malformed;
        }
    };

    let cert = store_field(&document, CERT_FIELD, &files.cert_path).await;
    let reference = store_field(&document, REFERENCE_FIELD, &files.reference_path).await;

    ArtifactReport::Processed { cert, reference }
}

async fn store_field(document: &Value, field: &'static str, path: &Path) -> FieldOutcome {
    let Some(encoded) = document.get(field).and_then(Value::as_str) else {
        tracing::error!(field, "Body has no string value for field");
        return FieldOutcome::Skipped;
    };

    let bytes = decode_payload(field, encoded);
    // Valid non-blank base64 never decodes to nothing.
    let decoded_ok = !bytes.is_empty() || encoded.trim().is_empty();

    if let Err(e) = tokio::fs::write(path, &bytes).await {
        tracing::error!(field, path = %path.display(), error = %e, "Could not write output file");
        return FieldOutcome::WriteFailed;
    }

    if decoded_ok {
        tracing::info!(field, path = %path.display(), bytes = bytes.len(), "Saved decoded payload");
        FieldOutcome::Saved { bytes: bytes.len() }
    } else {
        FieldOutcome::DecodeFailed
    }
}
