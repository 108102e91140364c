//! Certificate bootstrap exchange.
//!
//! # Data Flow
//! ```text
//! GET  → csr.rs (read CSR file) → {"csr": "..."} → 200
//! POST → artifacts.rs (parse JSON)
//!          → decode.rs (base64 → bytes) → cert / reference files
//!      → 204
//! session.rs drives both exchanges in order.
//! ```

pub mod artifacts;
pub mod csr;
pub mod decode;
pub mod session;

pub use artifacts::{store_artifacts, ArtifactReport, FieldOutcome};
pub use csr::{csr_document, read_csr};
pub use decode::{decode_payload, try_decode};
pub use session::{Session, SessionReport};
