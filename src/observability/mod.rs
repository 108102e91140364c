//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! session, http, net
//!     → tracing events and spans (connection ID, phase, peer)
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```

pub mod logging;
