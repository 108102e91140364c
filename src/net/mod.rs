//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.rs (bind, listen with backlog)
//!     → accept #1 → connection.rs (ID for tracing) → GET exchange
//!     → accept #2 → connection.rs (ID for tracing) → POST exchange
//!     → listener dropped
//! ```
//!
//! # Design Decisions
//! - Exactly two accepts per process, issued sequentially
//! - Each connection is closed before the next accept
//! - No TLS

pub mod connection;
pub mod listener;

pub use connection::ConnectionId;
pub use listener::Listener;
