//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Listening → AwaitGet → ServeGet → AwaitPost → ServePost → Done
//!                ↓           ↓          ↓           ↓
//!              fatal       fatal      fatal       fatal   (error returned to main)
//! ```
//!
//! # Design Decisions
//! - Strictly forward transitions; no path back to accepting
//! - Failures end the session; main decides the exit status

pub mod phase;

pub use phase::{Phase, PhaseTracker};
