//! Single-use certificate bootstrap helper library.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use bootstrap::{Session, SessionReport};
pub use config::schema::BootstrapConfig;
pub use error::BootstrapError;
