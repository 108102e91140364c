//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → BootstrapConfig (validated, immutable)
//!     → handed to the session by value
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the session starts
//! - All fields have defaults so the helper runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BootstrapConfig;
pub use schema::FilesConfig;
pub use schema::LimitsConfig;
pub use schema::ListenerConfig;
pub use schema::{LogFormat, LoggingConfig};
pub use validation::{validate_config, ValidationError};
