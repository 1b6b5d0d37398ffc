//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → cli.rs (flags override file values)
//!     → validation.rs (semantic checks)
//!     → IoServiceConfig / ApiConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so no file is needed at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::{ApiArgs, IoServiceArgs};
pub use loader::ConfigError;
pub use schema::{
    ApiConfig, ApiRoutesConfig, IoConfig, IoServiceConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, UpstreamConfig,
};
pub use validation::{Validate, ValidationError};
