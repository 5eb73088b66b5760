//! # pagecheck Config
//!
//! Optional TOML configuration for a check run. Every field has a default,
//! so running without a config file checks the default deployment.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
