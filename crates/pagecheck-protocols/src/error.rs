//! Errors raised while driving a page.

use thiserror::Error;

/// Unexpected failures during a check run.
///
/// Expected negative outcomes (a missing tab, a style violation) are not
/// errors; they are reported as a failed verdict instead.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Stale element reference: {0}")]
    StaleElement(String),

    #[error("Script error: {0}")]
    Script(String),

    /// Any other driver failure. The underlying error is kept as the source.
    #[error("Driver error")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Session closed")]
    Closed,
}

impl CheckError {
    pub fn driver(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CheckError::Driver(source.into())
    }
}
