//! Browser instance manager.
//!
//! Launches Chrome with remote debugging enabled (or attaches to one already
//! listening on the debug port, when configured) and opens the page session
//! for a check run.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
