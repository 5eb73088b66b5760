//! # pagecheck Protocols
//!
//! Interface definitions shared by the verification routine and the
//! browser drivers. Contains no implementations.
//!
//! ## Core Traits
//!
//! - [`Browser`] - Opens page sessions
//! - [`Page`] - A single page session owned by one check run
//! - [`Element`] - A handle to a rendered DOM element
//! - [`ProgressSink`] - Receives progress events from a check run

pub mod browser;
pub mod error;
pub mod progress;

pub use browser::{Browser, Element, Page};
pub use error::CheckError;
pub use progress::{Progress, ProgressSink, Violation};
