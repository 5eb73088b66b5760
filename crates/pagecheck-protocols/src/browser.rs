//! Browser capability traits.
//!
//! A driver exposes just enough of the DOM for a check run: locate
//! elements, read their text and computed styles, and click them.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CheckError;

/// Opens page sessions.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open a new, blank page session.
    async fn open(&self) -> Result<Box<dyn Page>, CheckError>;
}

/// A page session exclusively owned by one check run.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to a URL and wait for the document to load.
    async fn navigate(&self, url: &str) -> Result<(), CheckError>;

    /// Block until at least one element matches `selector`.
    ///
    /// Returns [`CheckError::Timeout`] when nothing matches within `timeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), CheckError>;

    /// All elements matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError>;

    /// Release the session. Called exactly once per run.
    async fn close(&self) -> Result<(), CheckError>;
}

/// Handle to a rendered element.
#[async_trait]
pub trait Element: Send + Sync {
    /// Rendered (visible) text of the element.
    async fn text(&self) -> Result<String, CheckError>;

    /// Descendants matching `selector`, in document order.
    async fn find_children(&self, selector: &str) -> Result<Vec<Box<dyn Element>>, CheckError>;

    /// Resolved value of a CSS property, e.g. `background-color`.
    async fn computed_style(&self, property: &str) -> Result<String, CheckError>;

    /// Simulate a pointer click on the element.
    async fn click(&self) -> Result<(), CheckError>;
}
