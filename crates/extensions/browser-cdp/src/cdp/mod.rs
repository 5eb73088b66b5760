//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chrome/Chromium via WebSocket and speaks the CDP JSON-RPC
//! protocol over a single browser-level connection. Page sessions are
//! flattened onto that connection and addressed by session id.
//!
//! ```no_run
//! # use std::time::Duration;
//! # use pagecheck_browser_cdp::{CdpClient, CdpError};
//! # async fn example() -> Result<(), CdpError> {
//! let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//! let page = client.create_page().await?;
//! page.navigate("https://example.com", Duration::from_secs(30)).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
