//! Chrome DevTools Protocol driver for pagecheck.
//!
//! Implements the [`pagecheck_protocols`] browser traits on top of a pure
//! Rust CDP client.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │    pagecheck    │ ◄──────────────► │  Chrome/Chromium │
//! │  (this crate)   │       CDP        │                  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Each run launches Chrome with a fresh temporary profile and stops it
//! again when the page is closed, removing the profile. A browser already
//! listening on the debug port is only reused (and left running) when the
//! configuration asks to attach to it.

pub mod cdp;
mod driver;
pub mod manager;

#[cfg(test)]
mod test_support;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::{CdpBrowser, CdpElement, CdpPage};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
