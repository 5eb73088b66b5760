//! # pagecheck Core
//!
//! The page verification routine: load the target application, switch to
//! the process monitor tab, and check the installation instructions for
//! white-on-white code samples and unselectable text.
//!
//! The routine only talks to the [`Page`](pagecheck_protocols::Page) and
//! [`Element`](pagecheck_protocols::Element) traits, so any driver can
//! back it.

mod settings;
mod sink;
pub mod style;
mod verdict;
mod verify;

pub use settings::CheckSettings;
pub use sink::TracingSink;
pub use verdict::{Failure, Verdict};
pub use verify::{run, verify};
