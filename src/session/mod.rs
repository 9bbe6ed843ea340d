//! Browsing session abstraction
//!
//! The crawl engine talks to the browser only through the `Session` trait:
//! navigation, a snapshot of the rendered document, and a handful of UI
//! interactions. Extraction works on the rendered HTML, so it is independent
//! of the driver.
//!
//! - `Session`: one live browsing context for an entire crawl run
//! - `SessionLauncher`: acquires a new session (one per run)
//! - `BrowserLauncher`/`BrowserSession`: chromiumoxide-backed implementation

mod browser;
mod traits;

pub use browser::{BrowserLauncher, BrowserSession};
pub use traits::{Locator, Session, SessionError, SessionLauncher, SessionResult};
