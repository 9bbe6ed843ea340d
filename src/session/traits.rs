//! Session traits and error types
//!
//! This module defines the trait interface for browsing sessions and
//! associated error types.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation timed out: {url}")]
    Timeout { url: String },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Element not found: {locator}")]
    NotFound { locator: Locator },

    #[error("Element {locator} is not interactable: {message}")]
    NotInteractable { locator: Locator, message: String },

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Session already closed")]
    Closed,
}

impl SessionError {
    /// Returns true if this error is a navigation timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Identifies an element on the current page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// A CSS selector
    Css(String),

    /// An anchor whose visible text equals the given string
    LinkText(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css `{}`", selector),
            Self::LinkText(text) => write!(f, "link text `{}`", text),
        }
    }
}

/// One live headless-browsing context
///
/// All calls block the crawl's control flow until they complete. Implementations
/// must make `close` idempotent; the orchestrator calls it on every exit path.
#[async_trait]
pub trait Session: Send {
    /// Navigates to `url` and waits for the page load, bounded by the page-load timeout
    ///
    /// A timeout must be reported as `SessionError::Timeout`.
    async fn goto(&mut self, url: &str) -> SessionResult<()>;

    /// URL of the currently loaded document
    async fn current_url(&mut self) -> SessionResult<String>;

    /// Serialized HTML of the currently rendered document
    async fn content(&mut self) -> SessionResult<String>;

    /// Clicks the element identified by `locator`
    ///
    /// Reports `NotFound` if no element matches and `NotInteractable` if the
    /// click cannot be delivered.
    async fn click(&mut self, locator: &Locator) -> SessionResult<()>;

    /// Scrolls the element identified by `locator` into the viewport
    async fn scroll_into_view(&mut self, locator: &Locator) -> SessionResult<()>;

    /// Scrolls the viewport to the document's current bottom
    async fn scroll_to_bottom(&mut self) -> SessionResult<()>;

    /// Releases the session and its underlying browser
    async fn close(&mut self) -> SessionResult<()>;
}

/// Acquires browsing sessions
///
/// Each crawl run launches exactly one session and owns it until it is closed.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> SessionResult<Box<dyn Session>>;
}
