//! Pagination strategies
//!
//! A strategy moves a browsing session toward more list items and reports the
//! result as a `PageAdvanceOutcome`. The crawl loop applies one uniform
//! policy to that outcome regardless of the mechanism behind it.

mod archive;
mod click;
mod scroll;

pub use archive::{archive_date, archive_page_url, DateArchive};
pub use click::ClickToLoad;
pub use scroll::InfiniteScroll;

use crate::session::Session;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Result of a single pagination action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAdvanceOutcome {
    /// More items are (or may be) rendered now
    Advanced,

    /// The pagination control could not be used; carries the reason
    Blocked(String),

    /// There is nothing more to load
    Exhausted,
}

impl fmt::Display for PageAdvanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advanced => write!(f, "advanced"),
            Self::Blocked(reason) => write!(f, "blocked ({})", reason),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// How list items relate to the pages a strategy visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// One growing page; items are extracted once after pagination ends
    Cumulative,

    /// Every advance replaces the page; items are extracted after each one
    PerPage,
}

#[async_trait]
pub trait PaginationStrategy: Send {
    /// Sleep applied before every pagination action
    fn delay(&self) -> Duration;

    fn listing_mode(&self) -> ListingMode {
        ListingMode::Cumulative
    }

    /// Performs one pagination action
    async fn advance(&mut self, session: &mut dyn Session) -> PageAdvanceOutcome;

    /// Final best-effort action that makes sure the last batch is rendered
    async fn settle(&mut self, _session: &mut dyn Session) {}
}
