/// Crawl phase definitions for the orchestrator state machine
///
/// A run moves `Init -> Paginating <-> Listing -> Enriching -> Done`. There is
/// no way back from Enriching: one pagination pass feeds one enrichment pass.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Session opened, entry point loading, overlays being dismissed
    Init,

    /// Advancing the listing toward more items
    Paginating,

    /// Reading rendered list items
    Listing,

    /// Visiting detail pages
    Enriching,

    /// Result assembled
    Done,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the orchestrator may move from this phase to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::Paginating)
                | (Self::Init, Self::Done)
                | (Self::Paginating, Self::Listing)
                | (Self::Listing, Self::Paginating)
                | (Self::Listing, Self::Enriching)
                | (Self::Enriching, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Paginating => "paginating",
            Self::Listing => "listing",
            Self::Enriching => "enriching",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
