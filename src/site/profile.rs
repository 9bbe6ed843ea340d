use crate::session::Locator;
use chrono::NaiveDate;
use url::Url;

/// Selector/pagination description of one crawlable feed
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Log name, e.g. `rt` or `panorama/politics`
    pub name: String,

    /// Entry point of the listing
    pub base_url: Url,

    /// Overlays clicked away after the entry page loads, in order
    pub overlays: Vec<Locator>,

    pub list: ListSelectors,

    pub detail: DetailSelectors,

    pub pagination: PaginationSpec,

    /// Tag attached to every item instead of a per-item tag
    pub fixed_tag: Option<String>,
}

/// CSS selectors for listing items, relative to each item element
#[derive(Debug, Clone)]
pub struct ListSelectors {
    pub item: String,

    /// Element whose `href` is the link; None uses the item's own `href`
    pub link: Option<String>,

    /// Element holding the title; None takes the last text line of the item
    pub title: Option<String>,

    pub subtitle: Option<String>,

    pub tag: Option<String>,
}

/// CSS selectors for article pages
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    /// Body fragments joined with newlines; a missing fragment empties the body
    pub body: Vec<String>,

    /// Date elements, tried in document order
    pub date: Option<String>,
}

/// How a listing produces more items
#[derive(Debug, Clone)]
pub enum PaginationSpec {
    /// A "load more" control; `reveal` is scrolled into view before the final snapshot
    ClickToLoad {
        button: Locator,
        reveal: Option<Locator>,
    },

    /// New items append when the page is scrolled to the bottom
    InfiniteScroll,

    /// One page per calendar day, walked backwards from `start`
    DateArchive {
        root: Url,
        category: String,
        start: NaiveDate,
    },
}

impl PaginationSpec {
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::DateArchive { .. })
    }
}
