use super::{ListingMode, PageAdvanceOutcome, PaginationStrategy};
use crate::session::Session;
use crate::ConfigError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use url::Url;

const ARCHIVE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Walks a date-paged archive backwards one calendar day per advance
///
/// The archive is unbounded backwards, so the walk ends only when the quota
/// is met. A page that fails to load reports `Blocked`. `Exhausted` is
/// reported only once the calendar has no earlier day to step to.
#[derive(Debug, Clone)]
pub struct DateArchive {
    root: Url,
    category: String,
    cursor: NaiveDate,
    delay: Duration,
}

impl DateArchive {
    /// Creates an archive walker whose current page is the one for `start`
    pub fn new(root: Url, category: impl Into<String>, start: NaiveDate, delay: Duration) -> Self {
        Self {
            root,
            category: category.into(),
            cursor: start,
            delay,
        }
    }
}

#[async_trait]
impl PaginationStrategy for DateArchive {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn listing_mode(&self) -> ListingMode {
        ListingMode::PerPage
    }

    async fn advance(&mut self, session: &mut dyn Session) -> PageAdvanceOutcome {
        let Some(previous) = self.cursor.pred_opt() else {
            return PageAdvanceOutcome::Exhausted;
        };

        let url = match archive_page_url(&self.root, &self.category, previous) {
            Ok(url) => url,
            Err(e) => return PageAdvanceOutcome::Blocked(e.to_string()),
        };

        self.cursor = previous;
        tracing::debug!("Opening archive page {}", url);

        match session.goto(url.as_str()).await {
            Ok(()) => PageAdvanceOutcome::Advanced,
            Err(e) => PageAdvanceOutcome::Blocked(e.to_string()),
        }
    }
}

/// Builds the archive page URL `{root}/{category}/{dd-mm-yyyy}`
pub fn archive_page_url(root: &Url, category: &str, date: NaiveDate) -> Result<Url, ConfigError> {
    let raw = format!(
        "{}/{}/{}",
        root.as_str().trim_end_matches('/'),
        category,
        date.format(ARCHIVE_DATE_FORMAT)
    );
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Extracts the archive day from an archive page URL
///
/// Returns None if the last path segment is not a `dd-mm-yyyy` date.
pub fn archive_date(url: &str) -> Option<NaiveDate> {
    let url = Url::parse(url).ok()?;
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    NaiveDate::parse_from_str(segment, ARCHIVE_DATE_FORMAT).ok()
}
