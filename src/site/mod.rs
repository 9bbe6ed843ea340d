//! Site adapters
//!
//! Every news source is a data-driven `SiteProfile` (entry point, selectors,
//! pagination mechanism, overlays to dismiss) interpreted by one shared
//! `ProfileAdapter`. Sources differ only in these constants and in their
//! `SiteTimings`; the crawl loop itself lives in `crate::crawler`.
//!
//! - `adapter`: the `SiteAdapter` capability set and `ProfileAdapter`
//! - `profile`: selector/pagination description of a source
//! - `dom`: text and link extraction from rendered HTML
//! - `dates`: natural-language publish date parsing
//! - one module per source with its profile

mod adapter;
pub mod dates;
pub mod dom;
mod iz;
mod kp;
mod panorama;
mod profile;
mod rt;
mod tvrain;

pub use adapter::{ProfileAdapter, SiteAdapter};
pub use profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};

use crate::ConfigError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Pacing and sizing constants of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTimings {
    /// Nominal items rendered per page, click or scroll
    pub list_item_count: usize,

    /// Sleep before every pagination action
    pub pagination_delay: Duration,

    /// Inter-item rate-limit sleep during enrichment
    pub detail_delay: Duration,

    /// The enrichment sleep happens before every k-th detail page
    pub detail_sleep_every: usize,
}

impl SiteTimings {
    /// Timings with no sleeps at all, for replaying recorded pages
    pub fn without_delays(list_item_count: usize) -> Self {
        Self {
            list_item_count,
            pagination_delay: Duration::ZERO,
            detail_delay: Duration::ZERO,
            detail_sleep_every: 1,
        }
    }

    /// Upper bound on pagination actions needed to render `quota` items
    pub fn pagination_rounds(&self, quota: usize) -> usize {
        quota.div_ceil(self.list_item_count.max(1))
    }
}

/// The supported news sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// russian.rt.com
    Rt,
    /// kp.ru
    Kp,
    /// iz.ru
    Iz,
    /// tvrain.tv
    TvRain,
    /// panorama.pub (date-paged archive, per category)
    Panorama,
}

impl Source {
    /// Returns all sources
    pub fn all() -> [Source; 5] {
        [
            Self::Rt,
            Self::Kp,
            Self::Iz,
            Self::TvRain,
            Self::Panorama,
        ]
    }

    /// Short identifier used on the command line and in config
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rt => "rt",
            Self::Kp => "kp",
            Self::Iz => "iz",
            Self::TvRain => "tvrain",
            Self::Panorama => "panorama",
        }
    }

    /// Returns true if the quota is distributed over categories
    pub fn has_categories(&self) -> bool {
        matches!(self, Self::Panorama)
    }

    /// Categories crawled when none are configured
    pub fn default_categories(&self) -> Vec<String> {
        match self {
            Self::Panorama => panorama::DEFAULT_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Built-in timings of this source
    pub fn default_timings(&self) -> SiteTimings {
        match self {
            Self::Rt => rt::timings(),
            Self::Kp => kp::timings(),
            Self::Iz => iz::timings(),
            Self::TvRain => tvrain::timings(),
            Self::Panorama => panorama::timings(),
        }
    }

    /// Builds the profiles to crawl for this source
    ///
    /// Single-feed sources yield one profile. Multi-category sources yield one
    /// profile per category, in the given order, with archives starting at `from_date`.
    pub fn profiles(
        &self,
        categories: &[String],
        from_date: NaiveDate,
    ) -> Result<Vec<SiteProfile>, ConfigError> {
        let profile = match self {
            Self::Rt => rt::profile(),
            Self::Kp => kp::profile(),
            Self::Iz => iz::profile(),
            Self::TvRain => tvrain::profile(),
            Self::Panorama => {
                crate::config::validate_categories(categories)?;
                return categories
                    .iter()
                    .map(|category| panorama::profile(category, from_date))
                    .collect();
            }
        };
        Ok(vec![profile?])
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|source| source.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown source '{}', expected one of: rt, kp, iz, tvrain, panorama",
                    s
                )
            })
    }
}
