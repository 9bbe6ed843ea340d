use crate::export::DateLayout;
use crate::site::{SiteTimings, Source};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Main configuration structure for news-harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub export: ExportConfig,
    /// Per-source overrides keyed by source name (rt, kp, iz, tvrain, panorama)
    pub sites: BTreeMap<String, SiteOverrides>,
}

impl Config {
    /// Returns the timings for `source`: its defaults with any configured overrides applied
    pub fn timings_for(&self, source: Source) -> SiteTimings {
        let mut timings = source.default_timings();

        if let Some(overrides) = self.sites.get(source.name()) {
            if let Some(count) = overrides.list_item_count {
                timings.list_item_count = count;
            }
            if let Some(ms) = overrides.pagination_delay {
                timings.pagination_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = overrides.detail_delay {
                timings.detail_delay = Duration::from_millis(ms);
            }
            if let Some(every) = overrides.detail_sleep_every {
                timings.detail_sleep_every = every;
            }
        }

        timings
    }

    /// Returns the configured categories for `source`, if any
    pub fn categories_for(&self, source: Source) -> Option<&[String]> {
        self.sites
            .get(source.name())
            .and_then(|overrides| overrides.categories.as_deref())
    }
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run Chrome without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window width in pixels
    #[serde(rename = "window-width", default = "default_window_width")]
    pub window_width: u32,

    /// Browser window height in pixels
    #[serde(rename = "window-height", default = "default_window_height")]
    pub window_height: u32,

    /// Maximum time a single navigation may take (milliseconds)
    #[serde(rename = "page-load-timeout", default = "default_page_load_timeout")]
    pub page_load_timeout: u64,

    /// Path to the Chrome/Chromium binary; auto-detected when absent
    #[serde(rename = "chrome-executable", default)]
    pub chrome_executable: Option<String>,
}

impl BrowserConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            page_load_timeout: default_page_load_timeout(),
            chrome_executable: None,
        }
    }
}

/// Export formatting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Layout of the exported date column
    #[serde(rename = "date-format", default)]
    pub date_format: DateLayout,

    /// Separator used when joining list fields (tags, metadata)
    #[serde(rename = "list-separator", default = "default_list_separator")]
    pub list_separator: String,

    /// Field delimiter of delimited-text output
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: DateLayout::default(),
            list_separator: default_list_separator(),
            delimiter: default_delimiter(),
        }
    }
}

/// Optional per-source overrides of the built-in timings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteOverrides {
    /// Nominal items rendered per page, click or scroll
    #[serde(rename = "list-item-count")]
    pub list_item_count: Option<usize>,

    /// Delay before every pagination action (milliseconds)
    #[serde(rename = "pagination-delay")]
    pub pagination_delay: Option<u64>,

    /// Inter-item rate-limit sleep during enrichment (milliseconds)
    #[serde(rename = "detail-delay")]
    pub detail_delay: Option<u64>,

    /// Sleep before every k-th detail page
    #[serde(rename = "detail-sleep-every")]
    pub detail_sleep_every: Option<usize>,

    /// Categories to crawl (multi-category sources only)
    pub categories: Option<Vec<String>>,
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_page_load_timeout() -> u64 {
    30_000
}

fn default_list_separator() -> String {
    ",".to_string()
}

fn default_delimiter() -> String {
    ";".to_string()
}
