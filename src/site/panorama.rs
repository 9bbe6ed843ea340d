//! panorama.pub category archives
//!
//! Each category is browsed one archive day at a time. Article pages carry no
//! date, so every item is dated by the archive day it was listed on.

use super::profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::pagination::archive_page_url;
use crate::ConfigError;
use chrono::NaiveDate;
use std::time::Duration;
use url::Url;

const ROOT_URL: &str = "https://panorama.pub";

pub(super) const DEFAULT_CATEGORIES: &[&str] = &["politics", "society"];

pub(super) fn timings() -> SiteTimings {
    SiteTimings {
        list_item_count: 5,
        pagination_delay: Duration::from_secs(1),
        detail_delay: Duration::from_secs(5),
        detail_sleep_every: 1,
    }
}

pub(super) fn profile(category: &str, start: NaiveDate) -> Result<SiteProfile, ConfigError> {
    let root = Url::parse(ROOT_URL).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    let base_url = archive_page_url(&root, category, start)?;

    Ok(SiteProfile {
        name: format!("panorama/{}", category),
        base_url,
        overlays: Vec::new(),
        list: ListSelectors {
            item: ".flex.flex-col.rounded-md.mb-2".to_string(),
            link: None,
            title: None,
            subtitle: None,
            tag: None,
        },
        detail: DetailSelectors {
            body: vec![".entry-contents.pr-0".to_string()],
            date: None,
        },
        pagination: PaginationSpec::DateArchive {
            root,
            category: category.to_string(),
            start,
        },
        fixed_tag: Some(category.to_string()),
    })
}
