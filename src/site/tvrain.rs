//! tvrain.tv news feed

use super::profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::session::Locator;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

const BASE_URL: &str = "https://tvrain.tv/news/";

pub(super) fn timings() -> SiteTimings {
    SiteTimings {
        list_item_count: 24,
        pagination_delay: Duration::from_secs(2),
        detail_delay: Duration::from_secs(5),
        detail_sleep_every: 1,
    }
}

pub(super) fn profile() -> Result<SiteProfile, ConfigError> {
    Ok(SiteProfile {
        name: "tvrain".to_string(),
        base_url: Url::parse(BASE_URL).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?,
        overlays: Vec::new(),
        list: ListSelectors {
            item: ".newsline_tile__headTitle".to_string(),
            link: Some("a".to_string()),
            title: Some("a".to_string()),
            subtitle: None,
            tag: None,
        },
        detail: DetailSelectors {
            body: vec![
                ".document-lead".to_string(),
                ".article-full__text".to_string(),
            ],
            date: Some(".document-head__date".to_string()),
        },
        pagination: PaginationSpec::ClickToLoad {
            button: Locator::css(".button--outline"),
            reveal: Some(Locator::css(".footer-copy")),
        },
        fixed_tag: None,
    })
}
