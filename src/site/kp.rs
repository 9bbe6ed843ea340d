//! kp.ru online feed

use super::profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::session::Locator;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

const BASE_URL: &str = "https://www.kp.ru/online/";

pub(super) fn timings() -> SiteTimings {
    SiteTimings {
        list_item_count: 15,
        pagination_delay: Duration::from_secs(5),
        detail_delay: Duration::from_secs(5),
        detail_sleep_every: 1,
    }
}

pub(super) fn profile() -> Result<SiteProfile, ConfigError> {
    Ok(SiteProfile {
        name: "kp".to_string(),
        base_url: Url::parse(BASE_URL).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?,
        overlays: Vec::new(),
        list: ListSelectors {
            item: ".sc-1tputnk-13".to_string(),
            link: Some(".sc-1tputnk-2".to_string()),
            title: Some(".sc-1tputnk-2".to_string()),
            subtitle: Some(".sc-1tputnk-3".to_string()),
            tag: Some(".sc-1tputnk-11".to_string()),
        },
        detail: DetailSelectors {
            body: vec![".sc-14f2vgk-1".to_string()],
            date: Some(".sc-j7em19-1".to_string()),
        },
        pagination: PaginationSpec::ClickToLoad {
            button: Locator::css(".sc-abxysl-0"),
            reveal: None,
        },
        fixed_tag: None,
    })
}
