//! russian.rt.com news feed

use super::profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::session::Locator;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

const BASE_URL: &str = "https://russian.rt.com/news";

pub(super) fn timings() -> SiteTimings {
    SiteTimings {
        list_item_count: 15,
        pagination_delay: Duration::from_secs(2),
        detail_delay: Duration::from_secs(5),
        detail_sleep_every: 1,
    }
}

pub(super) fn profile() -> Result<SiteProfile, ConfigError> {
    Ok(SiteProfile {
        name: "rt".to_string(),
        base_url: Url::parse(BASE_URL).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?,
        overlays: vec![
            Locator::css(".Popup-telegram__close"),
            Locator::link_text("Подтвердить"),
        ],
        list: ListSelectors {
            item: ".card_all-news".to_string(),
            link: Some(".card__heading .link".to_string()),
            title: Some(".card__heading".to_string()),
            subtitle: Some(".card__summary".to_string()),
            tag: Some(".card__category".to_string()),
        },
        detail: DetailSelectors {
            body: vec![".article__text".to_string()],
            date: Some(".date".to_string()),
        },
        pagination: PaginationSpec::ClickToLoad {
            button: Locator::link_text("Загрузить ещё"),
            reveal: Some(Locator::css(".footer__nav-link_rt-shop")),
        },
        fixed_tag: None,
    })
}
