//! iz.ru news feed

use super::profile::{DetailSelectors, ListSelectors, PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::ConfigError;
use std::time::Duration;
use url::Url;

const BASE_URL: &str = "https://iz.ru/news";

pub(super) fn timings() -> SiteTimings {
    SiteTimings {
        list_item_count: 16,
        pagination_delay: Duration::from_secs(2),
        detail_delay: Duration::from_secs(5),
        detail_sleep_every: 2,
    }
}

pub(super) fn profile() -> Result<SiteProfile, ConfigError> {
    Ok(SiteProfile {
        name: "iz".to_string(),
        base_url: Url::parse(BASE_URL).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?,
        overlays: Vec::new(),
        list: ListSelectors {
            item: ".node__cart__item".to_string(),
            link: Some(".node__cart__item__inside".to_string()),
            title: Some(".node__cart__item__inside__info__title".to_string()),
            subtitle: None,
            tag: Some(".node__cart__item__category_news".to_string()),
        },
        detail: DetailSelectors {
            body: vec![".text-article__inside".to_string()],
            date: Some(".article_page__left__top__time__label".to_string()),
        },
        pagination: PaginationSpec::InfiniteScroll,
        fixed_tag: None,
    })
}
