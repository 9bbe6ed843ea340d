use crate::config::Config;
use crate::crawler::Coordinator;
use crate::model::CrawlResult;
use crate::session::SessionLauncher;
use crate::site::{ProfileAdapter, SiteAdapter, Source};
use crate::{ConfigError, HarvestError};
use chrono::{Local, NaiveDate};

/// Per-run choices that override the configuration
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Categories to crawl, for multi-category sources
    pub categories: Option<Vec<String>>,

    /// First archive day, for date-paged sources; defaults to today
    pub from_date: Option<NaiveDate>,
}

/// Splits `total` into `parts` shares
///
/// Every share but the last is `total / parts`; the last takes the remainder.
pub fn split_quota(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }

    let step = total / parts;
    let mut shares = vec![step; parts];
    shares[parts - 1] = total - step * (parts - 1);
    shares
}

/// Crawls several adapters one after another and merges their results
///
/// The quota is split with `split_quota`. Each adapter gets its own session,
/// and each result is renumbered after the articles already collected.
pub async fn crawl_all<A: SiteAdapter>(
    adapters: &[A],
    quota: usize,
    launcher: &dyn SessionLauncher,
) -> Result<CrawlResult, HarvestError> {
    let shares = split_quota(quota, adapters.len());
    let mut merged = CrawlResult::new();

    for (adapter, share) in adapters.iter().zip(shares) {
        tracing::info!("{}: crawling {} articles", adapter.name(), share);
        let result = Coordinator::new(adapter, launcher).run(share).await?;
        merged = CrawlResult::merge(merged, result);
    }

    Ok(merged)
}

/// Crawls up to `quota` articles from a source
///
/// # Arguments
///
/// * `source` - The news source to crawl
/// * `quota` - Number of articles requested
/// * `config` - Configuration supplying timings and default categories
/// * `launcher` - Provider of browsing sessions
/// * `options` - Per-run category and start-date choices
pub async fn crawl_source(
    source: Source,
    quota: usize,
    config: &Config,
    launcher: &dyn SessionLauncher,
    options: &CrawlOptions,
) -> Result<CrawlResult, HarvestError> {
    if options.categories.is_some() && !source.has_categories() {
        return Err(ConfigError::Validation(format!(
            "source '{}' does not support categories",
            source
        ))
        .into());
    }

    let categories = match &options.categories {
        Some(categories) => categories.clone(),
        None => config
            .categories_for(source)
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| source.default_categories()),
    };
    let from_date = options
        .from_date
        .unwrap_or_else(|| Local::now().date_naive());
    let timings = config.timings_for(source);

    let adapters = source
        .profiles(&categories, from_date)?
        .into_iter()
        .map(|profile| ProfileAdapter::new(profile, timings.clone()))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    crawl_all(&adapters, quota, launcher).await
}
