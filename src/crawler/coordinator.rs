//! Crawl coordinator - the quota-driven crawl state machine
//!
//! One run of the coordinator:
//! - launches a browsing session and opens the adapter's entry point
//! - paginates until the quota is rendered or pagination stops
//! - reads list items and truncates them to the quota
//! - visits every item's detail page, skipping items whose page times out
//! - closes the session on every exit path

use crate::crawler::CrawlPhase;
use crate::model::{Article, CrawlResult, DetailFields, ListItem};
use crate::pagination::{ListingMode, PageAdvanceOutcome, PaginationStrategy};
use crate::session::{Session, SessionLauncher};
use crate::site::SiteAdapter;
use crate::HarvestError;

/// Consecutive archive pages without items after which the walk gives up
const MAX_EMPTY_PAGES: usize = 7;

/// Drives one site adapter through a single crawl run
pub struct Coordinator<'a> {
    adapter: &'a dyn SiteAdapter,
    launcher: &'a dyn SessionLauncher,
    phase: CrawlPhase,
}

impl<'a> Coordinator<'a> {
    /// Creates a coordinator in the `Init` phase
    pub fn new(adapter: &'a dyn SiteAdapter, launcher: &'a dyn SessionLauncher) -> Self {
        Self {
            adapter,
            launcher,
            phase: CrawlPhase::Init,
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl for up to `quota` articles
    ///
    /// Only session launch and entry-point failures are returned as errors.
    /// Blocked pagination and timed-out detail pages shrink the result instead.
    pub async fn run(&mut self, quota: usize) -> Result<CrawlResult, HarvestError> {
        if quota == 0 {
            tracing::info!("{}: nothing requested", self.adapter.name());
            self.transition(CrawlPhase::Done)?;
            return Ok(CrawlResult::new());
        }

        let mut session = self.launcher.launch().await?;
        let outcome = self.drive(session.as_mut(), quota).await;

        if let Err(e) = session.close().await {
            tracing::warn!("{}: failed to close browsing session: {}", self.adapter.name(), e);
        }

        outcome
    }

    async fn drive(
        &mut self,
        session: &mut dyn Session,
        quota: usize,
    ) -> Result<CrawlResult, HarvestError> {
        let adapter = self.adapter;
        let name = adapter.name();
        let entry = adapter.base_url().as_str();

        tracing::info!("{}: opening {}", name, entry);
        session
            .goto(entry)
            .await
            .map_err(|source| HarvestError::EntryPoint {
                url: entry.to_string(),
                source,
            })?;
        adapter.close_overlays(session).await;

        let mut strategy = adapter.pagination();
        let items = match strategy.listing_mode() {
            ListingMode::Cumulative => {
                self.paginate_cumulative(session, strategy.as_mut(), quota)
                    .await?
            }
            ListingMode::PerPage => {
                self.paginate_per_page(session, strategy.as_mut(), quota)
                    .await?
            }
        };

        if items.len() < quota {
            tracing::info!("{}: found {} of {} requested items", name, items.len(), quota);
        } else {
            tracing::info!("{}: found {} items", name, items.len());
        }

        self.transition(CrawlPhase::Enriching)?;
        let articles = self.enrich(session, items).await;

        self.transition(CrawlPhase::Done)?;
        let result: CrawlResult = articles.into_iter().collect();
        tracing::info!("{}: crawl complete with {} articles", name, result.len());

        Ok(result)
    }

    /// Paginates a single growing listing, then reads it once
    async fn paginate_cumulative(
        &mut self,
        session: &mut dyn Session,
        strategy: &mut dyn PaginationStrategy,
        quota: usize,
    ) -> Result<Vec<ListItem>, HarvestError> {
        self.transition(CrawlPhase::Paginating)?;

        let adapter = self.adapter;
        let name = adapter.name();
        let rounds = quota.div_ceil(adapter.list_item_count().max(1));
        let mut last_count: Option<usize> = None;

        for round in 0..rounds {
            tokio::time::sleep(strategy.delay()).await;

            let count = self.count_items(session).await;
            if count >= quota {
                tracing::debug!("{}: {} items rendered after {} advances", name, count, round);
                break;
            }
            if last_count.is_some_and(|last| count <= last) {
                tracing::warn!("{}: listing stopped growing at {} items", name, count);
                break;
            }
            last_count = Some(count);

            if !self.handle_outcome(strategy.advance(session).await) {
                break;
            }
        }

        strategy.settle(session).await;

        self.transition(CrawlPhase::Listing)?;
        let mut items = self.read_items(session).await;
        items.truncate(quota);
        Ok(items)
    }

    /// Reads every visited page, accumulating items across pages
    ///
    /// Runs until the quota is met or the strategy stops advancing. A run of
    /// `MAX_EMPTY_PAGES` pages without items also ends the walk.
    async fn paginate_per_page(
        &mut self,
        session: &mut dyn Session,
        strategy: &mut dyn PaginationStrategy,
        quota: usize,
    ) -> Result<Vec<ListItem>, HarvestError> {
        self.transition(CrawlPhase::Paginating)?;

        let adapter = self.adapter;
        let name = adapter.name();
        let mut items = Vec::new();
        let mut advances = 0;
        let mut empty_pages = 0;

        loop {
            self.transition(CrawlPhase::Listing)?;
            let page = self.read_items(session).await;
            tracing::debug!("{}: {} items on page {}", name, page.len(), advances + 1);

            if page.is_empty() {
                empty_pages += 1;
            } else {
                empty_pages = 0;
            }
            items.extend(page);

            if items.len() >= quota {
                break;
            }
            if empty_pages == MAX_EMPTY_PAGES {
                tracing::warn!(
                    "{}: {} pages in a row without items, stopping at {}",
                    name,
                    empty_pages,
                    items.len()
                );
                break;
            }

            self.transition(CrawlPhase::Paginating)?;
            tokio::time::sleep(strategy.delay()).await;
            advances += 1;

            if !self.handle_outcome(strategy.advance(session).await) {
                self.transition(CrawlPhase::Listing)?;
                break;
            }
        }

        items.truncate(quota);
        Ok(items)
    }

    /// Logs an advance outcome; returns false if pagination should stop
    fn handle_outcome(&self, outcome: PageAdvanceOutcome) -> bool {
        match outcome {
            PageAdvanceOutcome::Advanced => true,
            PageAdvanceOutcome::Blocked(reason) => {
                tracing::warn!(
                    "{}: pagination blocked, continuing with rendered items: {}",
                    self.adapter.name(),
                    reason
                );
                false
            }
            PageAdvanceOutcome::Exhausted => {
                tracing::info!("{}: no more items to load", self.adapter.name());
                false
            }
        }
    }

    async fn count_items(&self, session: &mut dyn Session) -> usize {
        self.read_items(session).await.len()
    }

    async fn read_items(&self, session: &mut dyn Session) -> Vec<ListItem> {
        match self.adapter.extract_list_items(session).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("{}: could not read list items: {}", self.adapter.name(), e);
                Vec::new()
            }
        }
    }

    /// Visits each item's detail page in discovery order
    async fn enrich(&self, session: &mut dyn Session, items: Vec<ListItem>) -> Vec<Article> {
        let name = self.adapter.name();
        let timings = self.adapter.timings();
        let every = timings.detail_sleep_every.max(1);
        let total = items.len();
        let mut articles = Vec::with_capacity(total);

        for (index, item) in items.into_iter().enumerate() {
            if index % every == 0 {
                tokio::time::sleep(timings.detail_delay).await;
            }

            match self.adapter.extract_detail(session, &item.link).await {
                Ok(detail) => {
                    if detail.body.is_empty() {
                        tracing::debug!("{}: no body text at {}", name, item.link);
                    }
                    if detail.published_at.is_none() && item.date_hint.is_none() {
                        tracing::debug!("{}: no publish date at {}", name, item.link);
                    }
                    articles.push(item.into_article(detail));
                }
                Err(e) if e.is_timeout() => {
                    tracing::warn!("{}: timed out loading {}, skipping", name, item.link);
                }
                Err(e) => {
                    tracing::warn!(
                        "{}: failed to load {}, keeping empty fields: {}",
                        name,
                        item.link,
                        e
                    );
                    articles.push(item.into_article(DetailFields::default()));
                }
            }

            if (index + 1) % 10 == 0 {
                tracing::info!("Progress: {}/{} articles enriched", index + 1, total);
            }
        }

        articles
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("{}: {} -> {}", self.adapter.name(), self.phase, next);
        self.phase = next;
        Ok(())
    }
}
