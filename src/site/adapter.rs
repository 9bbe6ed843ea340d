use super::dates::parse_date;
use super::dom::{resolve_link, visible_text};
use super::profile::{PaginationSpec, SiteProfile};
use super::SiteTimings;
use crate::model::{DetailFields, ListItem};
use crate::pagination::{
    archive_date, ClickToLoad, DateArchive, InfiniteScroll, PaginationStrategy,
};
use crate::session::{Session, SessionResult};
use crate::ConfigError;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Site-specific navigation and extraction primitives
///
/// Extraction never fails on missing elements: malformed list entries are
/// skipped and missing detail fields come back empty. Only session-level
/// failures (navigation, closed browser) are returned as errors.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Entry point of the crawl
    fn base_url(&self) -> &Url;

    fn timings(&self) -> &SiteTimings;

    /// Nominal items rendered per page, scroll or click
    fn list_item_count(&self) -> usize {
        self.timings().list_item_count
    }

    /// Creates a fresh pagination strategy positioned at the entry point
    fn pagination(&self) -> Box<dyn PaginationStrategy>;

    /// Best-effort dismissal of popups and banners; failures are swallowed
    async fn close_overlays(&self, session: &mut dyn Session);

    /// Reads the list items currently rendered, in document order
    ///
    /// Calling this repeatedly on the same page yields the same items.
    async fn extract_list_items(&self, session: &mut dyn Session) -> SessionResult<Vec<ListItem>>;

    /// Navigates to `link` and reads the article body and publish date
    async fn extract_detail(
        &self,
        session: &mut dyn Session,
        link: &str,
    ) -> SessionResult<DetailFields>;
}

struct CompiledSelectors {
    item: Selector,
    link: Option<Selector>,
    title: Option<Selector>,
    subtitle: Option<Selector>,
    tag: Option<Selector>,
    body: Vec<Selector>,
    date: Option<Selector>,
}

/// The adapter shared by all sources, driven by a `SiteProfile`
pub struct ProfileAdapter {
    profile: SiteProfile,
    timings: SiteTimings,
    selectors: CompiledSelectors,
}

impl ProfileAdapter {
    /// Creates an adapter, compiling every selector of the profile
    pub fn new(profile: SiteProfile, timings: SiteTimings) -> Result<Self, ConfigError> {
        let selectors = CompiledSelectors {
            item: compile(&profile.list.item)?,
            link: compile_optional(&profile.list.link)?,
            title: compile_optional(&profile.list.title)?,
            subtitle: compile_optional(&profile.list.subtitle)?,
            tag: compile_optional(&profile.list.tag)?,
            body: profile
                .detail
                .body
                .iter()
                .map(|css| compile(css))
                .collect::<Result<_, _>>()?,
            date: compile_optional(&profile.detail.date)?,
        };

        Ok(Self {
            profile,
            timings,
            selectors,
        })
    }

    /// Parses list items out of a listing page
    ///
    /// `date_hint` is attached to every item found.
    pub fn parse_list(&self, html: &str, date_hint: Option<NaiveDate>) -> Vec<ListItem> {
        let document = Html::parse_document(html);
        let date_hint = date_hint.map(|day| day.and_time(NaiveTime::MIN));

        document
            .select(&self.selectors.item)
            .filter_map(|element| {
                let item = self.parse_list_entry(element, date_hint);
                if item.is_none() {
                    tracing::debug!("{}: skipping malformed list entry", self.profile.name);
                }
                item
            })
            .collect()
    }

    fn parse_list_entry(
        &self,
        element: ElementRef<'_>,
        date_hint: Option<chrono::NaiveDateTime>,
    ) -> Option<ListItem> {
        let href = match &self.selectors.link {
            Some(selector) => element.select(selector).next()?.value().attr("href")?,
            None => element.value().attr("href")?,
        };
        let link = resolve_link(href, &self.profile.base_url)?;

        let title = match &self.selectors.title {
            Some(selector) => visible_text(element.select(selector).next()?),
            None => visible_text(element).lines().last()?.to_string(),
        };
        if title.is_empty() {
            return None;
        }

        let subtitle = self
            .selectors
            .subtitle
            .as_ref()
            .and_then(|selector| first_text(element, selector));

        let tag = match &self.profile.fixed_tag {
            Some(tag) => Some(tag.clone()),
            None => self
                .selectors
                .tag
                .as_ref()
                .and_then(|selector| first_text(element, selector)),
        };

        Some(ListItem {
            title,
            subtitle,
            link,
            tag,
            date_hint,
        })
    }

    /// Parses body and publish date out of an article page
    ///
    /// The body is empty if any of its fragments is missing. Each date element
    /// is tried in document order, its `datetime` attribute before its text.
    pub fn parse_detail(&self, html: &str, today: NaiveDate) -> DetailFields {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let fragments: Option<Vec<String>> = self
            .selectors
            .body
            .iter()
            .map(|selector| root.select(selector).next().map(visible_text))
            .collect();
        let body = fragments.map(|parts| parts.join("\n")).unwrap_or_default();

        let published_at = self.selectors.date.as_ref().and_then(|selector| {
            root.select(selector).find_map(|element| {
                element
                    .value()
                    .attr("datetime")
                    .and_then(|value| parse_date(value, today))
                    .or_else(|| parse_date(&visible_text(element), today))
            })
        });

        DetailFields { body, published_at }
    }
}

#[async_trait]
impl SiteAdapter for ProfileAdapter {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn base_url(&self) -> &Url {
        &self.profile.base_url
    }

    fn timings(&self) -> &SiteTimings {
        &self.timings
    }

    fn pagination(&self) -> Box<dyn PaginationStrategy> {
        let delay = self.timings.pagination_delay;
        match &self.profile.pagination {
            PaginationSpec::ClickToLoad { button, reveal } => {
                Box::new(ClickToLoad::new(button.clone(), reveal.clone(), delay))
            }
            PaginationSpec::InfiniteScroll => Box::new(InfiniteScroll::new(delay)),
            PaginationSpec::DateArchive {
                root,
                category,
                start,
            } => Box::new(DateArchive::new(root.clone(), category.clone(), *start, delay)),
        }
    }

    async fn close_overlays(&self, session: &mut dyn Session) {
        for overlay in &self.profile.overlays {
            match session.click(overlay).await {
                Ok(()) => tracing::debug!("{}: dismissed overlay {}", self.profile.name, overlay),
                Err(e) => tracing::debug!("{}: overlay not dismissed: {}", self.profile.name, e),
            }
        }
    }

    async fn extract_list_items(&self, session: &mut dyn Session) -> SessionResult<Vec<ListItem>> {
        let date_hint = if self.profile.pagination.is_archive() {
            archive_date(&session.current_url().await?)
        } else {
            None
        };
        let html = session.content().await?;
        Ok(self.parse_list(&html, date_hint))
    }

    async fn extract_detail(
        &self,
        session: &mut dyn Session,
        link: &str,
    ) -> SessionResult<DetailFields> {
        session.goto(link).await?;
        let html = session.content().await?;
        Ok(self.parse_detail(&html, Local::now().date_naive()))
    }
}

fn compile(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css)
        .map_err(|e| ConfigError::Validation(format!("invalid selector '{}': {:?}", css, e)))
}

fn compile_optional(css: &Option<String>) -> Result<Option<Selector>, ConfigError> {
    css.as_deref().map(compile).transpose()
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .map(visible_text)
        .next()
        .filter(|text| !text.is_empty())
}
