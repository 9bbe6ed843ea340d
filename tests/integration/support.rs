//! Scripted in-memory browsing session for integration tests
//!
//! Pages are served from a map keyed by URL. One URL may be a "listing": a
//! growing feed whose rendered size increases on clicks of `.more` or on
//! scrolls, depending on how it is configured.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use news_harvest::session::{Locator, Session, SessionError, SessionLauncher, SessionResult};
use news_harvest::site::{
    DetailSelectors, ListSelectors, PaginationSpec, ProfileAdapter, SiteProfile, SiteTimings,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use url::Url;

pub const LISTING_URL: &str = "https://news.test/feed";
pub const ARCHIVE_ROOT: &str = "https://archive.test";

/// A feed that renders more items as it is paginated
#[derive(Debug, Clone)]
pub struct Listing {
    /// (title, href) of every item the feed can ever show
    pub items: Vec<(String, String)>,
    pub rendered: usize,
    pub batch: usize,
    /// Remaining successful clicks; None means unlimited
    pub clicks_left: Option<usize>,
    /// Scrolling to the bottom renders another batch
    pub grows_on_scroll: bool,
}

impl Listing {
    /// Items linking to `https://news.test/story/{i}`
    pub fn numbered(total: usize, rendered: usize, batch: usize) -> Self {
        Self {
            items: (0..total)
                .map(|i| (format!("Story {}", i), format!("/story/{}", i)))
                .collect(),
            rendered,
            batch,
            clicks_left: None,
            grows_on_scroll: false,
        }
    }

    fn grow(&mut self) {
        self.rendered = (self.rendered + self.batch).min(self.items.len());
    }

    fn render(&self) -> String {
        let cards: String = self.items[..self.rendered]
            .iter()
            .map(|(title, href)| card(title, href))
            .collect();
        format!("<html><body><div class=\"feed\">{}</div></body></html>", cards)
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub pages: HashMap<String, String>,
    pub listing: Option<Listing>,
    pub timeouts: HashSet<String>,
    pub broken: HashSet<String>,
    pub current: String,
    pub visited: Vec<String>,
    pub clicks: usize,
    pub scrolls: usize,
    pub launches: usize,
    pub closes: usize,
    pub fail_launch: bool,
}

pub type SharedState = Arc<Mutex<FakeState>>;

pub fn shared(state: FakeState) -> SharedState {
    Arc::new(Mutex::new(state))
}

pub struct FakeSession {
    state: SharedState,
    closed: bool,
}

#[async_trait]
impl Session for FakeSession {
    async fn goto(&mut self, url: &str) -> SessionResult<()> {
        let mut state = self.state.lock().unwrap();
        state.visited.push(url.to_string());
        if state.timeouts.contains(url) {
            return Err(SessionError::Timeout {
                url: url.to_string(),
            });
        }
        if state.broken.contains(url) {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }
        state.current = url.to_string();
        Ok(())
    }

    async fn current_url(&mut self) -> SessionResult<String> {
        Ok(self.state.lock().unwrap().current.clone())
    }

    async fn content(&mut self) -> SessionResult<String> {
        let state = self.state.lock().unwrap();
        if state.current == LISTING_URL {
            if let Some(listing) = &state.listing {
                return Ok(listing.render());
            }
        }
        Ok(state
            .pages
            .get(&state.current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn click(&mut self, locator: &Locator) -> SessionResult<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        let on_listing = state.current == LISTING_URL;
        match (&mut state.listing, locator) {
            (Some(listing), Locator::Css(css)) if on_listing && css == ".more" => {
                match listing.clicks_left {
                    Some(0) => Err(SessionError::NotInteractable {
                        locator: locator.clone(),
                        message: "element is covered by another element".to_string(),
                    }),
                    left => {
                        listing.clicks_left = left.map(|n| n - 1);
                        listing.grow();
                        state.clicks += 1;
                        Ok(())
                    }
                }
            }
            _ => Err(SessionError::NotFound {
                locator: locator.clone(),
            }),
        }
    }

    async fn scroll_into_view(&mut self, _locator: &Locator) -> SessionResult<()> {
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> SessionResult<()> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.scrolls += 1;
        let on_listing = state.current == LISTING_URL;
        if let Some(listing) = &mut state.listing {
            if on_listing && listing.grows_on_scroll {
                listing.grow();
            }
        }
        Ok(())
    }

    async fn close(&mut self) -> SessionResult<()> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().closes += 1;
        }
        Ok(())
    }
}

pub struct FakeLauncher {
    pub state: SharedState,
}

impl FakeLauncher {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn launch(&self) -> SessionResult<Box<dyn Session>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_launch {
            return Err(SessionError::Launch(
                "Could not auto detect a chrome executable".to_string(),
            ));
        }
        state.launches += 1;
        Ok(Box::new(FakeSession {
            state: Arc::clone(&self.state),
            closed: false,
        }))
    }
}

/// A listing card matching `feed_profile`
pub fn card(title: &str, href: &str) -> String {
    format!(
        "<div class=\"card\"><a class=\"card__link\" href=\"{}\">{}</a><span class=\"card__tag\">News</span></div>",
        href, title
    )
}

/// An article page matching `feed_profile`
pub fn article_page(body: &str, date: &str) -> String {
    format!(
        "<html><body><span class=\"date\">{}</span><div class=\"body\"><p>{}</p></div></body></html>",
        date, body
    )
}

pub fn story_url(i: usize) -> String {
    format!("https://news.test/story/{}", i)
}

fn selectors() -> (ListSelectors, DetailSelectors) {
    (
        ListSelectors {
            item: ".card".to_string(),
            link: Some(".card__link".to_string()),
            title: Some(".card__link".to_string()),
            subtitle: None,
            tag: Some(".card__tag".to_string()),
        },
        DetailSelectors {
            body: vec![".body".to_string()],
            date: Some(".date".to_string()),
        },
    )
}

/// Adapter over the scripted listing at `LISTING_URL`
pub fn feed_adapter(pagination: PaginationSpec, list_item_count: usize) -> ProfileAdapter {
    let (list, detail) = selectors();
    let profile = SiteProfile {
        name: "feed".to_string(),
        base_url: Url::parse(LISTING_URL).unwrap(),
        overlays: vec![Locator::css(".cookie-banner__close")],
        list,
        detail,
        pagination,
        fixed_tag: None,
    };
    ProfileAdapter::new(profile, SiteTimings::without_delays(list_item_count)).unwrap()
}

pub fn click_more() -> PaginationSpec {
    PaginationSpec::ClickToLoad {
        button: Locator::css(".more"),
        reveal: None,
    }
}

/// Adapter over a date-paged archive of one category under `ARCHIVE_ROOT`
pub fn archive_adapter(category: &str, start: NaiveDate, list_item_count: usize) -> ProfileAdapter {
    let (list, mut detail) = selectors();
    detail.date = None;
    let root = Url::parse(ARCHIVE_ROOT).unwrap();
    let profile = SiteProfile {
        name: format!("archive/{}", category),
        base_url: archive_url(category, start),
        overlays: Vec::new(),
        list,
        detail,
        pagination: PaginationSpec::DateArchive {
            root,
            category: category.to_string(),
            start,
        },
        fixed_tag: Some(category.to_string()),
    };
    ProfileAdapter::new(profile, SiteTimings::without_delays(list_item_count)).unwrap()
}

pub fn archive_url(category: &str, day: NaiveDate) -> Url {
    Url::parse(&format!(
        "{}/{}/{}",
        ARCHIVE_ROOT,
        category,
        day.format("%d-%m-%Y")
    ))
    .unwrap()
}

/// An archive page listing `links` as cards
pub fn archive_page(links: &[&str]) -> String {
    let cards: String = links
        .iter()
        .map(|href| card(&format!("Item {}", href), href))
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
