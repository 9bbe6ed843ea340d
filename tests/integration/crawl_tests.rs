//! Integration tests for the crawler
//!
//! These tests drive the coordinator through a scripted in-memory session
//! (see `support.rs`) and check the full Init -> Done cycle end-to-end.

mod support;

use chrono::NaiveDate;
use news_harvest::config::parse_config;
use news_harvest::crawler::{crawl_all, crawl_source, Coordinator, CrawlOptions, CrawlPhase};
use news_harvest::pagination::{archive_date, DateArchive, PageAdvanceOutcome, PaginationStrategy};
use news_harvest::session::{SessionError, SessionLauncher};
use news_harvest::site::PaginationSpec;
use std::time::Duration;
use url::Url;
use news_harvest::{HarvestError, Source};
use support::*;

fn feed_state(listing: Listing) -> FakeState {
    let mut state = FakeState {
        listing: Some(listing),
        ..Default::default()
    };
    for i in 0..100 {
        state.pages.insert(
            story_url(i),
            article_page(&format!("Body {}", i), "10.03.2024 14:35"),
        );
    }
    state
}

#[tokio::test]
async fn test_timed_out_item_is_skipped() {
    let mut state = feed_state(Listing::numbered(2, 2, 2));
    state.timeouts.insert(story_url(1));
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(2).await.unwrap();

    assert_eq!(result.len(), 1);
    let article = result.get(0).unwrap();
    assert_eq!(article.link, story_url(0));
    assert_eq!(article.title, "Story 0");
    assert_eq!(article.body, "Body 0");
    assert_eq!(
        article.published_at,
        day(2024, 3, 10).and_hms_opt(14, 35, 0)
    );
    assert_eq!(article.tags, vec!["News".to_string()]);
    assert_eq!(result.ids(), vec![0]);
}

#[tokio::test]
async fn test_failed_navigation_keeps_item_with_empty_fields() {
    let mut state = feed_state(Listing::numbered(3, 3, 3));
    state.broken.insert(story_url(1));
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(3).await.unwrap();

    assert_eq!(result.ids(), vec![0, 1, 2]);
    let broken = result.get(1).unwrap();
    assert_eq!(broken.link, story_url(1));
    assert_eq!(broken.title, "Story 1");
    assert_eq!(broken.body, "");
    assert_eq!(broken.published_at, None);
    assert_eq!(broken.tags, vec!["News".to_string()]);
    assert_eq!(result.get(2).unwrap().body, "Body 2");
}

#[tokio::test]
async fn test_blocked_pagination_returns_partial_result() {
    let mut listing = Listing::numbered(50, 3, 3);
    listing.clicks_left = Some(0);
    let state = shared(feed_state(listing));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 3);

    let mut coordinator = Coordinator::new(&adapter, &launcher);
    let result = coordinator.run(10).await.unwrap();

    assert_eq!(result.ids(), vec![0, 1, 2]);
    assert_eq!(coordinator.phase(), CrawlPhase::Done);

    let state = state.lock().unwrap();
    assert_eq!(state.clicks, 0);
    assert_eq!(state.closes, 1);
}

#[tokio::test]
async fn test_blocked_after_some_clicks() {
    let mut listing = Listing::numbered(50, 3, 3);
    listing.clicks_left = Some(2);
    let state = shared(feed_state(listing));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 3);

    let result = Coordinator::new(&adapter, &launcher).run(20).await.unwrap();

    assert_eq!(result.len(), 9);
    assert_eq!(state.lock().unwrap().clicks, 2);
}

#[tokio::test]
async fn test_list_truncated_to_quota_without_paginating() {
    let state = shared(feed_state(Listing::numbered(10, 5, 5)));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 5);

    let result = Coordinator::new(&adapter, &launcher).run(3).await.unwrap();

    let links: Vec<_> = result.iter().map(|a| a.link.clone()).collect();
    assert_eq!(links, vec![story_url(0), story_url(1), story_url(2)]);
    assert_eq!(state.lock().unwrap().clicks, 0);
}

#[tokio::test]
async fn test_pagination_loop_is_bounded() {
    // 15 items per page, quota 40: at most ceil(40 / 15) = 3 advances
    let state = shared(feed_state(Listing::numbered(100, 15, 5)));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(40).await.unwrap();

    assert_eq!(state.lock().unwrap().clicks, 3);
    assert_eq!(result.len(), 30);
    assert_eq!(result.ids(), (0..30).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_pagination_stops_once_quota_rendered() {
    let state = shared(feed_state(Listing::numbered(100, 15, 15)));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(40).await.unwrap();

    assert_eq!(result.len(), 40);
    assert_eq!(state.lock().unwrap().clicks, 2);
}

#[tokio::test]
async fn test_infinite_scroll_grows_and_stalls() {
    let mut listing = Listing::numbered(6, 2, 2);
    listing.grows_on_scroll = true;
    let state = shared(feed_state(listing));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(PaginationSpec::InfiniteScroll, 2);

    let result = Coordinator::new(&adapter, &launcher).run(20).await.unwrap();

    assert_eq!(result.len(), 6);
    // 2 -> 4 -> 6 -> 6 (stall), then one settling scroll
    assert_eq!(state.lock().unwrap().scrolls, 4);
}

#[tokio::test]
async fn test_missing_fields_soft_fail() {
    let mut state = feed_state(Listing::numbered(2, 2, 2));
    state
        .pages
        .insert(story_url(0), "<html><body><p>Paywall</p></body></html>".to_string());
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(2).await.unwrap();

    assert_eq!(result.len(), 2);
    let first = result.get(0).unwrap();
    assert_eq!(first.body, "");
    assert_eq!(first.published_at, None);
    assert_eq!(result.get(1).unwrap().body, "Body 1");
}

#[tokio::test]
async fn test_entry_point_failure_closes_session() {
    let mut state = feed_state(Listing::numbered(2, 2, 2));
    state.timeouts.insert(LISTING_URL.to_string());
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(2).await;

    assert!(matches!(
        result,
        Err(HarvestError::EntryPoint {
            source: SessionError::Timeout { .. },
            ..
        })
    ));
    let state = state.lock().unwrap();
    assert_eq!(state.launches, 1);
    assert_eq!(state.closes, 1);
}

#[tokio::test]
async fn test_launch_failure_is_fatal() {
    let mut state = feed_state(Listing::numbered(2, 2, 2));
    state.fail_launch = true;
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let result = Coordinator::new(&adapter, &launcher).run(2).await;

    assert!(matches!(
        result,
        Err(HarvestError::Session(SessionError::Launch(_)))
    ));
    assert_eq!(state.lock().unwrap().closes, 0);
}

#[tokio::test]
async fn test_zero_quota_does_not_launch() {
    let state = shared(feed_state(Listing::numbered(2, 2, 2)));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 15);

    let mut coordinator = Coordinator::new(&adapter, &launcher);
    let result = coordinator.run(0).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert_eq!(state.lock().unwrap().launches, 0);
}

#[tokio::test]
async fn test_session_closed_after_success() {
    let state = shared(feed_state(Listing::numbered(4, 4, 4)));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = feed_adapter(click_more(), 4);

    Coordinator::new(&adapter, &launcher).run(4).await.unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.launches, 1);
    assert_eq!(state.closes, 1);
    assert_eq!(state.visited.first().map(String::as_str), Some(LISTING_URL));
}

fn archive_state(category: &str) -> FakeState {
    let mut state = FakeState::default();
    let days = [day(2024, 3, 12), day(2024, 3, 11), day(2024, 3, 10)];
    for (n, d) in days.iter().enumerate() {
        let first = format!("/{}/{}-a", category, n);
        let second = format!("/{}/{}-b", category, n);
        state.pages.insert(
            archive_url(category, *d).to_string(),
            archive_page(&[&first, &second]),
        );
        for href in [first, second] {
            state.pages.insert(
                format!("{}{}", ARCHIVE_ROOT, href),
                article_page(&format!("Text of {}", href), ""),
            );
        }
    }
    state
}

#[tokio::test]
async fn test_archive_accumulates_across_days() {
    let state = shared(archive_state("politics"));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = archive_adapter("politics", day(2024, 3, 12), 2);

    let result = Coordinator::new(&adapter, &launcher).run(5).await.unwrap();

    assert_eq!(result.ids(), vec![0, 1, 2, 3, 4]);
    let first = result.get(0).unwrap();
    assert_eq!(first.link, "https://archive.test/politics/0-a");
    assert_eq!(first.tags, vec!["politics".to_string()]);
    assert_eq!(first.published_at, day(2024, 3, 12).and_hms_opt(0, 0, 0));
    assert_eq!(first.body, "Text of /politics/0-a");

    let last = result.get(4).unwrap();
    assert_eq!(last.link, "https://archive.test/politics/2-a");
    assert_eq!(last.published_at, day(2024, 3, 10).and_hms_opt(0, 0, 0));
}

#[tokio::test]
async fn test_archive_navigation_failure_keeps_collected_items() {
    let mut state = archive_state("politics");
    state
        .timeouts
        .insert(archive_url("politics", day(2024, 3, 11)).to_string());
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = archive_adapter("politics", day(2024, 3, 12), 2);

    let result = Coordinator::new(&adapter, &launcher).run(5).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(state.lock().unwrap().closes, 1);
}

#[tokio::test]
async fn test_archive_walks_past_sparse_days_until_quota() {
    let mut state = FakeState::default();
    let start = day(2024, 3, 12);
    let mut d = start;
    for n in 0..10 {
        let href = format!("/politics/{}", n);
        state
            .pages
            .insert(archive_url("politics", d).to_string(), archive_page(&[&href]));
        state.pages.insert(
            format!("{}{}", ARCHIVE_ROOT, href),
            article_page(&format!("Text {}", n), ""),
        );
        d = d.pred_opt().unwrap();
    }
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapter = archive_adapter("politics", start, 5);

    let result = Coordinator::new(&adapter, &launcher).run(4).await.unwrap();

    assert_eq!(result.ids(), vec![0, 1, 2, 3]);
    assert_eq!(
        result.get(3).unwrap().published_at,
        day(2024, 3, 9).and_hms_opt(0, 0, 0)
    );
}

#[tokio::test]
async fn test_archive_gives_up_after_a_week_of_empty_days() {
    let state = shared(archive_state("politics"));
    let launcher = FakeLauncher::new(state.clone());
    let adapter = archive_adapter("politics", day(2024, 3, 12), 2);

    let result = Coordinator::new(&adapter, &launcher).run(50).await.unwrap();

    assert_eq!(result.len(), 6);
    let state = state.lock().unwrap();
    let archive_pages = state
        .visited
        .iter()
        .filter(|url| archive_date(url).is_some())
        .count();
    // 3 populated days, then 7 empty ones
    assert_eq!(archive_pages, 10);
    assert_eq!(state.closes, 1);
}

#[tokio::test]
async fn test_archive_exhausted_at_calendar_start() {
    let state = shared(FakeState::default());
    let launcher = FakeLauncher::new(state.clone());
    let mut session = launcher.launch().await.unwrap();
    let root = Url::parse(ARCHIVE_ROOT).unwrap();

    let mut archive = DateArchive::new(root.clone(), "politics", NaiveDate::MIN, Duration::ZERO);
    assert_eq!(
        archive.advance(session.as_mut()).await,
        PageAdvanceOutcome::Exhausted
    );

    let mut archive = DateArchive::new(root, "politics", day(2024, 3, 1), Duration::ZERO);
    assert_eq!(
        archive.advance(session.as_mut()).await,
        PageAdvanceOutcome::Advanced
    );
    assert_eq!(
        state.lock().unwrap().current,
        archive_url("politics", day(2024, 2, 29)).to_string()
    );
}

#[tokio::test]
async fn test_categories_merge_with_renumbering() {
    let mut state = archive_state("politics");
    state.pages.extend(archive_state("society").pages);
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let adapters = vec![
        archive_adapter("politics", day(2024, 3, 12), 5),
        archive_adapter("society", day(2024, 3, 12), 5),
    ];

    let result = crawl_all(&adapters, 3, &launcher).await.unwrap();

    assert_eq!(result.ids(), vec![0, 1, 2]);
    let tags: Vec<_> = result.iter().map(|a| a.tags[0].clone()).collect();
    assert_eq!(tags, vec!["politics", "society", "society"]);

    let state = state.lock().unwrap();
    assert_eq!(state.launches, 2);
    assert_eq!(state.closes, 2);
}

#[tokio::test]
async fn test_crawl_source_panorama_end_to_end() {
    let config = parse_config(
        r#"
[sites.panorama]
pagination-delay = 0
detail-delay = 0
"#,
    )
    .unwrap();

    let mut state = FakeState::default();
    for category in ["politics", "society"] {
        state.pages.insert(
            format!("https://panorama.pub/{}/12-03-2024", category),
            format!(
                r#"<html><body>
                <a class="flex flex-col rounded-md mb-2" href="/news/{c}-1"><div>09:15</div><div>First {c}</div></a>
                <a class="flex flex-col rounded-md mb-2" href="/news/{c}-2"><div>08:00</div><div>Second {c}</div></a>
                </body></html>"#,
                c = category
            ),
        );
        for n in 1..=2 {
            state.pages.insert(
                format!("https://panorama.pub/news/{}-{}", category, n),
                r#"<div class="entry-contents pr-0"><p>Текст.</p></div>"#.to_string(),
            );
        }
    }
    let state = shared(state);
    let launcher = FakeLauncher::new(state.clone());
    let options = CrawlOptions {
        categories: None,
        from_date: Some(day(2024, 3, 12)),
    };

    let result = crawl_source(Source::Panorama, 3, &config, &launcher, &options)
        .await
        .unwrap();

    let titles: Vec<_> = result.iter().map(|a| a.title.clone()).collect();
    assert_eq!(titles, vec!["First politics", "First society", "Second society"]);
    assert!(result.iter().all(|a| a.body == "Текст."));
    assert!(result
        .iter()
        .all(|a| a.published_at == day(2024, 3, 12).and_hms_opt(0, 0, 0)));
}

#[tokio::test]
async fn test_crawl_source_rejects_categories_for_single_feed() {
    let state = shared(FakeState::default());
    let launcher = FakeLauncher::new(state.clone());
    let options = CrawlOptions {
        categories: Some(vec!["politics".to_string()]),
        from_date: None,
    };

    let result = crawl_source(Source::Rt, 5, &Default::default(), &launcher, &options).await;

    assert!(matches!(result, Err(HarvestError::Config(_))));
    assert_eq!(state.lock().unwrap().launches, 0);
}
