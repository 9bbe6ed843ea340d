//! Crawler module - the crawl orchestrator
//!
//! This module contains the core crawling logic, including:
//! - The phase state machine of a single crawl run
//! - The coordinator driving an adapter and its pagination strategy
//! - Quota distribution and result merging across categories

mod aggregate;
mod coordinator;
mod phase;

pub use aggregate::{crawl_all, crawl_source, split_quota, CrawlOptions};
pub use coordinator::Coordinator;
pub use phase::CrawlPhase;
