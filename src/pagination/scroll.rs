use super::{PageAdvanceOutcome, PaginationStrategy};
use crate::session::Session;
use async_trait::async_trait;
use std::time::Duration;

/// Scrolls the viewport to the document's current bottom
///
/// Always reports `Advanced`; stalls are detected by the crawl loop from the
/// rendered item count.
#[derive(Debug, Clone)]
pub struct InfiniteScroll {
    delay: Duration,
}

impl InfiniteScroll {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaginationStrategy for InfiniteScroll {
    fn delay(&self) -> Duration {
        self.delay
    }

    async fn advance(&mut self, session: &mut dyn Session) -> PageAdvanceOutcome {
        if let Err(e) = session.scroll_to_bottom().await {
            tracing::debug!("Scroll failed: {}", e);
        }
        PageAdvanceOutcome::Advanced
    }

    async fn settle(&mut self, session: &mut dyn Session) {
        if let Err(e) = session.scroll_to_bottom().await {
            tracing::debug!("Settling scroll failed: {}", e);
        }
    }
}
