use super::{PageAdvanceOutcome, PaginationStrategy};
use crate::session::{Locator, Session};
use async_trait::async_trait;
use std::time::Duration;

/// Activates a "load more" control
///
/// Never reports `Exhausted`: a missing or non-interactable control is
/// reported as `Blocked`.
#[derive(Debug, Clone)]
pub struct ClickToLoad {
    button: Locator,
    reveal: Option<Locator>,
    delay: Duration,
}

impl ClickToLoad {
    /// Creates a click strategy
    ///
    /// `reveal` is an element near the end of the listing (usually the footer)
    /// scrolled into view before each click and when settling; without it the
    /// strategy settles by scrolling to the bottom.
    pub fn new(button: Locator, reveal: Option<Locator>, delay: Duration) -> Self {
        Self {
            button,
            reveal,
            delay,
        }
    }

    async fn reveal(&self, session: &mut dyn Session) {
        let result = match &self.reveal {
            Some(anchor) => session.scroll_into_view(anchor).await,
            None => session.scroll_to_bottom().await,
        };
        if let Err(e) = result {
            tracing::debug!("Could not scroll listing end into view: {}", e);
        }
    }
}

#[async_trait]
impl PaginationStrategy for ClickToLoad {
    fn delay(&self) -> Duration {
        self.delay
    }

    async fn advance(&mut self, session: &mut dyn Session) -> PageAdvanceOutcome {
        if self.reveal.is_some() {
            self.reveal(session).await;
        }

        match session.click(&self.button).await {
            Ok(()) => PageAdvanceOutcome::Advanced,
            Err(e) => PageAdvanceOutcome::Blocked(e.to_string()),
        }
    }

    async fn settle(&mut self, session: &mut dyn Session) {
        self.reveal(session).await;
    }
}
