//! chromiumoxide-backed browsing session
//!
//! A `BrowserLauncher` starts one Chrome process per session and opens a single
//! page in it. The CDP event handler runs on its own task for the lifetime of
//! the session and is stopped when the session closes.

use crate::config::BrowserConfig;
use crate::session::{Locator, Session, SessionError, SessionLauncher, SessionResult};
use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig as CdpBrowserConfig, Element, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Launches chromiumoxide browser sessions
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    config: BrowserConfig,
}

impl BrowserLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Builds the chromiumoxide launch configuration
    fn cdp_config(&self) -> SessionResult<CdpBrowserConfig> {
        let mut builder = CdpBrowserConfig::builder()
            .no_sandbox()
            .window_size(self.config.window_width, self.config.window_height)
            .request_timeout(self.config.page_load_timeout())
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !self.config.headless {
            builder = builder.with_head();
        }

        if let Some(executable) = &self.config.chrome_executable {
            builder = builder.chrome_executable(executable);
        }

        builder.build().map_err(SessionError::Launch)
    }
}

#[async_trait]
impl SessionLauncher for BrowserLauncher {
    async fn launch(&self) -> SessionResult<Box<dyn Session>> {
        let (mut browser, mut handler) = Browser::launch(self.cdp_config()?)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // Don't leave the Chrome process behind
                let _ = browser.close().await;
                handler_task.abort();
                return Err(SessionError::Launch(e.to_string()));
            }
        };

        tracing::debug!(
            "Browser session started (headless: {})",
            self.config.headless
        );

        Ok(Box::new(BrowserSession {
            browser,
            page,
            handler_task,
            page_load_timeout: self.config.page_load_timeout(),
            closed: false,
        }))
    }
}

/// A live chromiumoxide browser with a single page
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    page_load_timeout: Duration,
    closed: bool,
}

impl BrowserSession {
    fn ensure_open(&self) -> SessionResult<()> {
        if self.closed {
            Err(SessionError::Closed)
        } else {
            Ok(())
        }
    }

    async fn find(&self, locator: &Locator) -> SessionResult<Element> {
        let found = match locator {
            Locator::Css(selector) => self.page.find_element(selector.as_str()).await,
            Locator::LinkText(text) => self.page.find_xpath(link_text_xpath(text)).await,
        };

        found.map_err(|_| SessionError::NotFound {
            locator: locator.clone(),
        })
    }
}

#[async_trait]
impl Session for BrowserSession {
    async fn goto(&mut self, url: &str) -> SessionResult<()> {
        self.ensure_open()?;

        match tokio::time::timeout(self.page_load_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(CdpError::Timeout)) | Err(_) => Err(SessionError::Timeout {
                url: url.to_string(),
            }),
            Ok(Err(e)) => Err(SessionError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
        }
    }

    async fn current_url(&mut self) -> SessionResult<String> {
        self.ensure_open()?;

        self.page
            .url()
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?
            .ok_or_else(|| SessionError::Browser("page has no URL".to_string()))
    }

    async fn content(&mut self) -> SessionResult<String> {
        self.ensure_open()?;

        self.page
            .content()
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))
    }

    async fn click(&mut self, locator: &Locator) -> SessionResult<()> {
        self.ensure_open()?;

        let element = self.find(locator).await?;
        element
            .click()
            .await
            .map_err(|e| SessionError::NotInteractable {
                locator: locator.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> SessionResult<()> {
        self.ensure_open()?;

        let element = self.find(locator).await?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| SessionError::NotInteractable {
                locator: locator.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> SessionResult<()> {
        self.ensure_open()?;

        self.page
            .evaluate(SCROLL_TO_BOTTOM)
            .await
            .map_err(|e| SessionError::Script(e.to_string()))?;
        Ok(())
    }

    async fn close(&mut self) -> SessionResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        closed
            .map(|_| ())
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        tracing::debug!("Browser session closed");
        Ok(())
    }
}

/// Builds an XPath matching anchors whose normalized text equals `text`
fn link_text_xpath(text: &str) -> String {
    format!("//a[normalize-space(.)={}]", xpath_literal(text.trim()))
}

/// Quotes a string as an XPath 1.0 literal
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let parts: Vec<String> = text.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
