//! Chrome-based driver implementation using chromiumoxide
//!
//! One browser process and one page per run. Explicit waits are poll loops
//! with exponential backoff, since CDP has no server-side element wait.

use crate::config::BrowserSettings;
use crate::driver::{Driver, DriverError, DriverResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Initial poll interval for explicit waits; doubles up to [`MAX_POLL_INTERVAL`].
const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(100);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A headless Chrome session owned for the duration of one run.
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromeDriver {
    /// Launches a browser process and opens the single page used for the run.
    ///
    /// # Arguments
    ///
    /// * `settings` - Browser session configuration (headless mode, user
    ///   agent, language)
    ///
    /// # Returns
    ///
    /// * `Ok(ChromeDriver)` - Session is up and ready to navigate
    /// * `Err(DriverError)` - The browser could not be started
    pub async fn launch(settings: &BrowserSettings) -> DriverResult<Self> {
        tracing::info!("Launching browser session");

        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--lang={}", settings.language))
            .arg(format!("--user-agent={}", settings.user_agent));

        if !settings.headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(DriverError::Session)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            DriverError::Session(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Drive the CDP event stream for the lifetime of the session
        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| DriverError::Session(format!("Failed to open page: {}", e)))?;

        tracing::info!("Browser session ready");

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }
}

#[async_trait(?Send)]
impl Driver for ChromeDriver {
    type Element = Element;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.page.goto(url).await.map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<Element> {
        let start = Instant::now();
        let mut poll_interval = INITIAL_POLL_INTERVAL;

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }

            if start.elapsed() >= timeout {
                return Err(DriverError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
        }
    }

    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<Element>> {
        let start = Instant::now();
        let mut poll_interval = INITIAL_POLL_INTERVAL;

        loop {
            if let Ok(elements) = self.page.find_elements(selector).await {
                if !elements.is_empty() {
                    return Ok(elements);
                }
            }

            if start.elapsed() >= timeout {
                return Err(DriverError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
        }
    }

    async fn find(&self, selector: &str) -> DriverResult<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|_| DriverError::NotFound(selector.to_string()))
    }

    async fn find_in(&self, scope: &Element, selector: &str) -> DriverResult<Element> {
        scope
            .find_element(selector)
            .await
            .map_err(|_| DriverError::NotFound(selector.to_string()))
    }

    async fn find_all_in(&self, scope: &Element, selector: &str) -> DriverResult<Vec<Element>> {
        scope
            .find_elements(selector)
            .await
            .map_err(|_| DriverError::NotFound(selector.to_string()))
    }

    async fn text(&self, element: &Element) -> DriverResult<String> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| DriverError::Session(format!("Failed to read element text: {}", e)))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn attribute(&self, element: &Element, name: &str) -> DriverResult<Option<String>> {
        element
            .attribute(name)
            .await
            .map_err(|e| DriverError::Session(format!("Failed to read attribute {}: {}", name, e)))
    }

    async fn click(&self, element: &Element) -> DriverResult<()> {
        element
            .click()
            .await
            .map_err(|e| DriverError::Session(format!("Click failed: {}", e)))?;
        Ok(())
    }

    async fn page_source(&self) -> DriverResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| DriverError::Session(format!("Failed to capture page markup: {}", e)))
    }

    async fn quit(mut self) -> DriverResult<()> {
        tracing::info!("Shutting down the browser session");

        let result = self
            .browser
            .close()
            .await
            .map_err(|e| DriverError::Session(format!("Browser shutdown failed: {}", e)));

        // The event stream ends once the process is gone; stop pumping it
        // even if close() failed.
        self.handler_task.abort();

        result.map(|_| ())
    }
}
