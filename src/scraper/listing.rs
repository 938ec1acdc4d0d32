//! Chart listing resolution
//!
//! Navigates to the index page, dismisses the consent overlay when one is
//! shown, waits for the chart entries, and collects their detail-page links
//! in presentation order. A single unresolvable entry is skipped, never
//! fatal; only a listing that never appears yields an empty sequence.

use crate::driver::Driver;
use crate::scraper::debug::save_debug_page;
use crate::scraper::selectors;
use std::path::Path;
use std::time::Duration;

/// Settle time after clicking the consent button, so the overlay can clear.
const CONSENT_SETTLE: Duration = Duration::from_secs(1);

/// Pause between scans of the candidate buttons while the overlay may still
/// be rendering.
const CONSENT_POLL: Duration = Duration::from_millis(100);

/// Resolves the ordered set of detail-page links from the chart index.
pub struct ListingResolver<'a, D: Driver> {
    driver: &'a D,
    debug_dir: &'a Path,
    list_timeout: Duration,
    overlay_timeout: Duration,
}

impl<'a, D: Driver> ListingResolver<'a, D> {
    pub fn new(
        driver: &'a D,
        debug_dir: &'a Path,
        list_timeout: Duration,
        overlay_timeout: Duration,
    ) -> Self {
        Self {
            driver,
            debug_dir,
            list_timeout,
            overlay_timeout,
        }
    }

    /// Resolves the detail-page links listed at `index_url`.
    ///
    /// Returns the links in page presentation order; an empty vector when
    /// the listing never appeared (after an error diagnostic and a debug
    /// markup capture tagged `"filmlist"`).
    pub async fn resolve(&self, index_url: &str) -> Vec<String> {
        tracing::info!("Navigating to the chart index to collect movie links");

        if let Err(e) = self.driver.navigate(index_url).await {
            tracing::error!(url = index_url, "Could not open the chart index: {}", e);
            return Vec::new();
        }

        self.dismiss_consent_overlay().await;

        let items = match self
            .driver
            .wait_for_all(selectors::LIST_ITEM, self.list_timeout)
            .await
        {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Timed out loading the chart listing: {}", e);
                save_debug_page(self.driver, self.debug_dir, "filmlist").await;
                return Vec::new();
            }
        };

        let mut links = Vec::new();
        for item in &items {
            match self.resolve_item_link(item).await {
                Some(href) => links.push(href),
                None => {
                    tracing::warn!("Link element missing for one chart entry. Skipping.");
                }
            }
        }

        tracing::info!("Found {} movie links", links.len());
        links
    }

    /// Reads the detail-page URL nested inside one chart entry.
    async fn resolve_item_link(&self, item: &D::Element) -> Option<String> {
        let link = self
            .driver
            .find_in(item, selectors::LIST_ITEM_LINK)
            .await
            .ok()?;
        self.driver.attribute(&link, "href").await.ok().flatten()
    }

    /// Best-effort dismissal of the cookie/consent overlay.
    ///
    /// The whole overlay timeout applies to finding the accept button
    /// itself, not just to any button existing: unrelated buttons usually
    /// render before the overlay does, so the candidate set is re-scanned
    /// until a text match appears or the timeout elapses. The overlay not
    /// being shown is the expected steady state, so every failure path here
    /// is silent.
    async fn dismiss_consent_overlay(&self) {
        let deadline = std::time::Instant::now() + self.overlay_timeout;

        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                break;
            }

            let buttons = match self
                .driver
                .wait_for_all(selectors::CONSENT_BUTTON, remaining)
                .await
            {
                Ok(buttons) => buttons,
                Err(_) => break,
            };

            if let Some(button) = self.find_accept_button(&buttons).await {
                match self.driver.click(button).await {
                    Ok(()) => {
                        tracing::info!("Consent overlay found. Clicking the accept button.");
                        tokio::time::sleep(CONSENT_SETTLE).await;
                    }
                    Err(e) => {
                        tracing::debug!("Consent button could not be clicked: {}", e);
                    }
                }
                return;
            }

            tokio::time::sleep(CONSENT_POLL).await;
        }

        tracing::debug!("Consent overlay not found or already accepted");
    }

    /// First candidate whose visible text matches an accept pattern.
    async fn find_accept_button<'b>(&self, buttons: &'b [D::Element]) -> Option<&'b D::Element> {
        for button in buttons {
            let Ok(label) = self.driver.text(button).await else {
                continue;
            };
            if selectors::ACCEPT_PATTERNS.iter().any(|p| label.contains(p)) {
                return Some(button);
            }
        }
        None
    }
}
