//! Sequential crawl over the resolved chart links
//!
//! The sequencer is a pull-based producer: the consumer asks for one item
//! at a time, so each record is fully handled before the next fetch starts.
//! Items come back strictly in listing order, exactly one page in flight,
//! with a randomized pause between items to pace requests.

use crate::config::ScrapeConfig;
use crate::driver::{Driver, DriverResult};
use crate::record::MovieRecord;
use crate::scraper::detail::DetailFetcher;
use crate::scraper::listing::ListingResolver;
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

/// Drives the end-to-end crawl: listing resolution, then one paced
/// detail fetch per [`next_item`](CrawlSequencer::next_item) call.
///
/// The sequencer owns the browser session for the whole run; the session is
/// released exactly once through [`quit`](CrawlSequencer::quit).
pub struct CrawlSequencer<D: Driver> {
    driver: D,
    config: ScrapeConfig,
    debug_dir: PathBuf,
    links: Vec<String>,
    position: usize,
}

impl<D: Driver> CrawlSequencer<D> {
    pub fn new(driver: D, config: ScrapeConfig, debug_dir: PathBuf) -> Self {
        Self {
            driver,
            config,
            debug_dir,
            links: Vec::new(),
            position: 0,
        }
    }

    /// Resolves the chart listing once and returns how many links will be
    /// processed (after the configured cap).
    ///
    /// With an empty resolution the sequence terminates immediately: every
    /// later [`next_item`](CrawlSequencer::next_item) call returns `None`.
    pub async fn start(&mut self, index_url: &str) -> usize {
        let resolver = ListingResolver::new(
            &self.driver,
            &self.debug_dir,
            self.config.page_load_timeout(),
            self.config.overlay_timeout(),
        );

        self.links = resolver.resolve(index_url).await;
        self.position = 0;

        if self.links.is_empty() {
            tracing::error!("No movie links were found. Nothing to extract.");
        }

        self.effective_len()
    }

    /// Produces the next item of the sequence.
    ///
    /// * `Some(Some(record))` - the page became ready; the record may still
    ///   have empty fields
    /// * `Some(None)` - the page never became ready and the item was dropped
    /// * `None` - end of the sequence
    pub async fn next_item(&mut self) -> Option<Option<MovieRecord>> {
        if self.position >= self.effective_len() {
            if self.position > 0 {
                tracing::info!("Movie extraction finished");
            }
            return None;
        }

        // Pause between items, never before the first one
        if self.position > 0 {
            tokio::time::sleep(self.inter_item_delay()).await;
        }

        let url = self.links[self.position].clone();
        self.position += 1;

        tracing::info!(
            "Extracting movie {} of {}...",
            self.position,
            self.effective_len()
        );

        let fetcher = DetailFetcher::new(
            &self.driver,
            &self.debug_dir,
            self.config.page_load_timeout(),
        );

        Some(fetcher.fetch(&url).await)
    }

    /// Releases the browser session. Must be called exactly once per run.
    pub async fn quit(self) -> DriverResult<()> {
        self.driver.quit().await
    }

    /// Number of links that will actually be processed.
    fn effective_len(&self) -> usize {
        if self.config.max_items == 0 {
            self.links.len()
        } else {
            self.links.len().min(self.config.max_items as usize)
        }
    }

    /// Uniform random delay from the configured range.
    fn inter_item_delay(&self) -> Duration {
        let ms = rand::thread_rng().gen_range(self.config.delay_min_ms..self.config.delay_max_ms);
        Duration::from_millis(ms)
    }
}
