//! Detail-page fetching
//!
//! Navigates to one movie URL, waits for the page's readiness marker, and
//! assembles a record from five independent field extractions. Only a page
//! that never becomes ready discards the whole item; missing fields below
//! the readiness marker leave their slots empty.

use crate::driver::Driver;
use crate::record::MovieRecord;
use crate::scraper::debug::save_debug_page;
use crate::scraper::fields::{FieldExtractor, FieldKind};
use crate::scraper::selectors;
use std::path::Path;
use std::time::Duration;

/// Fetches and assembles one movie record per detail URL.
pub struct DetailFetcher<'a, D: Driver> {
    driver: &'a D,
    debug_dir: &'a Path,
    page_timeout: Duration,
}

impl<'a, D: Driver> DetailFetcher<'a, D> {
    pub fn new(driver: &'a D, debug_dir: &'a Path, page_timeout: Duration) -> Self {
        Self {
            driver,
            debug_dir,
            page_timeout,
        }
    }

    /// Fetches the detail page at `url` and assembles its record.
    ///
    /// Returns `None` only when the page never becomes ready (the title
    /// region did not appear within the timeout) or navigation itself
    /// failed; in both cases the page markup is captured for diagnosis.
    /// Once the readiness marker appears a record is always returned, even
    /// if every other field is absent.
    pub async fn fetch(&self, url: &str) -> Option<MovieRecord> {
        if let Err(e) = self.driver.navigate(url).await {
            tracing::error!(url, "Could not open detail page: {}", e);
            save_debug_page(self.driver, self.debug_dir, "moviedetail").await;
            return None;
        }

        if let Err(e) = self
            .driver
            .wait_for(selectors::TITLE, self.page_timeout)
            .await
        {
            tracing::error!(url, "Timed out waiting for the movie title region: {}", e);
            save_debug_page(self.driver, self.debug_dir, "moviedetail").await;
            return None;
        }

        let extractor = FieldExtractor::new(self.driver, url);

        let record = MovieRecord {
            title: extractor.extract(FieldKind::Title).await,
            year: extractor.extract(FieldKind::Year).await,
            runtime: extractor.extract(FieldKind::Runtime).await,
            rating: extractor.extract(FieldKind::Rating).await,
            synopsis: extractor.extract(FieldKind::Synopsis).await,
        };

        tracing::debug!(
            title = record.title.as_deref().unwrap_or("<missing>"),
            "Detail extraction finished"
        );

        Some(record)
    }
}
