//! Per-field extraction from a loaded detail page
//!
//! Each field resolves independently: a lookup failure is logged at warning
//! level (naming the field and the page URL) and converted to `None`, never
//! raised to the caller. One missing field never costs the others.

use crate::driver::{Driver, DriverResult};
use crate::scraper::selectors;

/// The five semantic fields of a movie record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Year,
    Runtime,
    Rating,
    Synopsis,
}

impl FieldKind {
    /// Field name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Year => "year",
            FieldKind::Runtime => "runtime",
            FieldKind::Rating => "rating",
            FieldKind::Synopsis => "synopsis",
        }
    }
}

/// Resolves single fields from the page the driver currently shows.
pub struct FieldExtractor<'a, D: Driver> {
    driver: &'a D,
    url: &'a str,
}

impl<'a, D: Driver> FieldExtractor<'a, D> {
    pub fn new(driver: &'a D, url: &'a str) -> Self {
        Self { driver, url }
    }

    /// Extracts one field, converting any lookup failure to `None`.
    pub async fn extract(&self, kind: FieldKind) -> Option<String> {
        let result = match kind {
            FieldKind::Title => self.text_of(selectors::TITLE).await,
            FieldKind::Year => self.metadata_entry(MetadataSlot::First).await,
            FieldKind::Runtime => self
                .metadata_entry(MetadataSlot::Last)
                .await
                .map(|raw| raw.and_then(|t| format_runtime(&t))),
            FieldKind::Rating => self
                .text_of(selectors::RATING)
                .await
                .map(|t| t.map(strip_rating_scale)),
            FieldKind::Synopsis => self.text_of(selectors::SYNOPSIS).await,
        };

        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    field = kind.name(),
                    url = self.url,
                    "Field could not be resolved: {}",
                    e
                );
                None
            }
        }
    }

    /// Text of the first element matching `selector`; empty text reads as absent.
    async fn text_of(&self, selector: &str) -> DriverResult<Option<String>> {
        let element = self.driver.find(selector).await?;
        let text = self.driver.text(&element).await?;
        Ok(non_empty(text))
    }

    /// Text of one entry of the metadata list next to the title heading.
    async fn metadata_entry(&self, slot: MetadataSlot) -> DriverResult<Option<String>> {
        let list = self.driver.find(selectors::METADATA_LIST).await?;
        let entries = self
            .driver
            .find_all_in(&list, selectors::METADATA_ITEM)
            .await?;

        let entry = match slot {
            MetadataSlot::First => entries.first(),
            MetadataSlot::Last => entries.last(),
        };

        match entry {
            Some(element) => Ok(non_empty(self.driver.text(element).await?)),
            None => Ok(None),
        }
    }
}

/// Which entry of the metadata list a field maps to.
enum MetadataSlot {
    First,
    Last,
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}

/// Keeps only the score in front of a `/10`-style scale suffix.
fn strip_rating_scale(raw: String) -> String {
    match raw.split_once('/') {
        Some((score, _)) => score.trim().to_string(),
        None => raw,
    }
}

/// Normalizes a raw runtime string to `"<H>h <M>min"` form.
///
/// Parses integer hour and minute components from text like `"2h 30min"`,
/// `"2h"`, or `"45min"` (a lone minute value needs no hour marker). Only
/// non-zero components are rendered, hours before minutes, space-joined.
/// Returns `None` when neither component is present.
pub fn format_runtime(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let mut hours: u32 = 0;
    let mut minutes: u32 = 0;

    if let Some((hour_part, rest)) = raw.split_once('h') {
        hours = hour_part.trim().parse().unwrap_or(0);
        if let Some((minute_part, _)) = rest.split_once("min") {
            minutes = minute_part.trim().parse().unwrap_or(0);
        }
    } else if let Some((minute_part, _)) = raw.split_once("min") {
        minutes = minute_part.trim().parse().unwrap_or(0);
    }

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}min", minutes));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
