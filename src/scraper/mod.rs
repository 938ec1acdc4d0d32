//! Extraction pipeline for the movie chart
//!
//! This module contains the core scraping logic, including:
//! - Per-field extraction from a detail page, tolerant of absence
//! - Detail-page fetching with a readiness wait and debug-markup capture
//! - Chart listing resolution with consent-overlay dismissal
//! - The sequential, paced crawl over the resolved links
//!
//! Control flow: [`CrawlSequencer`] resolves the listing once, then yields
//! one item per [`CrawlSequencer::next_item`] call, strictly in listing
//! order, with a randomized delay between items.

mod debug;
mod detail;
mod fields;
mod listing;
mod sequencer;

pub use debug::save_debug_page;
pub use detail::DetailFetcher;
pub use fields::{format_runtime, FieldExtractor, FieldKind};
pub use listing::ListingResolver;
pub use sequencer::CrawlSequencer;

/// CSS selectors for the chart site's DOM structure.
///
/// Grouped here so a site markup change is a one-file fix.
pub mod selectors {
    /// One chart entry on the index page
    pub const LIST_ITEM: &str = "ul > li.ipc-metadata-list-summary-item";

    /// The detail-page link nested inside a chart entry
    pub const LIST_ITEM_LINK: &str = "div.ipc-title a";

    /// Readiness marker of a detail page: the title heading
    pub const TITLE: &str = "[data-testid='hero__pageTitle']";

    /// Metadata list (year, certificate, runtime) next to the title heading
    pub const METADATA_LIST: &str = "h1[data-testid='hero__pageTitle'] ~ ul";

    /// One entry of the metadata list
    pub const METADATA_ITEM: &str = "li";

    /// Aggregate rating score
    pub const RATING: &str = "[data-testid='hero-rating-bar__aggregate-rating__score'] > span";

    /// Plot synopsis paragraph
    pub const SYNOPSIS: &str = "[data-testid='plot']";

    /// Candidate consent-overlay buttons; matched against [`ACCEPT_PATTERNS`]
    pub const CONSENT_BUTTON: &str = "button";

    /// Visible-text patterns identifying the consent accept button
    pub const ACCEPT_PATTERNS: [&str; 2] = ["Accept", "Aceitar"];
}
