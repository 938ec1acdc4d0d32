//! Browser automation driver capability
//!
//! The extraction pipeline never talks to a browser library directly; it
//! consumes the narrow [`Driver`] trait defined here. The production
//! implementation drives a headless Chrome session via chromiumoxide, and
//! the test suite substitutes a scripted in-memory driver.

mod chrome;

pub use chrome::ChromeDriver;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving the browser
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Timed out after {timeout:?} waiting for '{selector}'")]
    WaitTimeout { selector: String, timeout: Duration },

    #[error("Browser session error: {0}")]
    Session(String),
}

impl DriverError {
    /// Returns true if this error is an explicit-wait timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DriverError::WaitTimeout { .. })
    }
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Narrow interface over one long-lived browser session.
///
/// All lookups use CSS selectors, optionally scoped to a previously resolved
/// element. Explicit waits poll until the selector resolves or the timeout
/// elapses; everything else fails fast. The session is released exactly once
/// through the consuming [`quit`](Driver::quit).
#[async_trait(?Send)]
pub trait Driver {
    type Element;

    /// Navigates the session's page to the given URL.
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Waits up to `timeout` for the first element matching `selector`.
    async fn wait_for(&self, selector: &str, timeout: Duration)
        -> DriverResult<Self::Element>;

    /// Waits up to `timeout` for at least one element matching `selector`,
    /// then returns all matches.
    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<Self::Element>>;

    /// Finds the first element matching `selector` on the current page.
    async fn find(&self, selector: &str) -> DriverResult<Self::Element>;

    /// Finds the first element matching `selector` inside `scope`.
    async fn find_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> DriverResult<Self::Element>;

    /// Finds all elements matching `selector` inside `scope`.
    async fn find_all_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> DriverResult<Vec<Self::Element>>;

    /// Returns the rendered text content of an element, trimmed.
    async fn text(&self, element: &Self::Element) -> DriverResult<String>;

    /// Returns the value of an attribute, or `None` when absent.
    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> DriverResult<Option<String>>;

    /// Clicks an element.
    async fn click(&self, element: &Self::Element) -> DriverResult<()>;

    /// Returns the full markup of the current page.
    async fn page_source(&self) -> DriverResult<String>;

    /// Shuts the browser session down. Must be called exactly once.
    async fn quit(self) -> DriverResult<()>
    where
        Self: Sized;
}
