//! End-to-end pipeline tests over a scripted in-memory driver
//!
//! The fake driver serves pre-built element trees keyed by URL and records
//! every navigation, click, and the final quit, so the tests can assert the
//! crawl's observable behavior without a browser.

use async_trait::async_trait;
use marquee::config::ScrapeConfig;
use marquee::driver::{Driver, DriverError, DriverResult};
use marquee::output::{consolidate, RunTally};
use marquee::scraper::{selectors, CrawlSequencer};
use marquee::storage::{JsonFileStore, RecordStore};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
struct FakeElement {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, Vec<FakeElement>>,
}

impl FakeElement {
    fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    fn with_children(mut self, selector: &str, children: Vec<FakeElement>) -> Self {
        self.children.insert(selector.to_string(), children);
        self
    }
}

/// One scripted page: selector to matching elements, in document order.
#[derive(Debug, Clone, Default)]
struct FakePage {
    elements: HashMap<String, Vec<FakeElement>>,
}

impl FakePage {
    fn with(mut self, selector: &str, elements: Vec<FakeElement>) -> Self {
        self.elements.insert(selector.to_string(), elements);
        self
    }
}

/// Scripted driver: lookups resolve instantly or fail instantly, waits never
/// actually sleep.
struct FakeDriver {
    pages: HashMap<String, FakePage>,
    /// Elements that only appear after N lookups of (url, selector), for
    /// late-rendering page regions.
    deferred: RefCell<HashMap<(String, String), (usize, Vec<FakeElement>)>>,
    current: RefCell<Option<String>>,
    navigations: Rc<RefCell<Vec<String>>>,
    clicks: Rc<RefCell<Vec<String>>>,
    quit_called: Rc<Cell<bool>>,
}

impl FakeDriver {
    fn new(pages: HashMap<String, FakePage>) -> Self {
        Self {
            pages,
            deferred: RefCell::new(HashMap::new()),
            current: RefCell::new(None),
            navigations: Rc::new(RefCell::new(Vec::new())),
            clicks: Rc::new(RefCell::new(Vec::new())),
            quit_called: Rc::new(Cell::new(false)),
        }
    }

    fn with_deferred(
        self,
        url: &str,
        selector: &str,
        lookups_until_visible: usize,
        elements: Vec<FakeElement>,
    ) -> Self {
        self.deferred.borrow_mut().insert(
            (url.to_string(), selector.to_string()),
            (lookups_until_visible, elements),
        );
        self
    }

    fn navigations(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.navigations)
    }

    fn clicks(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.clicks)
    }

    fn quit_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.quit_called)
    }

    fn lookup(&self, selector: &str) -> Vec<FakeElement> {
        let current = self.current.borrow();
        let Some(url) = current.as_deref() else {
            return Vec::new();
        };
        let mut found = self
            .pages
            .get(url)
            .and_then(|page| page.elements.get(selector))
            .cloned()
            .unwrap_or_default();

        let key = (url.to_string(), selector.to_string());
        if let Some((countdown, elements)) = self.deferred.borrow_mut().get_mut(&key) {
            if *countdown == 0 {
                found.extend(elements.iter().cloned());
            } else {
                *countdown -= 1;
            }
        }

        found
    }
}

#[async_trait(?Send)]
impl Driver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.navigations.borrow_mut().push(url.to_string());
        *self.current.borrow_mut() = Some(url.to_string());
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> DriverResult<FakeElement> {
        self.lookup(selector)
            .into_iter()
            .next()
            .ok_or(DriverError::WaitTimeout {
                selector: selector.to_string(),
                timeout,
            })
    }

    async fn wait_for_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> DriverResult<Vec<FakeElement>> {
        let found = self.lookup(selector);
        if found.is_empty() {
            Err(DriverError::WaitTimeout {
                selector: selector.to_string(),
                timeout,
            })
        } else {
            Ok(found)
        }
    }

    async fn find(&self, selector: &str) -> DriverResult<FakeElement> {
        self.lookup(selector)
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NotFound(selector.to_string()))
    }

    async fn find_in(&self, scope: &FakeElement, selector: &str) -> DriverResult<FakeElement> {
        scope
            .children
            .get(selector)
            .and_then(|children| children.first())
            .cloned()
            .ok_or_else(|| DriverError::NotFound(selector.to_string()))
    }

    async fn find_all_in(
        &self,
        scope: &FakeElement,
        selector: &str,
    ) -> DriverResult<Vec<FakeElement>> {
        match scope.children.get(selector) {
            Some(children) => Ok(children.clone()),
            None => Err(DriverError::NotFound(selector.to_string())),
        }
    }

    async fn text(&self, element: &FakeElement) -> DriverResult<String> {
        Ok(element.text.clone())
    }

    async fn attribute(
        &self,
        element: &FakeElement,
        name: &str,
    ) -> DriverResult<Option<String>> {
        Ok(element.attrs.get(name).cloned())
    }

    async fn click(&self, element: &FakeElement) -> DriverResult<()> {
        self.clicks.borrow_mut().push(element.text.clone());
        Ok(())
    }

    async fn page_source(&self) -> DriverResult<String> {
        Ok("<html><body>fake page</body></html>".to_string())
    }

    async fn quit(self) -> DriverResult<()> {
        self.quit_called.set(true);
        Ok(())
    }
}

const INDEX_URL: &str = "https://chart.test/top/";
const DETAIL_1: &str = "https://chart.test/title/tt0000001/";
const DETAIL_2: &str = "https://chart.test/title/tt0000002/";

fn chart_entry(href: &str) -> FakeElement {
    FakeElement::default().with_children(
        selectors::LIST_ITEM_LINK,
        vec![FakeElement::text("1. A Movie").with_attr("href", href)],
    )
}

/// Index page with a consent overlay and two chart entries.
fn index_page(hrefs: &[&str]) -> FakePage {
    FakePage::default()
        .with(
            selectors::CONSENT_BUTTON,
            vec![
                FakeElement::text("Customize options"),
                FakeElement::text("Aceitar tudo"),
            ],
        )
        .with(
            selectors::LIST_ITEM,
            hrefs.iter().map(|href| chart_entry(href)).collect(),
        )
}

/// Fully populated detail page.
fn detail_page(title: &str) -> FakePage {
    FakePage::default()
        .with(selectors::TITLE, vec![FakeElement::text(title)])
        .with(
            selectors::METADATA_LIST,
            vec![FakeElement::default().with_children(
                selectors::METADATA_ITEM,
                vec![
                    FakeElement::text("1994"),
                    FakeElement::text("16"),
                    FakeElement::text("2h 22min"),
                ],
            )],
        )
        .with(selectors::RATING, vec![FakeElement::text("9.3")])
        .with(
            selectors::SYNOPSIS,
            vec![FakeElement::text("Two imprisoned men bond over decades.")],
        )
}

fn fast_config(max_items: u32) -> ScrapeConfig {
    ScrapeConfig {
        index_url: INDEX_URL.to_string(),
        max_items,
        delay_min_ms: 0,
        delay_max_ms: 1,
        page_load_timeout_secs: 1,
        overlay_timeout_secs: 1,
    }
}

fn debug_captures(debug_dir: &Path, context: &str) -> Vec<PathBuf> {
    let prefix = format!("debug_page_{}_", context);
    std::fs::read_dir(debug_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect()
}

#[tokio::test]
async fn test_full_run_persists_and_consolidates() {
    let run_dir = tempfile::tempdir().unwrap();
    let debug_dir = run_dir.path().join("debug");
    let records_dir = run_dir.path().join("dados_extraidos");
    std::fs::create_dir_all(&debug_dir).unwrap();

    // Second entry's page never shows the title region, so the item drops.
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), index_page(&[DETAIL_1, DETAIL_2]));
    pages.insert(
        DETAIL_1.to_string(),
        detail_page("The Shawshank Redemption"),
    );
    pages.insert(DETAIL_2.to_string(), FakePage::default());

    let driver = FakeDriver::new(pages);
    let mut sequencer = CrawlSequencer::new(driver, fast_config(2), debug_dir.clone());

    assert_eq!(sequencer.start(INDEX_URL).await, 2);

    let mut store = JsonFileStore::open(&records_dir).unwrap();
    let mut tally = RunTally::default();
    while let Some(item) = sequencer.next_item().await {
        match item {
            Some(record) => {
                tally.record(true);
                store.put(&record).unwrap();
            }
            None => tally.record(false),
        }
    }
    sequencer.quit().await.unwrap();

    assert_eq!(tally.processed, 2);
    assert_eq!(tally.succeeded, 1);
    assert_eq!(tally.failed, 1);

    // One record file, with the runtime normalized
    assert!(records_dir.join("movie_1.json").exists());
    assert!(!records_dir.join("movie_2.json").exists());
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(records_dir.join("movie_1.json")).unwrap())
            .unwrap();
    assert_eq!(saved["title"], "The Shawshank Redemption");
    assert_eq!(saved["year"], "1994");
    assert_eq!(saved["runtime"], "2h 22min");
    assert_eq!(saved["rating"], "9.3");

    // The dropped item left exactly one page capture behind
    assert_eq!(debug_captures(&debug_dir, "moviedetail").len(), 1);

    // Consolidation produces one row under the five-column schema
    let table_path = run_dir.path().join("top_movies.csv");
    let artifact = consolidate(&store, &table_path).unwrap();
    assert_eq!(artifact, Some(table_path.clone()));

    let content = std::fs::read_to_string(&table_path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "title,year,runtime,rating,synopsis");
    assert_eq!(
        lines[1],
        "The Shawshank Redemption,1994,2h 22min,9.3,Two imprisoned men bond over decades."
    );
}

#[tokio::test]
async fn test_items_follow_listing_order() {
    let run_dir = tempfile::tempdir().unwrap();

    let hrefs = [
        "https://chart.test/title/u1/",
        "https://chart.test/title/u2/",
        "https://chart.test/title/u3/",
    ];
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), index_page(&hrefs));
    for (i, href) in hrefs.iter().enumerate() {
        pages.insert(href.to_string(), detail_page(&format!("Movie {}", i + 1)));
    }

    let driver = FakeDriver::new(pages);
    let navigations = driver.navigations();
    // max-items 0 means no cap
    let mut sequencer = CrawlSequencer::new(driver, fast_config(0), run_dir.path().to_path_buf());

    assert_eq!(sequencer.start(INDEX_URL).await, 3);

    let mut titles = Vec::new();
    while let Some(item) = sequencer.next_item().await {
        titles.push(item.and_then(|record| record.title));
    }

    assert_eq!(
        titles,
        vec![
            Some("Movie 1".to_string()),
            Some("Movie 2".to_string()),
            Some("Movie 3".to_string()),
        ]
    );

    let visited = navigations.borrow();
    let expected: Vec<String> = std::iter::once(INDEX_URL)
        .chain(hrefs)
        .map(str::to_string)
        .collect();
    assert_eq!(*visited, expected);
}

#[tokio::test]
async fn test_consent_overlay_accept_is_clicked() {
    let run_dir = tempfile::tempdir().unwrap();

    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), index_page(&[DETAIL_1]));
    pages.insert(DETAIL_1.to_string(), detail_page("A Movie"));

    let driver = FakeDriver::new(pages);
    let clicks = driver.clicks();
    let mut sequencer = CrawlSequencer::new(driver, fast_config(1), run_dir.path().to_path_buf());

    sequencer.start(INDEX_URL).await;

    // Only the matching button was clicked, not every candidate
    assert_eq!(*clicks.borrow(), vec!["Aceitar tudo".to_string()]);
}

#[tokio::test]
async fn test_late_consent_overlay_is_still_dismissed() {
    let run_dir = tempfile::tempdir().unwrap();

    // An unrelated button renders immediately; the accept button only shows
    // up after a couple of scans, while the overlay timeout is still running.
    let page = FakePage::default()
        .with(
            selectors::CONSENT_BUTTON,
            vec![FakeElement::text("Customize options")],
        )
        .with(selectors::LIST_ITEM, vec![chart_entry(DETAIL_1)]);
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), page);
    pages.insert(DETAIL_1.to_string(), detail_page("A Movie"));

    let driver = FakeDriver::new(pages).with_deferred(
        INDEX_URL,
        selectors::CONSENT_BUTTON,
        2,
        vec![FakeElement::text("Aceitar tudo")],
    );
    let clicks = driver.clicks();
    let mut sequencer = CrawlSequencer::new(driver, fast_config(1), run_dir.path().to_path_buf());

    assert_eq!(sequencer.start(INDEX_URL).await, 1);
    assert_eq!(*clicks.borrow(), vec!["Aceitar tudo".to_string()]);
}

#[tokio::test]
async fn test_missing_consent_overlay_is_silent() {
    let run_dir = tempfile::tempdir().unwrap();

    let page = FakePage::default().with(selectors::LIST_ITEM, vec![chart_entry(DETAIL_1)]);
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), page);
    pages.insert(DETAIL_1.to_string(), detail_page("A Movie"));

    let driver = FakeDriver::new(pages);
    let clicks = driver.clicks();
    let mut sequencer = CrawlSequencer::new(driver, fast_config(1), run_dir.path().to_path_buf());

    // Listing still resolves without any overlay present
    assert_eq!(sequencer.start(INDEX_URL).await, 1);
    assert!(clicks.borrow().is_empty());
}

#[tokio::test]
async fn test_unresolvable_entry_is_skipped_not_fatal() {
    let run_dir = tempfile::tempdir().unwrap();

    // Middle entry has no link element inside it
    let page = FakePage::default().with(
        selectors::LIST_ITEM,
        vec![
            chart_entry(DETAIL_1),
            FakeElement::default(),
            chart_entry(DETAIL_2),
        ],
    );
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), page);
    pages.insert(DETAIL_1.to_string(), detail_page("First"));
    pages.insert(DETAIL_2.to_string(), detail_page("Second"));

    let driver = FakeDriver::new(pages);
    let mut sequencer = CrawlSequencer::new(driver, fast_config(0), run_dir.path().to_path_buf());

    assert_eq!(sequencer.start(INDEX_URL).await, 2);

    let first = sequencer.next_item().await.flatten();
    let second = sequencer.next_item().await.flatten();
    assert_eq!(first.and_then(|r| r.title).as_deref(), Some("First"));
    assert_eq!(second.and_then(|r| r.title).as_deref(), Some("Second"));
}

#[tokio::test]
async fn test_unreachable_listing_yields_empty_run_with_capture() {
    let run_dir = tempfile::tempdir().unwrap();
    let debug_dir = run_dir.path().join("debug");
    std::fs::create_dir_all(&debug_dir).unwrap();

    // The index URL resolves to a page without any chart entries
    let mut pages = HashMap::new();
    pages.insert(INDEX_URL.to_string(), FakePage::default());

    let driver = FakeDriver::new(pages);
    let mut sequencer = CrawlSequencer::new(driver, fast_config(2), debug_dir.clone());

    assert_eq!(sequencer.start(INDEX_URL).await, 0);
    assert!(sequencer.next_item().await.is_none());
    assert_eq!(debug_captures(&debug_dir, "filmlist").len(), 1);
}

#[tokio::test]
async fn test_quit_releases_the_session() {
    let run_dir = tempfile::tempdir().unwrap();

    let driver = FakeDriver::new(HashMap::new());
    let quit_flag = driver.quit_flag();
    let sequencer = CrawlSequencer::new(driver, fast_config(2), run_dir.path().to_path_buf());

    assert!(!quit_flag.get());
    sequencer.quit().await.unwrap();
    assert!(quit_flag.get());
}
