use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for marquee
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub browser: BrowserSettings,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape: ScrapeConfig::default(),
            browser: BrowserSettings::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Extraction behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// URL of the chart page that lists the movies
    #[serde(rename = "index-url")]
    pub index_url: String,

    /// Maximum number of chart entries to process (0 = process every entry)
    #[serde(rename = "max-items")]
    pub max_items: u32,

    /// Lower bound of the randomized inter-item delay (milliseconds, inclusive)
    #[serde(rename = "delay-min-ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the randomized inter-item delay (milliseconds, exclusive)
    #[serde(rename = "delay-max-ms")]
    pub delay_max_ms: u64,

    /// How long to wait for a page's readiness marker (seconds)
    #[serde(rename = "page-load-timeout-secs")]
    pub page_load_timeout_secs: u64,

    /// How long to look for the consent overlay before giving up (seconds)
    #[serde(rename = "overlay-timeout-secs")]
    pub overlay_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            index_url: "https://www.imdb.com/pt/chart/top/".to_string(),
            max_items: 2,
            delay_min_ms: 1000,
            delay_max_ms: 3000,
            page_load_timeout_secs: 30,
            overlay_timeout_secs: 5,
        }
    }
}

impl ScrapeConfig {
    /// Page-readiness timeout as a Duration
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// Consent-overlay timeout as a Duration
    pub fn overlay_timeout(&self) -> Duration {
        Duration::from_secs(self.overlay_timeout_secs)
    }
}

/// Browser session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Whether to run the browser without a visible window
    pub headless: bool,

    /// User agent string presented to the site
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Browser UI/content language
    pub language: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36"
                .to_string(),
            language: "pt-BR".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which each run's timestamped tree is created
    #[serde(rename = "base-dir")]
    pub base_dir: String,

    /// File name of the consolidated table inside the run's processed directory
    #[serde(rename = "table-filename")]
    pub table_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: "executions".to_string(),
            table_filename: "top_movies.csv".to_string(),
        }
    }
}
