use crate::config::types::{BrowserSettings, Config, OutputConfig, ScrapeConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_browser_settings(&config.browser)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates extraction configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    Url::parse(&config.index_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index-url: {}", e)))?;

    if config.delay_min_ms >= config.delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "delay-min-ms must be below delay-max-ms, got {}..{}",
            config.delay_min_ms, config.delay_max_ms
        )));
    }

    if config.page_load_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page-load-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.overlay_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "overlay-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates browser settings
fn validate_browser_settings(settings: &BrowserSettings) -> Result<(), ConfigError> {
    if settings.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if settings.language.is_empty() {
        return Err(ConfigError::Validation(
            "language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.base_dir.is_empty() {
        return Err(ConfigError::Validation(
            "base-dir cannot be empty".to_string(),
        ));
    }

    if config.table_filename.is_empty() {
        return Err(ConfigError::Validation(
            "table-filename cannot be empty".to_string(),
        ));
    }

    // The table lands inside the run's processed directory; a path separator
    // in the name would escape it.
    if config.table_filename.contains('/') || config.table_filename.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "table-filename must be a bare file name, got '{}'",
            config.table_filename
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_index_url() {
        let mut config = Config::default();
        config.scrape.index_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_delay_range_rejected() {
        let mut config = Config::default();
        config.scrape.delay_min_ms = 2000;
        config.scrape.delay_max_ms = 2000;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let mut config = Config::default();
        config.scrape.delay_min_ms = 3000;
        config.scrape.delay_max_ms = 1000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_page_load_timeout_rejected() {
        let mut config = Config::default();
        config.scrape.page_load_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.browser.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_table_filename_with_separator_rejected() {
        let mut config = Config::default();
        config.output.table_filename = "../escape.csv".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_items_allowed() {
        // 0 means "no cap", not an invalid bound
        let mut config = Config::default();
        config.scrape.max_items = 0;
        assert!(validate(&config).is_ok());
    }
}
