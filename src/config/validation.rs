use crate::config::types::{Config, OutputConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.target_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "target-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_retry_attempts < 1 || config.max_retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retry-attempts must be between 1 and 10, got {}",
            config.max_retry_attempts
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            scraper: ScraperConfig {
                target_url: "https://books.example.com/".to_string(),
                max_concurrent_requests: 15,
                request_timeout_secs: 5,
                max_retry_attempts: 5,
                retry_base_delay_ms: 100,
                user_agent: "TestScraper/1.0".to_string(),
            },
            output: OutputConfig {
                csv_path: "./books.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let mut config = valid_config();
        config.scraper.target_url = "ftp://books.example.com/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unparsable_url() {
        let mut config = valid_config();
        config.scraper.target_url = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = valid_config();
        config.scraper.max_concurrent_requests = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_excessive_retry_attempts() {
        let mut config = valid_config();
        config.scraper.max_retry_attempts = 50;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_csv_path() {
        let mut config = valid_config();
        config.output.csv_path = String::new();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }
}
