use crate::config::types::{Config, CrawlerConfig, MAX_WORKERS};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if let Some(workers) = config.workers {
        if !(1..=MAX_WORKERS).contains(&workers) {
            return Err(ConfigError::Validation(format!(
                "workers must be between 1 and {}, got {}",
                MAX_WORKERS, workers
            )));
        }
    }

    validate_user_agent(&config.user_agent)?;

    if let Some(path) = &config.suffix_list {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "suffix-list path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the outbound user agent string
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    // Header values cannot carry control characters
    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent contains control characters: {:?}",
            user_agent
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_workers() {
        let mut config = Config::default();
        assert!(validate(&config).is_ok());

        config.crawler.workers = Some(1);
        assert!(validate(&config).is_ok());

        config.crawler.workers = Some(MAX_WORKERS);
        assert!(validate(&config).is_ok());

        config.crawler.workers = Some(0);
        assert!(validate(&config).is_err());

        config.crawler.workers = Some(MAX_WORKERS + 1);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_user_agent() {
        assert!(validate_user_agent("Mozilla/5.0").is_ok());
        assert!(validate_user_agent("").is_err());
        assert!(validate_user_agent("   ").is_err());
        assert!(validate_user_agent("Bot\r\nX-Injected: 1").is_err());
    }

    #[test]
    fn test_validate_suffix_list_path() {
        let mut config = Config::default();
        config.crawler.suffix_list = Some(PathBuf::from("list.dat"));
        assert!(validate(&config).is_ok());

        config.crawler.suffix_list = Some(PathBuf::new());
        assert!(validate(&config).is_err());
    }
}
