//! Application configuration constants
//!
//! Central location for all configuration constants, resource limits,
//! and validation boundaries used throughout the application, plus the
//! runtime connection settings resolved at startup.

use std::time::Duration;

// ===== Backend =====

/// Base URL of the REST backend when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "STORENOTES_API_URL";

/// Environment variable overriding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "STORENOTES_TIMEOUT_SECS";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ===== Filtering =====

/// Quiet period after the last keystroke before a search re-renders
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Reminders due within this many hours count as upcoming
pub const UPCOMING_WINDOW_HOURS: i64 = 24;

/// Selector value meaning "no reminder status filter"
pub const ALL_SENTINEL: &str = "all";

// ===== Field Limits =====

/// Maximum length of a store name
pub const MAX_STORE_NAME_LEN: usize = 100;
/// Maximum length of a store description
pub const MAX_STORE_DESCRIPTION_LEN: usize = 500;
/// Maximum length of a store address
pub const MAX_STORE_ADDRESS_LEN: usize = 200;
/// Maximum length of a store phone number
pub const MAX_STORE_PHONE_LEN: usize = 20;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 100;
/// Maximum length of a category description
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 300;

/// Maximum length of a note or reminder title
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum length of a reminder description
pub const MAX_REMINDER_DESCRIPTION_LEN: usize = 500;

// ===== Registration Codes =====

/// Leading letter of every contact registration code
pub const REGISTRATION_CODE_PREFIX: char = 'T';

/// Number of digits following the prefix
pub const REGISTRATION_CODE_DIGITS: usize = 7;

/// Connection settings for the backend gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ConsoleConfig {
    /// Resolve settings: explicit values first, then the environment, then defaults.
    pub fn resolve(base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        let env_url = std::env::var(API_URL_ENV).ok();
        let env_timeout = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok());
        Self::from_sources(base_url, timeout_secs, env_url, env_timeout)
    }

    fn from_sources(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        env_url: Option<String>,
        env_timeout: Option<u64>,
    ) -> Self {
        let base_url = base_url
            .or(env_url)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let secs = timeout_secs
            .or(env_timeout)
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let cfg = ConsoleConfig::from_sources(
            Some("http://api.local/api/".to_string()),
            Some(5),
            Some("http://env/api".to_string()),
            Some(30),
        );
        assert_eq!(cfg.base_url, "http://api.local/api");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_environment_then_defaults() {
        let cfg =
            ConsoleConfig::from_sources(None, None, Some("http://env/api".to_string()), None);
        assert_eq!(cfg.base_url, "http://env/api");
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let cfg = ConsoleConfig::from_sources(None, Some(0), Some("  ".to_string()), None);
        assert_eq!(cfg, ConsoleConfig::default());
    }
}
