//! Frontend configuration module
//!
//! Build-time settings for the backend location, logging and session
//! persistence.

/// Backend used when `TRIPPLANNER_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// `localStorage` key holding the raw bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Delay before a successful signup moves on to the login view.
pub const SIGNUP_REDIRECT_DELAY_MS: u32 = 2_000;

/// Frontend configuration for backend access and logging
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL of the trip-planning backend, without a trailing slash.
    pub api_base_url: String,
    /// Maximum level forwarded to the browser console.
    pub log_level: log::LevelFilter,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_overrides(
            option_env!("TRIPPLANNER_API_BASE_URL"),
            option_env!("TRIPPLANNER_LOG_LEVEL"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from optional overrides, falling back to the
    /// defaults for anything missing, blank or unparseable.
    pub fn from_overrides(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let log_level = log_level
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(log::LevelFilter::Info);
        Self {
            api_base_url,
            log_level,
        }
    }

    /// Get the backend base URL
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
