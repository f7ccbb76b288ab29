//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default classifier endpoint, only edit this file.

/// Default remote threat classifier URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:8080
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:8080";

/// Default timeout for a single classify call (seconds)
pub const DEFAULT_CLASSIFIER_TIMEOUT: u64 = 10;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Agent-Vetting";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier server URL from environment or use default
pub fn get_classifier_url() -> String {
    std::env::var("CLASSIFIER_SERVER_URL")
        .unwrap_or_else(|_| DEFAULT_CLASSIFIER_URL.to_string())
}

/// Get classifier API token from environment (no default)
pub fn get_classifier_token() -> Option<String> {
    std::env::var("CLASSIFIER_API_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Get classify timeout from environment or use default
pub fn get_classifier_timeout() -> u64 {
    std::env::var("CLASSIFIER_TIMEOUT_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CLASSIFIER_TIMEOUT)
}

/// Check if the remote classifier is enabled
pub fn is_classifier_enabled() -> bool {
    std::env::var("CLASSIFIER_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
