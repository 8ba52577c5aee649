/// Default deployment targeted when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://academicshop.preview.emergentagent.com";

/// Environment variable the deployment publishes its public URL under
pub const BASE_URL_ENV: &str = "NEXT_PUBLIC_BASE_URL";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the deployment under test (no trailing slash)
    pub base_url: String,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to the preview host
    pub fn from_env() -> Self {
        Self {
            base_url: resolve_base_url(std::env::var(BASE_URL_ENV).ok()),
            ..Self::default()
        }
    }

    /// Root of the API under test
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

fn resolve_base_url(raw: Option<String>) -> String {
    match raw {
        Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_preview_host() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn api_base_appends_prefix() {
        let config = Config {
            base_url: "https://example.com".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_base(), "https://example.com/api");
    }

    #[test]
    fn resolve_base_url_strips_trailing_slash() {
        assert_eq!(
            resolve_base_url(Some("https://example.com/".to_string())),
            "https://example.com"
        );
    }

    #[test]
    fn resolve_base_url_falls_back_when_unset_or_blank() {
        assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(Some("  ".to_string())), DEFAULT_BASE_URL);
    }
}
